#![no_std]
#![no_main]

extern crate alloc;

use robot_core::{
	config::{LCD_GREETING_LINE, GREETING},
	serial_task, ArcadeDrive, CenterToggle, DriveConfig, Lcd, LcdButtons, Periodic,
	SerialConfig,
};
use vexide::prelude::*;

use devices::{MasterController, MotorGroup, Uptime};
use llemu::Llemu;
use usb::UsbSerial;

mod devices;
mod llemu;
mod logger;
mod usb;

struct Robot {
	controller: Controller,
	llemu: Llemu,
	drive: DriveConfig,
}

impl Robot {
	/// Runs as soon as the program starts, before any competition mode.
	fn initialize(peripherals: Peripherals) -> Self {
		let mut llemu = Llemu::initialize();
		llemu.set_text(LCD_GREETING_LINE, GREETING);

		let mut buttons = llemu::button_bank();
		let mut toggle = CenterToggle::new();
		buttons.register(LcdButtons::CENTER, move |lcd| toggle.press(lcd));
		llemu.spawn_dispatch(buttons);

		spawn(async {
			let config = SerialConfig::DEFAULT;
			let mut periodic = Periodic::new(Uptime, config.period);
			let exit = serial_task(&config, UsbSerial::open, &mut periodic).await;
			log::debug!("serial task ended: {exit:?}");
		})
		.detach();

		Self {
			controller: peripherals.primary_controller,
			llemu,
			drive: DriveConfig::DEFAULT,
		}
	}
}

impl Compete for Robot {
	async fn disabled(&mut self) {}

	/// Competition specific setup (PROS `competition_initialize`).
	async fn connected(&mut self) {}

	async fn autonomous(&mut self) {}

	async fn driver(&mut self) {
		let mut drive = ArcadeDrive::new(
			MasterController(&self.controller),
			MotorGroup::new(&self.drive.left_ports),
			MotorGroup::new(&self.drive.right_ports),
		);
		let mut periodic = Periodic::new(Uptime, self.drive.period);

		drive.run(&mut self.llemu, &mut periodic).await;
	}
}

#[vexide::main]
async fn main(peripherals: Peripherals) {
	// nothing to report to if this fails
	logger::init().ok();

	Robot::initialize(peripherals).compete().await;
}
