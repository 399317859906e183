//! Traits over the devices the robot program talks to.

use core::{fmt, future::Future, time::Duration};

bitflags::bitflags! {
	/// Emulated LCD buttons, bit-compatible with PROS `LCD_BTN_*`.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct LcdButtons: u8 {
		const RIGHT = 0b001;
		const CENTER = 0b010;
		const LEFT = 0b100;
	}
}

/// Line based text display with a three button bank.
pub trait Lcd {
	/// Replace the contents of `line` with formatted text.
	fn print(&mut self, line: u8, args: fmt::Arguments<'_>);

	fn clear_line(&mut self, line: u8);

	/// Buttons currently held down.
	fn read_buttons(&self) -> LcdButtons;

	fn set_text(&mut self, line: u8, text: &str) {
		self.print(line, format_args!("{text}"));
	}
}

/// Both analog sticks from a single controller reading, each axis in
/// `-127..=127`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sticks {
	pub left_x: i32,
	pub left_y: i32,
	pub right_x: i32,
	pub right_y: i32,
}

/// Operator controller.
pub trait Gamepad {
	/// Read every axis at once so one control cycle sees one sample.
	fn sample(&mut self) -> Sticks;
}

/// A set of motors driven by one signed command in `-127..=127`.
pub trait Motors {
	fn move_command(&mut self, command: i32);
}

/// Raw byte stream. The device is released when it is dropped.
pub trait SerialDevice {
	type Error: fmt::Debug + fmt::Display;

	fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error>;

	/// Read whatever is available into `buf`, returning the number of bytes
	/// read. `Ok(0)` means nothing was available.
	fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Monotonic clock plus a way to yield until later.
pub trait Timer {
	/// Time since an arbitrary fixed origin.
	fn now(&self) -> Duration;

	fn sleep(&mut self, duration: Duration) -> impl Future<Output = ()>;
}
