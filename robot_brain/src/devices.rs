use alloc::vec::Vec;
use core::{future::Future, time::Duration};

use robot_core::{Gamepad, Motors, PortSpec, Sticks, Timer};
use vexide::prelude::*;

/// Highest voltage a V5 motor accepts.
const MAX_VOLTAGE: f64 = 12.0;
/// Full scale of a PROS style motor command.
const COMMAND_SCALE: f64 = 127.0;

/// Motors on several ports driven by one command, like PROS `MotorGroup`.
pub struct MotorGroup {
	motors: Vec<(u8, Motor)>,
}

impl MotorGroup {
	pub fn new(ports: &[PortSpec]) -> Self {
		let motors = ports
			.iter()
			.filter(|spec| {
				let valid = spec.is_valid();
				if !valid {
					log::warn!("ignoring invalid motor port {}", spec.number);
				}
				valid
			})
			.map(|spec| {
				let direction = if spec.reversed {
					Direction::Reverse
				} else {
					Direction::Forward
				};
				// SAFETY: every port is claimed by exactly one group for as long
				// as the driver loop runs
				let port = unsafe { SmartPort::new(spec.number) };
				(spec.number, Motor::new(port, Gearset::Green, direction))
			})
			.collect();

		Self { motors }
	}
}

impl Motors for MotorGroup {
	fn move_command(&mut self, command: i32) {
		let volts = command as f64 / COMMAND_SCALE * MAX_VOLTAGE;
		for (port, motor) in &mut self.motors {
			if let Err(err) = motor.set_voltage(volts) {
				log::warn!("motor on port {port}: {err:?}");
			}
		}
	}
}

fn scale_axis(value: f64) -> i32 {
	let scaled = value * COMMAND_SCALE;
	if scaled < 0.0 {
		(scaled - 0.5) as i32
	} else {
		(scaled + 0.5) as i32
	}
}

/// Primary controller with its sticks scaled back to `-127..=127`.
pub struct MasterController<'a>(pub &'a Controller);

impl Gamepad for MasterController<'_> {
	fn sample(&mut self) -> Sticks {
		// a disconnected controller reads as centred sticks
		let Ok(state) = self.0.state() else {
			return Sticks::default();
		};

		Sticks {
			left_x: scale_axis(state.left_stick.x()),
			left_y: scale_axis(state.left_stick.y()),
			right_x: scale_axis(state.right_stick.x()),
			right_y: scale_axis(state.right_stick.y()),
		}
	}
}

/// Brain uptime clock backed by the vexide executor's sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct Uptime;

impl Timer for Uptime {
	fn now(&self) -> Duration {
		Duration::from_micros(unsafe { vex_sdk::vexSystemHighResTimeGet() })
	}

	fn sleep(&mut self, duration: Duration) -> impl Future<Output = ()> {
		sleep(duration)
	}
}
