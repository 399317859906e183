use core::time::Duration;

/// How often both control loops run.
pub const LOOP_PERIOD: Duration = Duration::from_millis(20);

/// Serial read buffer, one byte is always kept for the terminator.
pub const SERIAL_BUFFER_SIZE: usize = 256;

pub const LCD_STATUS_LINE: u8 = 0;
pub const LCD_GREETING_LINE: u8 = 1;
pub const LCD_TOGGLE_LINE: u8 = 2;

pub const GREETING: &str = "Hello PROS User!";

/// A smart port number with its polarity. Written like PROS does, a negative
/// number means the motor on that port is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSpec {
	pub number: u8,
	pub reversed: bool,
}

impl PortSpec {
	pub const fn new(signed: i8) -> Self {
		Self {
			number: signed.unsigned_abs(),
			reversed: signed < 0,
		}
	}

	pub const fn is_valid(&self) -> bool {
		self.number >= 1 && self.number <= 21
	}
}

impl From<i8> for PortSpec {
	fn from(signed: i8) -> Self {
		Self::new(signed)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
	pub baud_rate: u32,
	/// Turn off the runtime's COBS framing so bytes pass through untouched.
	pub disable_cobs: bool,
	pub period: Duration,
}

impl SerialConfig {
	pub const DEFAULT: Self = Self {
		baud_rate: 9600,
		disable_cobs: true,
		period: LOOP_PERIOD,
	};
}

impl Default for SerialConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveConfig {
	pub left_ports: [PortSpec; 3],
	pub right_ports: [PortSpec; 3],
	pub period: Duration,
}

impl DriveConfig {
	pub const DEFAULT: Self = Self {
		left_ports: [PortSpec::new(1), PortSpec::new(-2), PortSpec::new(3)],
		right_ports: [PortSpec::new(-4), PortSpec::new(5), PortSpec::new(-6)],
		period: LOOP_PERIOD,
	};
}

impl Default for DriveConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}
