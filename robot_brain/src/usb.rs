use core::convert::Infallible;

use robot_core::{SerialConfig, SerialDevice};

// see https://github.com/vexide/vex-sdk/blob/main/src/serial.rs
const SERIAL_CHANNEL_STDIO: u32 = 1;

/// The brain's user USB serial channel, the device PROS exposes as "serial".
pub struct UsbSerial {
	_channel: (),
}

impl UsbSerial {
	pub fn open(config: &SerialConfig) -> Result<Self, Infallible> {
		// vexide never wraps stdio in COBS, there is nothing to switch off
		if !config.disable_cobs {
			log::warn!("COBS framing requested but stdio is always raw");
		}
		log::debug!("opened usb serial channel {SERIAL_CHANNEL_STDIO}");
		Ok(Self { _channel: () })
	}
}

impl SerialDevice for UsbSerial {
	type Error = Infallible;

	fn set_baud_rate(&mut self, baud: u32) -> Result<(), Infallible> {
		// USB CDC has no real line rate
		log::debug!("usb serial baud rate {baud} accepted as is");
		Ok(())
	}

	/// The SDK has no read error, -1 from `vexSerialReadChar` only means no data.
	fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
		let mut read = 0;
		for e in buf.iter_mut() {
			let byte = unsafe { vex_sdk::vexSerialReadChar(SERIAL_CHANNEL_STDIO) };

			// -1 once the receive buffer is empty
			let Ok(byte) = u8::try_from(byte) else {
				break;
			};

			*e = byte;
			read += 1;
		}
		Ok(read)
	}
}

impl Drop for UsbSerial {
	fn drop(&mut self) {
		log::debug!("closed usb serial channel {SERIAL_CHANNEL_STDIO}");
	}
}
