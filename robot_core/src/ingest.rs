//! Background task that surfaces a raw serial stream as log lines.

use core::fmt::{self, Write};

use crate::{
	config::{SerialConfig, SERIAL_BUFFER_SIZE},
	hal::{SerialDevice, Timer},
	schedule::Periodic,
};

#[derive(thiserror::Error, Debug)]
pub enum Error<E> {
	#[error("failed to open serial device: {0}")]
	Open(E),
	#[error("failed to set serial baud rate: {0}")]
	BaudRate(E),
	#[error("failed to read from serial device: {0}")]
	Read(E),
}

/// Bytes received in one read. Displayed as text with invalid UTF-8 replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Text<'a>(&'a [u8]);

impl<'a> Text<'a> {
	pub fn as_bytes(&self) -> &'a [u8] {
		self.0
	}
}

impl fmt::Display for Text<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for chunk in self.0.utf8_chunks() {
			f.write_str(chunk.valid())?;
			if !chunk.invalid().is_empty() {
				f.write_char(char::REPLACEMENT_CHARACTER)?;
			}
		}
		Ok(())
	}
}

/// Outcome of a single successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
	Received(Text<'a>),
	Idle,
}

/// Why the ingestion task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
	OpenFailed,
	ReadFailed,
}

/// An open serial device and the buffer it is read into.
///
/// Owns the device, so dropping the pipe releases it no matter which path the
/// task leaves by.
pub struct SerialPipe<D> {
	device: D,
	buffer: [u8; SERIAL_BUFFER_SIZE],
}

impl<D: SerialDevice> SerialPipe<D> {
	/// Open the device through `open` and apply the configured baud rate.
	pub fn open<F>(config: &SerialConfig, open: F) -> Result<Self, Error<D::Error>>
	where
		F: FnOnce(&SerialConfig) -> Result<D, D::Error>,
	{
		let mut device = open(config).map_err(Error::Open)?;
		device
			.set_baud_rate(config.baud_rate)
			.map_err(Error::BaudRate)?;

		Ok(Self {
			device,
			buffer: [0; SERIAL_BUFFER_SIZE],
		})
	}

	/// Read once. The received bytes are always followed by a zero byte in the
	/// buffer.
	pub fn poll(&mut self) -> Result<Step<'_>, Error<D::Error>> {
		self.buffer.fill(0);

		// last byte is reserved for the terminator
		let limit = self.buffer.len() - 1;
		let read = self
			.device
			.read(&mut self.buffer[..limit])
			.map_err(Error::Read)?;
		if read == 0 {
			return Ok(Step::Idle);
		}

		let read = read.min(limit);
		self.buffer[read] = 0;
		Ok(Step::Received(Text(&self.buffer[..read])))
	}

	#[cfg(test)]
	pub(crate) fn buffer(&self) -> &[u8] {
		&self.buffer
	}

	/// Poll until a read fails, logging everything received.
	pub async fn run<T: Timer>(mut self, periodic: &mut Periodic<T>) -> Exit {
		loop {
			match self.poll() {
				Ok(Step::Received(text)) => log::info!("received: {text}"),
				Ok(Step::Idle) => {}
				Err(err) => {
					log::error!("{err}");
					return Exit::ReadFailed;
				}
			}
			periodic.tick().await;
		}
	}
}

/// The whole ingestion task: open, configure, then poll every period.
///
/// Failures end the task only, nothing is retried.
pub async fn serial_task<D, F, T>(
	config: &SerialConfig,
	open: F,
	periodic: &mut Periodic<T>,
) -> Exit
where
	D: SerialDevice,
	F: FnOnce(&SerialConfig) -> Result<D, D::Error>,
	T: Timer,
{
	let pipe = match SerialPipe::open(config, open) {
		Ok(pipe) => pipe,
		Err(err) => {
			log::error!("{err}");
			return Exit::OpenFailed;
		}
	};
	log::debug!("serial pipe open at {} baud", config.baud_rate);

	pipe.run(periodic).await
}
