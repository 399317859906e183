//! `log` backend for the brain, where no std writer is available.
//!
//! Formatting lives here, output is whatever the `sink` function does with a
//! finished record.

use core::fmt;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub type Sink = fn(&Record<'_>);

pub struct LineLogger {
	level: LevelFilter,
	sink: Sink,
}

impl LineLogger {
	pub const fn new(level: LevelFilter, sink: Sink) -> Self {
		Self { level, sink }
	}

	/// Install as the global logger. Only the first call in a program succeeds.
	pub fn install(&'static self) -> Result<(), SetLoggerError> {
		log::set_logger(self)?;
		log::set_max_level(self.level);
		Ok(())
	}
}

impl Log for LineLogger {
	fn enabled(&self, metadata: &Metadata<'_>) -> bool {
		metadata.level() <= self.level
	}

	fn log(&self, record: &Record<'_>) {
		if self.enabled(record.metadata()) {
			(self.sink)(record);
		}
	}

	fn flush(&self) {}
}

/// A record rendered as one `[LEVEL] message` line.
pub struct Line<'a, 'r>(pub &'a Record<'r>);

impl fmt::Display for Line<'_, '_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.0.level(), self.0.args())
	}
}
