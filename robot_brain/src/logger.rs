use log::{LevelFilter, Record, SetLoggerError};
use robot_core::{logger::Line, LineLogger};
use vexide::prelude::*;

static LOGGER: LineLogger = LineLogger::new(LevelFilter::Info, print_record);

fn print_record(record: &Record<'_>) {
	println!("{}", Line(record));
}

/// Send `log` output to the brain's stdout.
pub fn init() -> Result<(), SetLoggerError> {
	LOGGER.install()
}
