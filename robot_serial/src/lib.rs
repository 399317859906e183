pub const V5_BRAIN_USB_PID: u16 = 0x0501;
pub const V5_USB_VID: u16 = 0x2888;

/// Most bytes the brain takes in one read, one byte of its buffer is kept for
/// the terminator.
pub const MAX_CHUNK: usize = robot_core::config::SERIAL_BUFFER_SIZE - 1;

use std::{
    io::Write,
    time::{Duration, Instant},
};

use robot_core::config::LOOP_PERIOD;
use serialport::{SerialPortInfo, SerialPortType, UsbPortInfo};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{
    format::{DefaultFields, Format},
    MakeWriter, SubscriberBuilder,
};

#[cfg(test)]
mod test;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Brain not found")]
    BrainNotFound,
    #[error("Serial Error: {0}")]
    SerialError(#[from] serialport::Error),
    #[error("Serial Writing Error: {0}")]
    SerialWriteError(#[from] std::io::Error),
}

/// Formatting subscriber for the host tools, `debug` when verbose and `info`
/// otherwise. Installing it with `init` also forwards `log` records.
pub fn logging<W>(
    verbose: bool,
    writer: W,
) -> SubscriberBuilder<DefaultFields, Format, LevelFilter, W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
}

/// True for the user program connection of a V5 brain (interface 2).
pub fn is_user_port(info: &SerialPortInfo) -> bool {
    if let SerialPortType::UsbPort(UsbPortInfo {
        vid,
        pid,
        interface,
        ..
    }) = &info.port_type
    {
        *pid == V5_BRAIN_USB_PID && *vid == V5_USB_VID && interface == &Some(2)
    } else {
        false
    }
}

pub fn find_user_port() -> Result<String, Error> {
    serialport::available_ports()?
        .into_iter()
        .find(is_user_port)
        .map(|p| p.port_name)
        .ok_or(Error::BrainNotFound)
}

/// Raw byte pipe into the brain's serial ingestion task.
///
/// Data goes out unframed in chunks of at most [`MAX_CHUNK`] bytes, at most one
/// chunk per ingestion period so the brain never has more waiting than it reads
/// in one go.
pub struct BrainPipe<W = Box<dyn serialport::SerialPort>> {
    port: W,
    pace: Duration,
    last_write: Option<Instant>,
}

impl BrainPipe {
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, Error> {
        let port = serialport::new(path, baud_rate)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .data_bits(serialport::DataBits::Eight)
            .timeout(Duration::from_secs(1))
            .open()?;
        log::info!("opened {path} at {baud_rate} baud");

        Ok(Self::new(port, LOOP_PERIOD))
    }

    /// Find the first connected brain and open its user port.
    pub fn open_brain(baud_rate: u32) -> Result<Self, Error> {
        let path = find_user_port()?;
        Self::open(&path, baud_rate)
    }
}

impl<W: Write> BrainPipe<W> {
    pub fn new(port: W, pace: Duration) -> Self {
        Self {
            port,
            pace,
            last_write: None,
        }
    }

    pub fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for chunk in bytes.chunks(MAX_CHUNK) {
            if let Some(last) = self.last_write {
                let elapsed = last.elapsed();
                if elapsed < self.pace {
                    std::thread::sleep(self.pace - elapsed);
                }
            }

            self.port.write_all(chunk)?;
            self.port.flush()?;
            self.last_write = Some(Instant::now());
            log::debug!("sent {} bytes", chunk.len());
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.port
    }
}
