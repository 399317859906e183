use super::*;

use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use serialport::{SerialPortInfo, SerialPortType, UsbPortInfo};

/// Records every write call separately.
#[derive(Default)]
struct Recorder {
    writes: Vec<Vec<u8>>,
    flushes: usize,
}

impl io::Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

struct Unplugged;

impl io::Write for Unplugged {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn usb_port(vid: u16, pid: u16, interface: Option<u8>) -> SerialPortInfo {
    SerialPortInfo {
        port_name: String::from("/dev/ttyACM1"),
        port_type: SerialPortType::UsbPort(UsbPortInfo {
            vid,
            pid,
            serial_number: None,
            manufacturer: Some(String::from("VEX Robotics, Inc")),
            product: Some(String::from("VEX V5 Brain")),
            interface,
        }),
    }
}

#[test]
fn user_port_detection() {
    assert!(is_user_port(&usb_port(V5_USB_VID, V5_BRAIN_USB_PID, Some(2))));

    // system port of the same brain
    assert!(!is_user_port(&usb_port(V5_USB_VID, V5_BRAIN_USB_PID, Some(0))));
    assert!(!is_user_port(&usb_port(V5_USB_VID, 0x0503, Some(2))));
    assert!(!is_user_port(&usb_port(0x1234, V5_BRAIN_USB_PID, Some(2))));

    let pci = SerialPortInfo {
        port_name: String::from("/dev/ttyS0"),
        port_type: SerialPortType::PciPort,
    };
    assert!(!is_user_port(&pci));
}

#[test]
fn short_sends_are_one_write() {
    let mut pipe = BrainPipe::new(Recorder::default(), Duration::ZERO);
    pipe.send(b"forward 100").unwrap();
    pipe.send(b"turn 30").unwrap();

    let recorder = pipe.into_inner();
    assert_eq!(
        recorder.writes,
        vec![b"forward 100".to_vec(), b"turn 30".to_vec()]
    );
    assert_eq!(recorder.flushes, 2);
}

#[test]
fn long_sends_are_chunked() {
    let data: Vec<u8> = (0..600).map(|i| b'a' + (i % 26) as u8).collect();
    let mut pipe = BrainPipe::new(Recorder::default(), Duration::ZERO);
    pipe.send(&data).unwrap();

    let recorder = pipe.into_inner();
    let sizes: Vec<_> = recorder.writes.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![255, 255, 90]);
    assert!(sizes.iter().all(|&n| n <= MAX_CHUNK));
    assert_eq!(recorder.writes.concat(), data);
}

#[test]
fn empty_send_writes_nothing() {
    let mut pipe = BrainPipe::new(Recorder::default(), Duration::ZERO);
    pipe.send(b"").unwrap();
    assert!(pipe.into_inner().writes.is_empty());
}

#[test]
fn chunks_are_paced() {
    let pace = Duration::from_millis(10);
    let mut pipe = BrainPipe::new(Recorder::default(), pace);

    let start = std::time::Instant::now();
    pipe.send(&[b'x'; MAX_CHUNK * 3]).unwrap();

    // the first chunk goes straight out, the other two wait a period each
    assert!(start.elapsed() >= pace * 2);
    assert_eq!(pipe.into_inner().writes.len(), 3);
}

#[test]
fn write_errors_propagate() {
    let mut pipe = BrainPipe::new(Unplugged, Duration::ZERO);
    let err = pipe.send(b"data").unwrap_err();
    assert!(matches!(err, Error::SerialWriteError(_)));
}

/// Shared buffer the formatting subscriber writes into.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn log_both_levels(verbose: bool) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = logging(verbose, move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!("wrote chunk of 3 bytes");
        tracing::info!("brain found");
    });
    captured.text()
}

#[test]
fn quiet_logging_hides_debug() {
    let text = log_both_levels(false);
    assert!(text.contains("INFO"));
    assert!(text.contains("brain found"));
    assert!(!text.contains("wrote chunk"));
}

#[test]
fn verbose_logging_shows_debug() {
    let text = log_both_levels(true);
    assert!(text.contains("DEBUG"));
    assert!(text.contains("wrote chunk of 3 bytes"));
    assert!(text.contains("brain found"));
}
