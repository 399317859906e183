#![cfg_attr(not(test), no_std)]
//! Hardware-independent half of the robot program.
//!
//! Everything here is generic over the small set of traits in [`hal`] so the
//! drive and serial loops can run on the brain and under host tests alike.

extern crate alloc;

pub mod buttons;
pub mod config;
pub mod drive;
pub mod hal;
pub mod ingest;
pub mod logger;
pub mod schedule;
pub mod toggle;

pub use buttons::{Area, ButtonBank, Touch};
pub use config::{DriveConfig, PortSpec, SerialConfig};
pub use drive::{arcade, ArcadeDrive, ArcadeMix};
pub use hal::{Gamepad, Lcd, LcdButtons, Motors, SerialDevice, Sticks, Timer};
pub use ingest::{serial_task, Exit, SerialPipe, Step};
pub use logger::LineLogger;
pub use schedule::Periodic;
pub use toggle::CenterToggle;
