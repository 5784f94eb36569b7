//! Serial byte-channel abstraction for the beamlink sensor link.
//!
//! This is the lowest layer of beamlink. Everything else builds on top of
//! the [`LinkStream`] type provided here.

pub mod error;
pub mod serial;
pub mod stream;

pub use error::{ChannelError, Result};
pub use serial::{available_ports, open, DEFAULT_BAUD_RATE, DEFAULT_IO_TIMEOUT};
pub use stream::LinkStream;

pub use serialport::{SerialPortInfo, SerialPortType};
