use std::time::Duration;

use tracing::info;

use crate::error::{ChannelError, Result};
use crate::stream::LinkStream;

/// Default line rate of the beam-spotter link.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default per-read timeout applied to a freshly opened port.
///
/// Response deadlines are enforced one layer up; this only bounds a single
/// blocking read so the frame reader can poll its deadline.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_millis(20);

/// Open a serial link to the sensor (blocking).
pub fn open(port: &str, baud: u32) -> Result<LinkStream> {
    let inner = serialport::new(port, baud)
        .timeout(DEFAULT_IO_TIMEOUT)
        .open()
        .map_err(|source| ChannelError::Open {
            port: port.to_string(),
            source,
        })?;
    info!(port, baud, "opened serial link");
    Ok(LinkStream::from_serial(inner))
}

/// Enumerate serial ports present on this host.
pub fn available_ports() -> Result<Vec<serialport::SerialPortInfo>> {
    serialport::available_ports().map_err(ChannelError::Enumerate)
}
