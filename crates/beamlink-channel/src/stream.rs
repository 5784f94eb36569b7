use std::io::{Read, Write};
use std::time::Duration;

use crate::error::Result;

/// An open sensor byte channel — implements Read + Write.
///
/// This is the fundamental I/O type returned by channel operations.
/// It currently wraps a serial port; the inner enum leaves room for other
/// byte transports (e.g. a SITL socket) without changing callers.
pub struct LinkStream {
    inner: LinkStreamInner,
}

enum LinkStreamInner {
    Serial(Box<dyn serialport::SerialPort>),
}

impl Read for LinkStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            LinkStreamInner::Serial(port) => port.read(buf),
        }
    }
}

impl Write for LinkStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            LinkStreamInner::Serial(port) => port.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            LinkStreamInner::Serial(port) => port.flush(),
        }
    }
}

impl LinkStream {
    /// Create a LinkStream from an open serial port.
    pub(crate) fn from_serial(port: Box<dyn serialport::SerialPort>) -> Self {
        Self {
            inner: LinkStreamInner::Serial(port),
        }
    }

    /// Set the read timeout on the underlying port.
    ///
    /// Serial ports carry a single finite timeout covering reads and writes;
    /// `None` leaves the currently configured timeout in place.
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        match &mut self.inner {
            LinkStreamInner::Serial(port) => match timeout {
                Some(timeout) => port.set_timeout(timeout).map_err(Into::into),
                None => Ok(()),
            },
        }
    }

    /// Set the write timeout on the underlying port.
    ///
    /// See [`LinkStream::set_read_timeout`] for the serial timeout semantics.
    pub fn set_write_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.set_read_timeout(timeout)
    }

    /// Try to clone this stream (creates a new handle to the same port).
    pub fn try_clone(&self) -> Result<Self> {
        match &self.inner {
            LinkStreamInner::Serial(port) => {
                let cloned = port.try_clone()?;
                Ok(Self::from_serial(cloned))
            }
        }
    }

    /// Number of bytes waiting in the receive buffer.
    pub fn bytes_waiting(&self) -> Result<u32> {
        match &self.inner {
            LinkStreamInner::Serial(port) => port.bytes_to_read().map_err(Into::into),
        }
    }

    /// The port name, if the backend exposes one.
    pub fn name(&self) -> Option<String> {
        match &self.inner {
            LinkStreamInner::Serial(port) => port.name(),
        }
    }
}

impl std::fmt::Debug for LinkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            LinkStreamInner::Serial(port) => f
                .debug_struct("LinkStream")
                .field("type", &"serial")
                .field("port", &port.name())
                .finish(),
        }
    }
}
