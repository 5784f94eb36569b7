use std::io::{Read, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use beamlink_channel::LinkStream;
use beamlink_frame::{
    Command, Frame, FrameError, FrameReader, FrameWriter, Status, DIRECTION_FROM_SENSOR,
};

use crate::config::{validate_frequency, SessionConfig};
use crate::device::SensorDevice;
use crate::error::{Result, SessionError};
use crate::message::{
    ConfigReport, EchoReport, EchoRequest, FixReport, SetConfigAck, CONFIG_REPORT_LEN,
    ECHO_REPORT_LEN, FIX_REPORT_LEN, SET_CONFIG_ACK_LEN,
};
use crate::state::{Coordinates, LinkState};

/// A request/response session with a beam-spotter sensor.
///
/// Owns both halves of the link, the device hooks, and the last-known link
/// state. All exchanges are strictly request-then-response; the session never
/// has more than one request in flight.
pub struct Session<C> {
    reader: FrameReader<C>,
    writer: FrameWriter<C>,
    device: Box<dyn SensorDevice>,
    config: SessionConfig,
    state: LinkState,
}

impl Session<LinkStream> {
    /// Open a serial link and bring the session up.
    ///
    /// Validates the configuration, opens the port, runs the device's
    /// bring-up hook, and pushes the configured update frequency to the
    /// sensor. Any failure surfaces as `Err`; retry policy belongs to the
    /// caller.
    pub fn open(
        port: &str,
        baud: u32,
        device: Box<dyn SensorDevice>,
        config: SessionConfig,
    ) -> Result<Self> {
        config.validate()?;
        let stream = beamlink_channel::serial::open(port, baud)?;
        let write_half = stream.try_clone()?;
        let mut session = Self::from_parts(stream, write_half, device, config);
        session.init()?;
        Ok(session)
    }
}

impl<C: Read + Write> Session<C> {
    /// Build a session over pre-opened read and write halves.
    ///
    /// Does not run `init`; useful for tests and non-serial transports.
    pub fn from_parts(
        read_half: C,
        write_half: C,
        device: Box<dyn SensorDevice>,
        config: SessionConfig,
    ) -> Self {
        Self {
            reader: FrameReader::new(read_half),
            writer: FrameWriter::new(write_half),
            device,
            config,
            state: LinkState::new(),
        }
    }

    /// Bring the link up: device bring-up, then the configuration exchange.
    pub fn init(&mut self) -> Result<()> {
        self.config.validate()?;
        self.device.initialize()?;
        self.set_frequency(self.config.frequency_hz)?;
        self.state.initialized = true;
        info!(
            model = self.device.model(),
            frequency_hz = self.config.frequency_hz,
            "session initialized"
        );
        Ok(())
    }

    /// Push a new update frequency to the sensor and await its ack.
    pub fn set_frequency(&mut self, frequency_hz: u8) -> Result<()> {
        validate_frequency(frequency_hz)?;
        self.writer.send(Command::SetConfig, &[frequency_hz])?;

        let frame = self.read_exchange_response(Command::SetConfig, SET_CONFIG_ACK_LEN)?;
        let ack = SetConfigAck::decode(frame.payload.as_ref()).ok_or(
            SessionError::UnexpectedResponse {
                command: frame.command,
                len: frame.payload.len(),
            },
        )?;
        if !ack.status.is_success() {
            warn!(frequency_hz, status = ack.status.name(), "set-config rejected");
            return Err(SessionError::Rejected {
                command: Command::SetConfig,
                status: ack.status,
            });
        }

        self.config.frequency_hz = frequency_hz;
        debug!(frequency_hz, "sensor accepted update frequency");
        Ok(())
    }

    /// Request a fix report and fold it into the link state.
    ///
    /// Returns `Ok(Some(coords))` when the sensor reports a fix,
    /// `Ok(None)` when it has none or the exchange produced nothing usable
    /// this round (timeout, corruption, malformed report). A lost round is
    /// not an error; health decays through the recency window instead.
    pub fn request_fix(&mut self) -> Result<Option<Coordinates>> {
        if !self.state.initialized {
            return Err(SessionError::NotInitialized);
        }

        self.writer.send(Command::GetFix, &[])?;

        let deadline = Instant::now() + self.config.response_timeout;
        let frame = loop {
            match self.reader.read_frame_deadline(deadline) {
                Ok(frame) if frame.direction != DIRECTION_FROM_SENSOR => {
                    debug!(direction = frame.direction, "discarding non-response frame");
                    continue;
                }
                Ok(frame) => break frame,
                Err(FrameError::DeadlineExceeded) => {
                    debug!("no fix response within deadline");
                    return Ok(None);
                }
                Err(FrameError::ChecksumMismatch { expected, received }) => {
                    debug!(expected, received, "discarding corrupt frame");
                    continue;
                }
                Err(FrameError::PayloadTooLarge { size, .. }) => {
                    debug!(size, "discarding frame with oversized length");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        };

        if frame.command != Command::GetFix.id() {
            debug!(command = frame.command, "discarding unexpected response");
            return Ok(None);
        }
        let Some(report) = FixReport::decode(frame.payload.as_ref()) else {
            debug!(len = frame.payload.len(), "discarding malformed fix report");
            return Ok(None);
        };

        self.state.record_fix(&report, Instant::now());
        self.device.read()?;

        if report.status.is_success() && report.has_fix {
            Ok(Some(self.state.coordinates))
        } else {
            Ok(None)
        }
    }

    /// One scheduler tick: device maintenance, then a fix exchange.
    pub fn tick(&mut self) -> Result<()> {
        self.device.update()?;
        self.request_fix().map(|_| ())
    }

    /// Ask the sensor for its active configuration.
    pub fn request_config(&mut self) -> Result<ConfigReport> {
        self.writer.send(Command::GetConfig, &[])?;
        let frame = self.read_exchange_response(Command::GetConfig, CONFIG_REPORT_LEN)?;
        let report = ConfigReport::decode(frame.payload.as_ref()).ok_or(
            SessionError::UnexpectedResponse {
                command: frame.command,
                len: frame.payload.len(),
            },
        )?;
        if !report.status.is_success() {
            return Err(SessionError::Rejected {
                command: Command::GetConfig,
                status: report.status,
            });
        }
        Ok(report)
    }

    /// Round-trip arbitrary bytes through the sensor's echo command.
    pub fn echo_test(&mut self, data: &[u8]) -> Result<()> {
        let request = EchoRequest::new(data).ok_or(SessionError::EchoSize(data.len()))?;
        self.writer.send(Command::EchoTest, &request.encode())?;

        let frame = self.read_exchange_response(Command::EchoTest, ECHO_REPORT_LEN)?;
        let report = EchoReport::decode(frame.payload.as_ref()).ok_or(
            SessionError::UnexpectedResponse {
                command: frame.command,
                len: frame.payload.len(),
            },
        )?;
        if !report.status.is_success() {
            return Err(SessionError::Rejected {
                command: Command::EchoTest,
                status: report.status,
            });
        }
        if report.data() != request.data() {
            return Err(SessionError::EchoMismatch);
        }
        Ok(())
    }

    /// Await the response to an in-flight request.
    ///
    /// Corrupt or mis-framed traffic is discarded and the read continues
    /// under the same deadline; a frame with the wrong command or payload
    /// size is a hard protocol error for command exchanges.
    fn read_exchange_response(&mut self, expect: Command, expect_len: usize) -> Result<Frame> {
        let deadline = Instant::now() + self.config.response_timeout;
        loop {
            let frame = match self.reader.read_frame_deadline(deadline) {
                Ok(frame) => frame,
                Err(FrameError::DeadlineExceeded) => {
                    return Err(SessionError::Timeout(self.config.response_timeout));
                }
                Err(FrameError::ChecksumMismatch { expected, received }) => {
                    debug!(expected, received, "discarding corrupt frame");
                    continue;
                }
                Err(FrameError::PayloadTooLarge { size, .. }) => {
                    debug!(size, "discarding frame with oversized length");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            if frame.direction != DIRECTION_FROM_SENSOR {
                debug!(direction = frame.direction, "discarding non-response frame");
                continue;
            }
            if frame.command != expect.id() || frame.payload.len() != expect_len {
                return Err(SessionError::UnexpectedResponse {
                    command: frame.command,
                    len: frame.payload.len(),
                });
            }
            return Ok(frame);
        }
    }

    /// Whether `init` has completed on this session.
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Link health derived from the last response status and its recency.
    pub fn is_healthy(&self) -> bool {
        self.state
            .is_healthy(Instant::now(), self.config.health_window)
    }

    /// Whether the sensor reported a fix in the most recent report.
    pub fn has_fix(&self) -> bool {
        self.state.has_fix
    }

    /// Last reported beam coordinates (zeroes before any report).
    pub fn coordinates(&self) -> Coordinates {
        self.state.coordinates
    }

    /// Status of the most recent fix report, if any arrived.
    pub fn last_status(&self) -> Option<Status> {
        self.state.last_status
    }

    /// The update frequency last accepted by the sensor.
    pub fn frequency_hz(&self) -> u8 {
        self.config.frequency_hz
    }

    /// The active session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The model name of the attached device.
    pub fn model(&self) -> &'static str {
        self.device.model()
    }
}

impl<C> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("model", &self.device.model())
            .field("initialized", &self.state.initialized)
            .field("has_fix", &self.state.has_fix)
            .field("frequency_hz", &self.config.frequency_hz)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Trieye;

    #[test]
    fn uninitialized_session_rejects_fix_requests() {
        let session = Session::from_parts(
            std::io::Cursor::new(Vec::new()),
            std::io::Cursor::new(Vec::new()),
            Box::new(Trieye),
            SessionConfig::default(),
        );
        let mut session = session;
        assert!(matches!(
            session.request_fix(),
            Err(SessionError::NotInitialized)
        ));
    }

    #[test]
    fn set_frequency_validates_before_sending() {
        let mut session = Session::from_parts(
            std::io::Cursor::new(Vec::new()),
            std::io::Cursor::new(Vec::new()),
            Box::new(Trieye),
            SessionConfig::default(),
        );
        assert!(matches!(
            session.set_frequency(0),
            Err(SessionError::InvalidFrequency(0))
        ));
        assert!(matches!(
            session.set_frequency(101),
            Err(SessionError::InvalidFrequency(101))
        ));
    }

    #[test]
    fn echo_size_checked_before_sending() {
        let mut session = Session::from_parts(
            std::io::Cursor::new(Vec::new()),
            std::io::Cursor::new(Vec::new()),
            Box::new(Trieye),
            SessionConfig::default(),
        );
        assert!(matches!(
            session.echo_test(&[]),
            Err(SessionError::EchoSize(0))
        ));
        assert!(matches!(
            session.echo_test(&[0u8; 33]),
            Err(SessionError::EchoSize(33))
        ));
    }
}
