use std::time::Duration;

use beamlink_frame::{Command, Status};

/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Channel-level error (port cannot be opened, I/O failure).
    #[error("channel error: {0}")]
    Channel(#[from] beamlink_channel::ChannelError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] beamlink_frame::FrameError),

    /// A device hook failed.
    #[error("device error: {0}")]
    Device(#[from] crate::device::DeviceError),

    /// The session has not completed `init`.
    #[error("session not initialized")]
    NotInitialized,

    /// Requested update frequency is outside 1-100 Hz.
    #[error("frequency {0} Hz out of range (1-100)")]
    InvalidFrequency(u8),

    /// The sensor acknowledged a request with a non-success status.
    #[error("sensor rejected {} with status {}", command.name(), status.name())]
    Rejected { command: Command, status: Status },

    /// No response arrived within the configured window.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// A response frame did not match the expected command or payload size.
    #[error("unexpected response (command {command:#04x}, {len} byte payload)")]
    UnexpectedResponse { command: u8, len: usize },

    /// Echo payload must be 1-32 bytes.
    #[error("echo payload must be 1-32 bytes, got {0}")]
    EchoSize(usize),

    /// The echoed bytes did not match the request.
    #[error("echo response did not match request data")]
    EchoMismatch,
}

pub type Result<T> = std::result::Result<T, SessionError>;
