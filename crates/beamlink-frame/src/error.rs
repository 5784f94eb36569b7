/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The received checksum disagrees with the recomputed one.
    /// The offending frame has already been consumed from the stream.
    #[error("checksum mismatch (expected {expected:#04x}, received {received:#04x})")]
    ChecksumMismatch { expected: u8, received: u8 },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,

    /// No complete frame arrived before the caller's deadline.
    #[error("no complete frame before deadline")]
    DeadlineExceeded,
}

pub type Result<T> = std::result::Result<T, FrameError>;
