use std::io::{ErrorKind, Read};
use std::time::Instant;

use bytes::BytesMut;

use crate::codec::{decode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 512;
const READ_CHUNK_SIZE: usize = 256;

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads and preamble resynchronization internally — callers
/// always get complete, checksum-verified frames.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read the next complete frame, giving up at `deadline`.
    ///
    /// `WouldBlock`/`TimedOut` reads (and zero-length serial reads) are
    /// treated as polls of the underlying channel timeout; the deadline
    /// bounds the whole frame, not any single read.
    pub fn read_frame_deadline(&mut self, deadline: Instant) -> Result<Frame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                return Ok(frame);
            }

            if Instant::now() >= deadline {
                return Err(FrameError::DeadlineExceeded);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err)
                    if err.kind() == ErrorKind::WouldBlock
                        || err.kind() == ErrorKind::TimedOut =>
                {
                    continue;
                }
                Err(err) => return Err(FrameError::Io(err)),
            };

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use bytes::BytesMut;

    use super::*;
    use crate::codec::{encode_frame, MAX_PAYLOAD, PREAMBLE};
    use crate::command::Command;

    fn wire(command: Command, payload: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_frame(command, payload, &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn read_single_frame() {
        let mut reader = FrameReader::new(Cursor::new(wire(Command::GetFix, &[])));
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.command, Command::GetFix.id());
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn read_multiple_frames() {
        let mut bytes = wire(Command::SetConfig, &[10]);
        bytes.extend_from_slice(&wire(Command::GetFix, &[]));

        let mut reader = FrameReader::new(Cursor::new(bytes));

        let f1 = reader.read_frame().unwrap();
        let f2 = reader.read_frame().unwrap();

        assert_eq!(f1.command, Command::SetConfig.id());
        assert_eq!(f1.payload.as_ref(), [10]);
        assert_eq!(f2.command, Command::GetFix.id());
    }

    #[test]
    fn garbage_before_frame_is_ignored() {
        let mut bytes = vec![0xDEu8, 0xAD, b'$', 0x00];
        bytes.extend_from_slice(&wire(Command::GetFix, &[]));

        let mut reader = FrameReader::new(Cursor::new(bytes));
        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.command, Command::GetFix.id());
    }

    #[test]
    fn partial_read_handling() {
        let byte_reader = ByteByByteReader {
            bytes: wire(Command::EchoTest, b"slow"),
            pos: 0,
        };
        let mut reader = FrameReader::new(byte_reader);

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.command, Command::EchoTest.id());
        assert_eq!(frame.payload.as_ref(), b"slow");
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_frame() {
        let mut partial = wire(Command::EchoTest, b"truncated");
        partial.truncate(partial.len() - 3);

        let mut reader = FrameReader::new(Cursor::new(partial));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn checksum_error_propagates() {
        let mut bytes = wire(Command::GetFix, &[]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let mut reader = FrameReader::new(Cursor::new(bytes));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ChecksumMismatch { .. }));
    }

    #[test]
    fn oversized_frame_in_stream() {
        let bytes = vec![PREAMBLE[0], PREAMBLE[1], b'<', 0xFF, 197];
        let mut reader = FrameReader::new(Cursor::new(bytes));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
    }

    #[test]
    fn deadline_exceeded_when_no_data_arrives() {
        let mut reader = FrameReader::new(AlwaysWouldBlock);
        let deadline = Instant::now() + Duration::from_millis(20);
        let err = reader.read_frame_deadline(deadline).unwrap_err();
        assert!(matches!(err, FrameError::DeadlineExceeded));
        assert!(Instant::now() >= deadline);
    }

    #[test]
    fn deadline_read_returns_frame_already_buffered() {
        let mut reader = FrameReader::new(Cursor::new(wire(Command::GetFix, &[])));
        // Expired deadline: the frame is still returned because decode is
        // attempted before the deadline check.
        let frame = reader
            .read_frame_deadline(Instant::now() - Duration::from_millis(1))
            .unwrap();
        assert_eq!(frame.command, Command::GetFix.id());
    }

    #[test]
    fn deadline_read_survives_timed_out_polls() {
        let reader = TimeoutsThenData {
            polls_left: 3,
            bytes: wire(Command::GetFix, &[]),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        let frame = framed
            .read_frame_deadline(Instant::now() + Duration::from_secs(1))
            .unwrap();
        assert_eq!(frame.command, Command::GetFix.id());
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            interrupted: false,
            bytes: wire(Command::GetFix, &[]),
            pos: 0,
        };
        let mut framed = FrameReader::new(reader);
        let frame = framed.read_frame().unwrap();
        assert_eq!(frame.command, Command::GetFix.id());
    }

    #[test]
    fn read_would_block_propagates_in_blocking_mode() {
        let mut framed = FrameReader::new(AlwaysWouldBlock);
        let err = framed.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = FrameReader::new(cursor);

        assert_eq!(reader.config().max_payload_size, MAX_PAYLOAD);
        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    #[cfg(unix)]
    #[test]
    fn roundtrip_over_pipe() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = crate::writer::FrameWriter::new(left);
        let mut reader = FrameReader::new(right);

        writer.send(Command::SetConfig, &[25]).unwrap();
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.command, Command::SetConfig.id());
        assert_eq!(frame.payload.as_ref(), [25]);
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct AlwaysWouldBlock;

    impl Read for AlwaysWouldBlock {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::WouldBlock))
        }
    }

    struct TimeoutsThenData {
        polls_left: u8,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for TimeoutsThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.polls_left > 0 {
                self.polls_left -= 1;
                return Err(std::io::Error::from(ErrorKind::TimedOut));
            }
            if self.pos >= self.bytes.len() {
                return Err(std::io::Error::from(ErrorKind::TimedOut));
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
