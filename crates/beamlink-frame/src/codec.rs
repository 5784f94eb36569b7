use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::command::Command;
use crate::error::{FrameError, Result};

/// Preamble bytes: "$M" (0x24 0x4D).
pub const PREAMBLE: [u8; 2] = [b'$', b'M'];

/// Direction marker for frames sent to the sensor.
pub const DIRECTION_TO_SENSOR: u8 = b'>';

/// Direction marker for frames received from the sensor.
pub const DIRECTION_FROM_SENSOR: u8 = b'<';

/// Frame header: preamble (2) + direction (1) + length (1) + command (1).
pub const HEADER_SIZE: usize = 5;

/// Trailing checksum byte.
pub const CHECKSUM_SIZE: usize = 1;

/// Largest payload any defined command carries.
pub const MAX_PAYLOAD: usize = 128;

/// A framed protocol message.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Direction marker as received on the wire.
    pub direction: u8,
    /// Raw command id. Callers match this against [`Command`] ids; an
    /// unknown id is the caller's discard decision, not a decode failure.
    pub command: u8,
    /// The message payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame.
    pub fn new(direction: u8, command: Command, payload: impl Into<Bytes>) -> Self {
        Self {
            direction,
            command: command.id(),
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload + checksum).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len() + CHECKSUM_SIZE
    }
}

/// XOR checksum over the length byte, command byte, and every payload byte.
///
/// A parity-style integrity check: it detects transmission corruption, not
/// tampering.
pub fn checksum(length: u8, command: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ command, |acc, &byte| acc ^ byte)
}

/// Encode a to-sensor frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────┬───────────┬────────┬─────────┬──────────────┬──────────┐
/// │ Preamble  │ Direction │ Length │ Command │ Payload      │ Checksum │
/// │ "$M" (2B) │ '>' (1B)  │ (1B)   │ (1B)    │ Length bytes │ (1B XOR) │
/// └───────────┴───────────┴────────┴─────────┴──────────────┴──────────┘
/// ```
pub fn encode_frame(command: Command, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len() + CHECKSUM_SIZE);
    dst.put_slice(&PREAMBLE);
    dst.put_u8(DIRECTION_TO_SENSOR);
    dst.put_u8(payload.len() as u8);
    dst.put_u8(command.id());
    dst.put_slice(payload);
    dst.put_u8(checksum(payload.len() as u8, command.id(), payload));
    Ok(())
}

/// Decode a frame from a buffer, resynchronizing on the preamble.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes (and any garbage prefix) from the
/// buffer. A frame with a bad checksum is consumed in its entirety and
/// reported as [`FrameError::ChecksumMismatch`]; no partial frame is ever
/// surfaced.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    // Resynchronize: drop bytes until a full preamble heads the buffer.
    loop {
        let Some(pos) = src.iter().position(|&byte| byte == PREAMBLE[0]) else {
            src.clear();
            return Ok(None); // Need more data
        };
        if pos > 0 {
            trace!(dropped = pos, "skipping bytes before preamble");
            src.advance(pos);
        }
        if src.len() < PREAMBLE.len() {
            return Ok(None);
        }
        if src[1] == PREAMBLE[1] {
            break;
        }
        // Restart the scan from the mismatched byte itself, so a preamble
        // start sitting there is never lost.
        src.advance(1);
    }

    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let direction = src[2];
    let length = src[3] as usize;
    let command = src[4];

    if length > max_payload {
        // Corrupt length byte or stream desync. Consume the preamble so the
        // next call rescans from the bytes that followed it.
        src.advance(PREAMBLE.len());
        return Err(FrameError::PayloadTooLarge {
            size: length,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + length + CHECKSUM_SIZE;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(length).freeze();
    let received = src[0];
    src.advance(CHECKSUM_SIZE);

    let expected = checksum(length as u8, command, payload.as_ref());
    if received != expected {
        return Err(FrameError::ChecksumMismatch { expected, received });
    }

    Ok(Some(Frame {
        direction,
        command,
        payload,
    }))
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 128.
    pub max_payload_size: usize,
    /// Read timeout for blocking operations.
    pub read_timeout: Option<std::time::Duration>,
    /// Write timeout for blocking operations.
    pub write_timeout: Option<std::time::Duration>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
