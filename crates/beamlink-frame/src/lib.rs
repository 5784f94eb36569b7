//! Checksummed, length-prefixed message framing for the beam-spotter link.
//!
//! This is the core value-add layer of beamlink. Every message is framed with:
//! - A 2-byte preamble (`$M`) for stream synchronization
//! - A direction marker (`>` to sensor, `<` from sensor)
//! - A 1-byte payload length (0-128)
//! - A 1-byte command id
//! - An XOR checksum over length, command, and payload
//!
//! No partial reads, no buffer management in user code.

pub mod codec;
pub mod command;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    checksum, decode_frame, encode_frame, Frame, FrameConfig, CHECKSUM_SIZE,
    DIRECTION_FROM_SENSOR, DIRECTION_TO_SENSOR, HEADER_SIZE, MAX_PAYLOAD, PREAMBLE,
};
pub use command::{Command, Status};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
