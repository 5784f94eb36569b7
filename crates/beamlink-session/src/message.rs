//! Typed payloads for the beam-spotter command set.
//!
//! Each response type decodes from a raw frame payload with strict length
//! checking; a wrong-sized or otherwise malformed payload decodes to `None`
//! and the caller discards the frame.

use beamlink_frame::Status;

/// Fix report payload: status, fix flag, then x and y as big-endian u32.
pub const FIX_REPORT_LEN: usize = 10;

/// Config report payload: status byte plus frequency byte.
pub const CONFIG_REPORT_LEN: usize = 2;

/// Set-config acknowledgement payload: a lone status byte.
pub const SET_CONFIG_ACK_LEN: usize = 1;

/// Echo request payload: size byte plus a fixed 32-byte data field.
pub const ECHO_REQUEST_LEN: usize = 33;

/// Echo report payload: status, size, then the 32-byte data field.
pub const ECHO_REPORT_LEN: usize = 34;

/// Largest number of meaningful bytes an echo exchange carries.
pub const ECHO_DATA_MAX: usize = 32;

/// A decoded fix report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixReport {
    pub status: Status,
    pub has_fix: bool,
    pub x: u32,
    pub y: u32,
}

impl FixReport {
    /// Decode from a raw payload. Wrong length or unknown status => `None`.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() != FIX_REPORT_LEN {
            return None;
        }
        let status = Status::from_id(payload[0])?;
        let x = u32::from_be_bytes([payload[2], payload[3], payload[4], payload[5]]);
        let y = u32::from_be_bytes([payload[6], payload[7], payload[8], payload[9]]);
        Some(Self {
            status,
            has_fix: payload[1] != 0,
            x,
            y,
        })
    }

    /// Encode to the wire payload layout.
    pub fn encode(&self) -> [u8; FIX_REPORT_LEN] {
        let mut out = [0u8; FIX_REPORT_LEN];
        out[0] = self.status.id();
        out[1] = u8::from(self.has_fix);
        out[2..6].copy_from_slice(&self.x.to_be_bytes());
        out[6..10].copy_from_slice(&self.y.to_be_bytes());
        out
    }
}

/// A decoded configuration report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigReport {
    pub status: Status,
    pub frequency_hz: u8,
}

impl ConfigReport {
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() != CONFIG_REPORT_LEN {
            return None;
        }
        Some(Self {
            status: Status::from_id(payload[0])?,
            frequency_hz: payload[1],
        })
    }

    pub fn encode(&self) -> [u8; CONFIG_REPORT_LEN] {
        [self.status.id(), self.frequency_hz]
    }
}

/// A decoded set-config acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetConfigAck {
    pub status: Status,
}

impl SetConfigAck {
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() != SET_CONFIG_ACK_LEN {
            return None;
        }
        Some(Self {
            status: Status::from_id(payload[0])?,
        })
    }

    pub fn encode(&self) -> [u8; SET_CONFIG_ACK_LEN] {
        [self.status.id()]
    }
}

/// An echo request: up to 32 bytes of caller data, zero-padded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoRequest {
    size: u8,
    data: [u8; ECHO_DATA_MAX],
}

impl EchoRequest {
    /// Build a request; data must be 1-32 bytes.
    pub fn new(data: &[u8]) -> Option<Self> {
        if data.is_empty() || data.len() > ECHO_DATA_MAX {
            return None;
        }
        let mut padded = [0u8; ECHO_DATA_MAX];
        padded[..data.len()].copy_from_slice(data);
        Some(Self {
            size: data.len() as u8,
            data: padded,
        })
    }

    /// The meaningful bytes of the request.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.size as usize]
    }

    pub fn encode(&self) -> [u8; ECHO_REQUEST_LEN] {
        let mut out = [0u8; ECHO_REQUEST_LEN];
        out[0] = self.size;
        out[1..].copy_from_slice(&self.data);
        out
    }
}

/// A decoded echo report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoReport {
    pub status: Status,
    size: u8,
    data: [u8; ECHO_DATA_MAX],
}

impl EchoReport {
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() != ECHO_REPORT_LEN {
            return None;
        }
        let size = payload[1];
        if size as usize > ECHO_DATA_MAX {
            return None;
        }
        let mut data = [0u8; ECHO_DATA_MAX];
        data.copy_from_slice(&payload[2..]);
        Some(Self {
            status: Status::from_id(payload[0])?,
            size,
            data,
        })
    }

    /// The meaningful bytes of the report.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.size as usize]
    }

    pub fn encode(&self) -> [u8; ECHO_REPORT_LEN] {
        let mut out = [0u8; ECHO_REPORT_LEN];
        out[0] = self.status.id();
        out[1] = self.size;
        out[2..].copy_from_slice(&self.data);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_report_layout() {
        let report = FixReport {
            status: Status::Success,
            has_fix: true,
            x: 0x0102_0304,
            y: 0x0A0B_0C0D,
        };
        let bytes = report.encode();
        assert_eq!(
            bytes,
            [0, 1, 0x01, 0x02, 0x03, 0x04, 0x0A, 0x0B, 0x0C, 0x0D]
        );
        assert_eq!(FixReport::decode(&bytes), Some(report));
    }

    #[test]
    fn fix_report_rejects_wrong_length() {
        assert!(FixReport::decode(&[0u8; 9]).is_none());
        assert!(FixReport::decode(&[0u8; 11]).is_none());
    }

    #[test]
    fn fix_report_rejects_unknown_status() {
        let mut bytes = [0u8; FIX_REPORT_LEN];
        bytes[0] = 9;
        assert!(FixReport::decode(&bytes).is_none());
    }

    #[test]
    fn fix_flag_any_nonzero_is_true() {
        let mut bytes = FixReport {
            status: Status::Success,
            has_fix: false,
            x: 0,
            y: 0,
        }
        .encode();
        bytes[1] = 0xFF;
        assert!(FixReport::decode(&bytes).is_some_and(|r| r.has_fix));
    }

    #[test]
    fn config_report_roundtrip() {
        let report = ConfigReport {
            status: Status::Success,
            frequency_hz: 25,
        };
        assert_eq!(ConfigReport::decode(&report.encode()), Some(report));
        assert!(ConfigReport::decode(&[0]).is_none());
    }

    #[test]
    fn set_config_ack_roundtrip() {
        let ack = SetConfigAck {
            status: Status::InvalidFrequency,
        };
        assert_eq!(SetConfigAck::decode(&ack.encode()), Some(ack));
        assert!(SetConfigAck::decode(&[]).is_none());
        assert!(SetConfigAck::decode(&[0, 0]).is_none());
    }

    #[test]
    fn echo_request_pads_to_fixed_width() {
        let request = EchoRequest::new(b"ping").unwrap();
        let bytes = request.encode();
        assert_eq!(bytes.len(), ECHO_REQUEST_LEN);
        assert_eq!(bytes[0], 4);
        assert_eq!(&bytes[1..5], b"ping");
        assert!(bytes[5..].iter().all(|&b| b == 0));
        assert_eq!(request.data(), b"ping");
    }

    #[test]
    fn echo_request_size_bounds() {
        assert!(EchoRequest::new(&[]).is_none());
        assert!(EchoRequest::new(&[0u8; ECHO_DATA_MAX]).is_some());
        assert!(EchoRequest::new(&[0u8; ECHO_DATA_MAX + 1]).is_none());
    }

    #[test]
    fn echo_report_roundtrip() {
        let mut data = [0u8; ECHO_DATA_MAX];
        data[..3].copy_from_slice(b"abc");
        let report = EchoReport {
            status: Status::Success,
            size: 3,
            data,
        };
        let decoded = EchoReport::decode(&report.encode()).unwrap();
        assert_eq!(decoded.data(), b"abc");
        assert_eq!(decoded.status, Status::Success);
    }

    #[test]
    fn echo_report_rejects_oversized_size_byte() {
        let mut bytes = [0u8; ECHO_REPORT_LEN];
        bytes[1] = 33;
        assert!(EchoReport::decode(&bytes).is_none());
    }
}
