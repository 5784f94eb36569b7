//! Driver for the beam-spotter telemetry link.
//!
//! beamlink talks to a beam-spotter sensor over a serial line using a
//! checksummed, length-prefixed framing protocol, and keeps a typed view of
//! link health and the last-known fix.
//!
//! # Crate Structure
//!
//! - [`channel`] — Serial byte-channel abstraction
//! - [`frame`] — Preamble-synchronized, checksummed message framing
//! - [`session`] — Request/response session controller and link state

/// Re-export channel types.
pub mod channel {
    pub use beamlink_channel::*;
}

/// Re-export frame types.
pub mod frame {
    pub use beamlink_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use beamlink_session::*;
}
