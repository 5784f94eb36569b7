//! Request/response session management for the beam-spotter link.
//!
//! This is the "just works" layer. Open a session, poll fixes on a scheduler
//! tick, and read link health derived from response status and recency.

pub mod config;
pub mod device;
pub mod error;
pub mod message;
pub mod session;
pub mod state;

pub use config::{
    SessionConfig, DEFAULT_FREQUENCY_HZ, DEFAULT_HEALTH_WINDOW, DEFAULT_RESPONSE_TIMEOUT,
    FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ,
};
pub use device::{DeviceError, SensorDevice, Trieye};
pub use error::{Result, SessionError};
pub use message::{ConfigReport, EchoReport, EchoRequest, FixReport, SetConfigAck};
pub use session::Session;
pub use state::Coordinates;
