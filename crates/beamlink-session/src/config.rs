use std::time::Duration;

use crate::error::{Result, SessionError};

/// Lowest accepted sensor update frequency.
pub const FREQUENCY_MIN_HZ: u8 = 1;

/// Highest accepted sensor update frequency.
pub const FREQUENCY_MAX_HZ: u8 = 100;

/// Frequency pushed to the sensor when none is configured.
pub const DEFAULT_FREQUENCY_HZ: u8 = 10;

/// Deadline for a single request/response exchange.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_millis(100);

/// A link with no successful exchange within this window reports unhealthy.
pub const DEFAULT_HEALTH_WINDOW: Duration = Duration::from_millis(100);

/// Configuration for a beam-spotter session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sensor update frequency in Hz (1-100).
    pub frequency_hz: u8,
    /// Deadline applied to every response read.
    pub response_timeout: Duration,
    /// Recency window used by health derivation.
    pub health_window: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            health_window: DEFAULT_HEALTH_WINDOW,
        }
    }
}

impl SessionConfig {
    /// Validate the configured values.
    pub fn validate(&self) -> Result<()> {
        validate_frequency(self.frequency_hz)
    }
}

/// Check an update frequency against the protocol's accepted range.
pub fn validate_frequency(frequency_hz: u8) -> Result<()> {
    if !(FREQUENCY_MIN_HZ..=FREQUENCY_MAX_HZ).contains(&frequency_hz) {
        return Err(SessionError::InvalidFrequency(frequency_hz));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn frequency_bounds() {
        assert!(validate_frequency(FREQUENCY_MIN_HZ).is_ok());
        assert!(validate_frequency(FREQUENCY_MAX_HZ).is_ok());
        assert!(matches!(
            validate_frequency(0),
            Err(SessionError::InvalidFrequency(0))
        ));
        assert!(matches!(
            validate_frequency(101),
            Err(SessionError::InvalidFrequency(101))
        ));
    }
}
