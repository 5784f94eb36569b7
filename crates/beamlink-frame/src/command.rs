/// Command identifiers of the beam-spotter protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Read the sensor's current configuration.
    GetConfig = 195,
    /// Push a new configuration to the sensor.
    SetConfig = 196,
    /// Request the current beam fix.
    GetFix = 197,
    /// Round-trip an opaque payload for link verification.
    EchoTest = 198,
}

impl Command {
    /// The wire identifier of this command.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Map a wire identifier back to a command, if defined.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            195 => Some(Self::GetConfig),
            196 => Some(Self::SetConfig),
            197 => Some(Self::GetFix),
            198 => Some(Self::EchoTest),
            _ => None,
        }
    }

    /// Human-readable command name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::GetConfig => "GET_CONFIG",
            Self::SetConfig => "SET_CONFIG",
            Self::GetFix => "GET_FIX",
            Self::EchoTest => "ECHO_TEST",
        }
    }
}

/// Status codes carried in the first payload byte of every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Success = 0,
    InvalidFrequency = 1,
    HardwareError = 2,
    Timeout = 3,
}

impl Status {
    /// The wire value of this status.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Map a wire value back to a status, if defined.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Success),
            1 => Some(Self::InvalidFrequency),
            2 => Some(Self::HardwareError),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Human-readable status name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::InvalidFrequency => "INVALID_FREQUENCY",
            Self::HardwareError => "HARDWARE_ERROR",
            Self::Timeout => "TIMEOUT",
        }
    }
}
