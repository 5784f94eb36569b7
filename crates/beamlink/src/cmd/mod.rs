use std::time::Duration;

use clap::{Args, Subcommand};

use beamlink_channel::serial::DEFAULT_BAUD_RATE;
use beamlink_channel::LinkStream;
use beamlink_session::{Session, SessionConfig, Trieye};

use crate::exit::{session_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod config;
pub mod fix;
pub mod ping;
pub mod probe;
pub mod version;
pub mod watch;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports present on this host.
    Probe(ProbeArgs),
    /// Request a single fix and print it.
    Fix(LinkArgs),
    /// Poll fixes continuously at the configured frequency.
    Watch(WatchArgs),
    /// Read or set the sensor's update frequency.
    Config(ConfigArgs),
    /// Round-trip bytes through the sensor's echo command.
    Ping(PingArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Probe(args) => probe::run(args, format),
        Command::Fix(args) => fix::run(args, format),
        Command::Watch(args) => watch::run(args, format),
        Command::Config(args) => config::run(args, format),
        Command::Ping(args) => ping::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Arguments shared by every command that opens a sensor link.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Serial port the sensor is attached to (e.g. /dev/ttyUSB0).
    pub port: String,
    /// Line rate in baud.
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Update frequency pushed to the sensor at bring-up (1-100 Hz).
    #[arg(long, short = 'f', default_value = "10")]
    pub frequency: u8,
    /// Response deadline per exchange (e.g. 100ms, 1s).
    #[arg(long, default_value = "100ms")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Exit after printing N fixes.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// New update frequency to push (1-100 Hz). Omit to read the current one.
    #[arg(long, value_name = "HZ")]
    pub set: Option<u8>,
}

#[derive(Args, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Bytes to echo (1-32).
    #[arg(long, default_value = "beamlink")]
    pub data: String,
}

#[derive(Args, Debug, Default)]
pub struct ProbeArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

impl LinkArgs {
    /// Open and initialize a session against the configured port.
    pub fn open_session(&self) -> CliResult<Session<LinkStream>> {
        let config = SessionConfig {
            frequency_hz: self.frequency,
            response_timeout: parse_duration(&self.timeout)?,
            ..SessionConfig::default()
        };
        Session::open(&self.port, self.baud, Box::new(Trieye), config)
            .map_err(|err| session_error("session open failed", err))
    }
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("100").unwrap(), Duration::from_millis(100));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }
}
