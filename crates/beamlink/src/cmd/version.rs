use beamlink_channel::serial::DEFAULT_BAUD_RATE;
use beamlink_session::{DEFAULT_FREQUENCY_HZ, FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("beamlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    for line in extended_lines() {
        println!("{line}");
    }

    Ok(SUCCESS)
}

fn extended_lines() -> Vec<String> {
    vec![
        "name: beamlink".to_string(),
        format!("version: {}", env!("CARGO_PKG_VERSION")),
        format!("target_os: {}", std::env::consts::OS),
        format!("target_arch: {}", std::env::consts::ARCH),
        format!(
            "build_target: {}",
            option_env!("BEAMLINK_BUILD_TARGET").unwrap_or("unknown")
        ),
        format!("default_baud: {DEFAULT_BAUD_RATE}"),
        format!(
            "frequency_hz: {FREQUENCY_MIN_HZ}-{FREQUENCY_MAX_HZ} (default {DEFAULT_FREQUENCY_HZ})"
        ),
    ]
}
