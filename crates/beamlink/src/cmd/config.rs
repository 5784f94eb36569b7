use beamlink_frame::Status;
use beamlink_session::ConfigReport;

use crate::cmd::ConfigArgs;
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{print_config, OutputFormat};

pub fn run(args: ConfigArgs, format: OutputFormat) -> CliResult<i32> {
    let mut session = args.link.open_session()?;

    let report = if let Some(frequency_hz) = args.set {
        session
            .set_frequency(frequency_hz)
            .map_err(|err| session_error("set-config failed", err))?;
        ConfigReport {
            status: Status::Success,
            frequency_hz,
        }
    } else {
        session
            .request_config()
            .map_err(|err| session_error("get-config failed", err))?
    };

    print_config(&report, format);
    Ok(SUCCESS)
}
