use beamlink_frame::Status;

use crate::cmd::LinkArgs;
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{print_fix, FixView, OutputFormat};

pub fn run(args: LinkArgs, format: OutputFormat) -> CliResult<i32> {
    let mut session = args.open_session()?;

    session
        .request_fix()
        .map_err(|err| session_error("fix request failed", err))?;

    let coords = session.coordinates();
    let status = session.last_status().map_or("no-response", Status::name);
    let view = FixView::now(
        session.has_fix(),
        coords.x,
        coords.y,
        status,
        session.is_healthy(),
    );
    print_fix(&view, format);
    Ok(SUCCESS)
}
