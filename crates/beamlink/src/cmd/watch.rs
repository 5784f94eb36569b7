use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use beamlink_frame::Status;

use crate::cmd::WatchArgs;
use crate::exit::{session_error, CliError, CliResult, SUCCESS};
use crate::output::{print_fix, FixView, OutputFormat};

pub fn run(args: WatchArgs, format: OutputFormat) -> CliResult<i32> {
    let mut session = args.link.open_session()?;
    let interval = Duration::from_millis(1_000 / u64::from(session.frequency_hz()).max(1));

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let started = Instant::now();

        session
            .tick()
            .map_err(|err| session_error("tick failed", err))?;

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
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                return Ok(SUCCESS);
            }
        }

        // Hold the configured cadence regardless of exchange duration.
        if let Some(remaining) = interval.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
