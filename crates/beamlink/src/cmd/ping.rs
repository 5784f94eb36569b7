use std::time::Instant;

use serde::Serialize;

use crate::cmd::PingArgs;
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct PingOutput {
    echo: &'static str,
    bytes: usize,
    elapsed_ms: u128,
}

pub fn run(args: PingArgs, format: OutputFormat) -> CliResult<i32> {
    let mut session = args.link.open_session()?;

    let started = Instant::now();
    session
        .echo_test(args.data.as_bytes())
        .map_err(|err| session_error("echo failed", err))?;
    let elapsed = started.elapsed();

    match format {
        OutputFormat::Json => {
            let out = PingOutput {
                echo: "ok",
                bytes: args.data.len(),
                elapsed_ms: elapsed.as_millis(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        _ => {
            println!(
                "echo ok: {} bytes in {:.1} ms",
                args.data.len(),
                elapsed.as_secs_f64() * 1_000.0
            );
        }
    }
    Ok(SUCCESS)
}
