use crate::cmd::ProbeArgs;
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_ports, OutputFormat};

pub fn run(_args: ProbeArgs, format: OutputFormat) -> CliResult<i32> {
    let ports = beamlink_channel::serial::available_ports()
        .map_err(|err| channel_error("port enumeration failed", err))?;

    if ports.is_empty() {
        eprintln!("no serial ports found");
    }
    print_ports(&ports, format);
    Ok(SUCCESS)
}
