use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use beamlink_channel::{SerialPortInfo, SerialPortType};
use beamlink_session::ConfigReport;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One fix exchange, as shown to the user.
#[derive(Debug, Serialize)]
pub struct FixView {
    pub has_fix: bool,
    pub x: u32,
    pub y: u32,
    pub status: &'static str,
    pub healthy: bool,
    pub timestamp: String,
}

impl FixView {
    pub fn now(has_fix: bool, x: u32, y: u32, status: &'static str, healthy: bool) -> Self {
        Self {
            has_fix,
            x,
            y,
            status,
            healthy,
            timestamp: now_unix_seconds(),
        }
    }
}

pub fn print_fix(view: &FixView, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(view).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIX", "X", "Y", "STATUS", "HEALTHY"])
                .add_row(vec![
                    view.has_fix.to_string(),
                    view.x.to_string(),
                    view.y.to_string(),
                    view.status.to_string(),
                    view.healthy.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "fix={} x={} y={} status={} healthy={}",
                view.has_fix, view.x, view.y, view.status, view.healthy
            );
        }
        OutputFormat::Raw => {
            if view.has_fix {
                println!("{} {}", view.x, view.y);
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ConfigOutput {
    status: &'static str,
    frequency_hz: u8,
}

pub fn print_config(report: &ConfigReport, format: OutputFormat) {
    let out = ConfigOutput {
        status: report.status.name(),
        frequency_hz: report.frequency_hz,
    };
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["STATUS", "FREQUENCY (HZ)"])
                .add_row(vec![out.status.to_string(), out.frequency_hz.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!("status={} frequency_hz={}", out.status, out.frequency_hz);
        }
    }
}

#[derive(Debug, Serialize)]
struct PortOutput {
    name: String,
    kind: &'static str,
}

pub fn print_ports(ports: &[SerialPortInfo], format: OutputFormat) {
    let rows: Vec<PortOutput> = ports
        .iter()
        .map(|port| PortOutput {
            name: port.port_name.clone(),
            kind: port_kind(&port.port_type),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "TYPE"]);
            for row in &rows {
                table.add_row(vec![row.name.clone(), row.kind.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{} ({})", row.name, row.kind);
            }
        }
    }
}

fn port_kind(kind: &SerialPortType) -> &'static str {
    match kind {
        SerialPortType::UsbPort(_) => "usb",
        SerialPortType::PciPort => "pci",
        SerialPortType::BluetoothPort => "bluetooth",
        SerialPortType::Unknown => "unknown",
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
