//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use leoni_core::{PortSummary, SwitchInfo, SwitchStatus};

use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Format switch model and channel count
pub fn format_info(info: &SwitchInfo, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Table => Ok(format!(
            "{}\nModel: {}\nChannels: {}",
            "Switch Information".bold(),
            info.model.name().cyan(),
            info.channel_count.to_string().yellow()
        )),
    }
}

/// Format the active channel; JSON carries it as a number
pub fn format_channel(label: &str, channel: u32, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "active_channel": channel,
        }))?),
        OutputFormat::Table => Ok(format!("{}: {}", label, channel.to_string().cyan())),
    }
}

/// Format a single named text value, e.g. the firmware revision
pub fn format_value(key: &str, label: &str, value: &str, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
            Ok(serde_json::to_string_pretty(&map)?)
        }
        OutputFormat::Table => Ok(format!("{}: {}", label, value.cyan())),
    }
}

/// Format ping result
pub fn format_ping(alive: bool, simulated: bool, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "alive": alive,
            "simulated": simulated,
        }))?),
        OutputFormat::Table => {
            let state = if alive { "OK".green() } else { "No response".red() };
            let suffix = if simulated { " (simulated)" } else { "" };
            Ok(format!("Switch: {}{}", state, suffix))
        }
    }
}

/// Format switch status
pub fn format_status(status: &SwitchStatus, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(status)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct StatusRow {
                #[tabled(rename = "Setting")]
                key: String,
                #[tabled(rename = "Value")]
                value: String,
            }

            let port = match (&status.port, status.simulated) {
                (_, true) => "simulated".dimmed().to_string(),
                (Some(port), false) => port.clone(),
                (None, false) => "-".to_string(),
            };

            let rows = vec![
                StatusRow {
                    key: "Port".to_string(),
                    value: port,
                },
                StatusRow {
                    key: "Channels".to_string(),
                    value: status.channel_count.to_string(),
                },
                StatusRow {
                    key: "Active channel".to_string(),
                    value: status.active_channel.to_string().green().to_string(),
                },
                StatusRow {
                    key: "Firmware".to_string(),
                    value: status.firmware.cyan().to_string(),
                },
            ];

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Switch Status:".bold(), table))
        }
    }
}

/// Format serial port list
pub fn format_ports(ports: &[PortSummary], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(ports)?),
        OutputFormat::Table => {
            if ports.is_empty() {
                return Ok("No serial ports found".yellow().to_string());
            }

            #[derive(Tabled)]
            struct PortRow {
                #[tabled(rename = "Port")]
                name: String,
                #[tabled(rename = "Type")]
                kind: String,
                #[tabled(rename = "VID:PID")]
                ids: String,
                #[tabled(rename = "Product")]
                product: String,
            }

            let rows: Vec<PortRow> = ports
                .iter()
                .map(|port| PortRow {
                    name: port.name.green().to_string(),
                    kind: port.kind.clone(),
                    ids: match (port.usb_vid, port.usb_pid) {
                        (Some(vid), Some(pid)) => format!("{:04X}:{:04X}", vid, pid),
                        _ => "-".to_string(),
                    },
                    product: port.product.clone().unwrap_or_else(|| "-".to_string()),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Serial Ports:".bold(), table))
        }
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leoni_core::SwitchModel;

    #[test]
    fn test_format_success() {
        let message = format_success("Selected channel 3");
        assert!(message.contains("✓"));
        assert!(message.contains("Selected channel 3"));
    }

    #[test]
    fn test_format_info_json() {
        let info = SwitchInfo {
            model: SwitchModel::Mol,
            channel_count: 12,
        };

        let result = format_info(&info, &OutputFormat::Json).unwrap();
        assert!(result.contains("\"model\": \"mol\""));
        assert!(result.contains("\"channel_count\": 12"));
    }

    #[test]
    fn test_format_info_table() {
        let result = format_info(&SwitchInfo::simulated(), &OutputFormat::Table).unwrap();
        assert!(result.contains("Leoni eol 1xN"));
        assert!(result.contains('7'));
    }

    #[test]
    fn test_format_value_json() {
        let result = format_value("firmware", "Firmware", "v8.09", &OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["firmware"], "v8.09");
    }

    #[test]
    fn test_format_channel_is_numeric_in_json() {
        let result = format_channel("Active channel", 3, &OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["active_channel"], 3);
        assert!(parsed["active_channel"].is_u64());

        let table = format_channel("Active channel", 3, &OutputFormat::Table).unwrap();
        assert!(table.starts_with("Active channel: "));
    }

    #[test]
    fn test_format_ping_json() {
        let result = format_ping(true, true, &OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["alive"], true);
        assert_eq!(parsed["simulated"], true);
    }

    #[test]
    fn test_format_status() {
        let status = SwitchStatus {
            port: Some("/dev/ttyUSB0".to_string()),
            simulated: false,
            channel_count: 7,
            active_channel: 4,
            firmware: "v8.09".to_string(),
        };

        let json = format_status(&status, &OutputFormat::Json).unwrap();
        assert!(json.contains("\"active_channel\": 4"));

        let table = format_status(&status, &OutputFormat::Table).unwrap();
        assert!(table.contains("/dev/ttyUSB0"));
        assert!(table.contains("v8.09"));
    }

    #[test]
    fn test_format_ports() {
        let ports = vec![
            PortSummary {
                name: "/dev/ttyUSB0".to_string(),
                kind: "usb".to_string(),
                usb_vid: Some(0x0403),
                usb_pid: Some(0x6001),
                product: Some("FT232R USB UART".to_string()),
            },
            PortSummary {
                name: "/dev/ttyS0".to_string(),
                kind: "unknown".to_string(),
                usb_vid: None,
                usb_pid: None,
                product: None,
            },
        ];

        let table = format_ports(&ports, &OutputFormat::Table).unwrap();
        assert!(table.contains("0403:6001"));
        assert!(table.contains("FT232R USB UART"));

        let json = format_ports(&ports, &OutputFormat::Json).unwrap();
        assert!(json.contains("/dev/ttyS0"));
    }

    #[test]
    fn test_format_ports_empty() {
        let result = format_ports(&[], &OutputFormat::Table).unwrap();
        assert!(result.contains("No serial ports found"));
    }
}
