//! Command execution handlers

use anyhow::Result;
use leoni_hardware::{available_ports, SwitchController};
use std::path::Path;
use tracing::debug;

use crate::config::{parse_bool, CliConfig};
use crate::format::{
    format_channel, format_info, format_ping, format_ports, format_status, format_success,
    format_value,
};

use super::commands::*;

/// Handle channels command
pub async fn handle_channels(switch: &mut SwitchController, format: &OutputFormat) -> Result<()> {
    let info = switch.info().await?;
    println!("{}", format_info(&info, &format.into())?);
    Ok(())
}

/// Handle get command
pub async fn handle_get(switch: &mut SwitchController, format: &OutputFormat) -> Result<()> {
    let channel = switch.active_channel().await?;
    println!(
        "{}",
        format_channel("Active channel", channel, &format.into())?
    );
    Ok(())
}

/// Handle set command
pub async fn handle_set(
    switch: &mut SwitchController,
    channel: &str,
    format: &OutputFormat,
) -> Result<()> {
    let channel = switch.set_active_channel_str(channel).await?.get();

    match format {
        OutputFormat::Json => {
            let response = serde_json::json!({ "active_channel": channel, "sent": true });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Table => {
            println!("{}", format_success(&format!("Selected channel {}", channel)));
        }
    }

    Ok(())
}

/// Handle firmware command
pub async fn handle_firmware(switch: &mut SwitchController, format: &OutputFormat) -> Result<()> {
    let firmware = switch.firmware_revision().await?;
    println!(
        "{}",
        format_value("firmware", "Firmware", &firmware, &format.into())?
    );
    Ok(())
}

/// Handle ping command
///
/// Returns the ping result so the caller can set the exit status.
pub async fn handle_ping(switch: &mut SwitchController, format: &OutputFormat) -> Result<bool> {
    let alive = switch.ping().await?;
    println!(
        "{}",
        format_ping(alive, switch.is_simulated(), &format.into())?
    );
    Ok(alive)
}

/// Handle status command
pub async fn handle_status(switch: &mut SwitchController, format: &OutputFormat) -> Result<()> {
    let status = switch.status().await?;
    println!("{}", format_status(&status, &format.into())?);
    Ok(())
}

/// Handle ports command
pub fn handle_ports(format: &OutputFormat) -> Result<()> {
    let ports = available_ports()?;
    debug!("Found {} serial port(s)", ports.len());
    println!("{}", format_ports(&ports, &format.into())?);
    Ok(())
}

/// Apply `key = value` to a configuration
pub fn apply_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "port" => {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("Serial port cannot be empty"));
            }
            config.switch.port = value.to_string();
        }
        "timeout" => {
            let timeout: u64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid timeout value. Must be a number"))?;
            if timeout == 0 || timeout > 300 {
                return Err(anyhow::anyhow!("Timeout must be between 1 and 300 seconds"));
            }
            config.switch.timeout_secs = timeout;
        }
        "simulation" => config.switch.simulation = parse_bool(value),
        "debug_uart" => config.switch.debug_uart = parse_bool(value),
        "output_format" => {
            if ["table", "json"].contains(&value) {
                config.output_format = value.to_string();
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid output format. Must be 'table' or 'json'"
                ));
            }
        }
        "verbose" => config.verbose = parse_bool(value),
        _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
    }
    Ok(())
}

/// Handle config commands
pub fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    config_path: &Path,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(current_config)?);
            }
            OutputFormat::Table => {
                println!("CLI Configuration:");
                println!("{:<20} Value", "Setting");
                println!("{}", "-".repeat(40));
                println!("{:<20} {}", "Port", current_config.switch.port);
                println!("{:<20} {}s", "Timeout", current_config.switch.timeout_secs);
                println!("{:<20} {}", "Simulation", current_config.switch.simulation);
                println!("{:<20} {}", "Debug UART", current_config.switch.debug_uart);
                println!("{:<20} {}", "Output Format", current_config.output_format);
                println!("{:<20} {}", "Verbose", current_config.verbose);
            }
        },
        ConfigCommands::Set { key, value } => {
            // Start from the file, not the merged view, so env and flags
            // are not persisted by accident.
            let mut config = if config_path.exists() {
                CliConfig::load(config_path)?
            } else {
                CliConfig::default()
            };
            apply_config_value(&mut config, &key, &value)?;
            config.save(config_path)?;
            println!("{}", format_success(&format!("Set {} = {}", key, value)));
        }
        ConfigCommands::Reset => {
            CliConfig::default().save(config_path)?;
            println!("{}", format_success("Configuration reset to defaults"));
        }
        ConfigCommands::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_config_value() {
        let mut config = CliConfig::default();

        apply_config_value(&mut config, "port", "COM9").unwrap();
        apply_config_value(&mut config, "timeout", "12").unwrap();
        apply_config_value(&mut config, "simulation", "true").unwrap();
        apply_config_value(&mut config, "output_format", "json").unwrap();

        assert_eq!(config.switch.port, "COM9");
        assert_eq!(config.switch.timeout_secs, 12);
        assert!(config.switch.simulation);
        assert_eq!(config.output_format, "json");
    }

    #[test]
    fn test_apply_config_value_rejects_invalid() {
        let mut config = CliConfig::default();

        assert!(apply_config_value(&mut config, "timeout", "0").is_err());
        assert!(apply_config_value(&mut config, "timeout", "soon").is_err());
        assert!(apply_config_value(&mut config, "output_format", "xml").is_err());
        assert!(apply_config_value(&mut config, "port", "").is_err());
        assert!(apply_config_value(&mut config, "baud_rate", "9600").is_err());
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_config_set_and_reset_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let current = CliConfig::default();

        handle_config(
            ConfigCommands::Set {
                key: "port".to_string(),
                value: "/dev/ttyACM0".to_string(),
            },
            &current,
            &path,
            &OutputFormat::Table,
        )
        .unwrap();
        assert_eq!(CliConfig::load(&path).unwrap().switch.port, "/dev/ttyACM0");

        handle_config(ConfigCommands::Reset, &current, &path, &OutputFormat::Table).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), CliConfig::default());
    }
}
