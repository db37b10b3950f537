//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Leoni fibre switch CLI
#[derive(Parser, Debug)]
#[command(name = "leonictl")]
#[command(version, about = "Leoni fibre switch CLI", long_about = None)]
pub struct Cli {
    /// Serial port (overrides config file)
    #[arg(short, long, global = true)]
    pub port: Option<String>,

    /// Read timeout in seconds (overrides config file)
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Answer from the built-in simulator instead of the serial port
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Log every line sent to and received from the switch
    #[arg(long, global = true)]
    pub debug_uart: bool,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't load config file
    #[arg(long)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/leoni/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Name used in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }

    /// Parse the config file name, defaulting to table
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show switch model and channel count
    Channels,

    /// Show the active channel
    Get,

    /// Select the active channel
    Set {
        /// Channel number (1-N)
        #[arg(allow_hyphen_values = true)]
        channel: String,
    },

    /// Show the firmware revision
    Firmware,

    /// Check that the switch controller responds
    Ping,

    /// Show channel count, active channel and firmware
    Status,

    /// List serial ports on this host
    Ports,

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether the command talks to a switch
    pub fn needs_switch(&self) -> bool {
        !matches!(
            self,
            Commands::Ports | Commands::Config { .. } | Commands::Completion { .. }
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (port, timeout, simulation, debug_uart, output_format, verbose)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}
