//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use leoni_core::{default_config_path, SwitchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Default output format
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Switch connection settings
    pub switch: SwitchConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_format: "table".to_string(),
            verbose: false,
            switch: SwitchConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CLI config file {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse CLI config file")
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;

        std::fs::write(path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Get the configuration file path, `LEONI_CONFIG` first
    pub fn config_path() -> PathBuf {
        std::env::var("LEONI_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path())
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Each layer overwrites the values it sets, so layers are applied from
/// lowest to highest priority:
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    port: Option<String>,
    timeout: Option<u64>,
    simulation: Option<bool>,
    debug_uart: Option<bool>,
    output_format: Option<String>,
    verbose: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set serial port (with validation)
    pub fn with_port(mut self, port: impl Into<String>) -> Result<Self> {
        let port = port.into();
        Self::validate_port(&port)?;
        self.port = Some(port);
        Ok(self)
    }

    /// Set read timeout in seconds (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Set simulation mode
    pub fn with_simulation(mut self, simulation: bool) -> Self {
        self.simulation = Some(simulation);
        self
    }

    /// Set UART debug logging
    pub fn with_debug_uart(mut self, debug_uart: bool) -> Self {
        self.debug_uart = Some(debug_uart);
        self
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Apply every value of a loaded configuration
    pub fn with_config(mut self, config: CliConfig) -> Self {
        self.port = Some(config.switch.port);
        self.timeout = Some(config.switch.timeout_secs);
        self.simulation = Some(config.switch.simulation);
        self.debug_uart = Some(config.switch.debug_uart);
        self.output_format = Some(config.output_format);
        self.verbose = Some(config.verbose);
        self
    }

    /// Load configuration from file
    ///
    /// A missing file is not an error; a file that exists but does not
    /// parse is.
    pub fn with_config_file(self, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(self);
        }

        let config = CliConfig::load(path)?;
        Ok(self.with_config(config))
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("LEONI_PORT") {
            if Self::validate_port(&port).is_ok() {
                self.port = Some(port);
            }
        }

        if let Ok(timeout) = std::env::var("LEONI_TIMEOUT") {
            if let Ok(timeout) = timeout.parse() {
                if Self::validate_timeout(timeout).is_ok() {
                    self.timeout = Some(timeout);
                }
            }
        }

        if let Ok(simulate) = std::env::var("LEONI_SIMULATE") {
            self.simulation = Some(parse_bool(&simulate));
        }

        if let Ok(debug_uart) = std::env::var("LEONI_DEBUG_UART") {
            self.debug_uart = Some(parse_bool(&debug_uart));
        }

        if let Ok(format) = std::env::var("LEONI_FORMAT") {
            if Self::validate_output_format(&format).is_ok() {
                self.output_format = Some(format);
            }
        }

        if let Ok(verbose) = std::env::var("LEONI_VERBOSE") {
            self.verbose = Some(parse_bool(&verbose));
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let port = self.port.unwrap_or(defaults.switch.port);
        let timeout = self.timeout.unwrap_or(defaults.switch.timeout_secs);
        let output_format = self.output_format.unwrap_or(defaults.output_format);

        // Validate final values
        Self::validate_port(&port)?;
        Self::validate_timeout(timeout)?;
        Self::validate_output_format(&output_format)?;

        Ok(CliConfig {
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            switch: SwitchConfig {
                port,
                timeout_secs: timeout,
                simulation: self.simulation.unwrap_or(defaults.switch.simulation),
                debug_uart: self.debug_uart.unwrap_or(defaults.switch.debug_uart),
            },
        })
    }

    /// Validate serial port name
    fn validate_port(port: &str) -> Result<()> {
        if port.trim().is_empty() {
            return Err(anyhow::anyhow!("Serial port cannot be empty"));
        }
        Ok(())
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "table" | "json" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                format
            )),
        }
    }

    /// Validate timeout value
    fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0"));
        }

        if timeout > 300 {
            return Err(anyhow::anyhow!(
                "Timeout must be less than or equal to 300 seconds"
            ));
        }

        Ok(())
    }
}

/// Parse a boolean setting ("true"/"1" are true)
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 6] = [
        "LEONI_PORT",
        "LEONI_TIMEOUT",
        "LEONI_SIMULATE",
        "LEONI_DEBUG_UART",
        "LEONI_FORMAT",
        "LEONI_VERBOSE",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.output_format, "table");
        assert!(!config.verbose);
        assert_eq!(config.switch, SwitchConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = CliConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[switch]"));

        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let parsed: CliConfig = toml::from_str("[switch]\nsimulation = true\n").unwrap();
        assert!(parsed.switch.simulation);
        assert_eq!(parsed.switch.timeout_secs, 1);
        assert_eq!(parsed.output_format, "table");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leoni").join("config.toml");

        let mut config = CliConfig::default();
        config.switch.port = "/dev/ttyACM3".to_string();
        config.output_format = "json".to_string();
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    // ConfigBuilder tests

    #[test]
    #[serial]
    fn test_builder_with_defaults() {
        clear_env();
        let config = ConfigBuilder::new().with_env_overrides().build().unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_builder_with_custom_values() {
        let config = ConfigBuilder::new()
            .with_port("/dev/ttyS1")
            .unwrap()
            .with_timeout(5)
            .unwrap()
            .with_simulation(true)
            .with_debug_uart(true)
            .with_output_format("json")
            .unwrap()
            .with_verbose(true)
            .build()
            .unwrap();

        assert_eq!(config.switch.port, "/dev/ttyS1");
        assert_eq!(config.switch.timeout_secs, 5);
        assert!(config.switch.simulation);
        assert!(config.switch.debug_uart);
        assert_eq!(config.output_format, "json");
        assert!(config.verbose);
    }

    #[test]
    fn test_builder_port_validation() {
        assert!(ConfigBuilder::new().with_port("").is_err());
        assert!(ConfigBuilder::new().with_port("   ").is_err());
        assert!(ConfigBuilder::new().with_port("COM4").is_ok());
    }

    #[test]
    fn test_builder_format_validation() {
        assert!(ConfigBuilder::new().with_output_format("xml").is_err());
        assert!(ConfigBuilder::new().with_output_format("table").is_ok());
        assert!(ConfigBuilder::new().with_output_format("json").is_ok());
    }

    #[test]
    fn test_builder_timeout_validation() {
        assert!(ConfigBuilder::new().with_timeout(0).is_err());
        assert!(ConfigBuilder::new().with_timeout(301).is_err());
        assert!(ConfigBuilder::new().with_timeout(1).is_ok());
        assert!(ConfigBuilder::new().with_timeout(300).is_ok());
    }

    #[test]
    fn test_builder_missing_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .with_config_file(&dir.path().join("absent.toml"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.switch.port, leoni_core::DEFAULT_PORT);
    }

    #[test]
    fn test_builder_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "switch = 3").unwrap();

        assert!(ConfigBuilder::new().with_config_file(&path).is_err());
    }

    #[test]
    #[serial]
    fn test_builder_with_env_overrides() {
        clear_env();
        std::env::set_var("LEONI_PORT", "/dev/ttyUSB7");
        std::env::set_var("LEONI_TIMEOUT", "4");
        std::env::set_var("LEONI_SIMULATE", "1");
        std::env::set_var("LEONI_FORMAT", "json");
        std::env::set_var("LEONI_VERBOSE", "TRUE");

        let config = ConfigBuilder::new().with_env_overrides().build().unwrap();

        assert_eq!(config.switch.port, "/dev/ttyUSB7");
        assert_eq!(config.switch.timeout_secs, 4);
        assert!(config.switch.simulation);
        assert_eq!(config.output_format, "json");
        assert!(config.verbose);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_builder_priority_chain() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "output_format = \"json\"\n[switch]\nport = \"/dev/file\"\ntimeout_secs = 9\n",
        )
        .unwrap();

        std::env::set_var("LEONI_PORT", "/dev/env");

        let config = ConfigBuilder::new()
            .with_config_file(&path)
            .unwrap()
            .with_env_overrides()
            .with_timeout(2)
            .unwrap()
            .build()
            .unwrap();

        // Env beats file
        assert_eq!(config.switch.port, "/dev/env");
        // CLI beats file
        assert_eq!(config.switch.timeout_secs, 2);
        // File beats defaults
        assert_eq!(config.output_format, "json");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_builder_invalid_env_values_ignored() {
        clear_env();
        std::env::set_var("LEONI_TIMEOUT", "invalid");
        std::env::set_var("LEONI_FORMAT", "xml");
        std::env::set_var("LEONI_PORT", "");

        let config = ConfigBuilder::new().with_env_overrides().build().unwrap();

        assert_eq!(config.switch.timeout_secs, 1);
        assert_eq!(config.output_format, "table");
        assert_eq!(config.switch.port, leoni_core::DEFAULT_PORT);

        clear_env();
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("yes"));
    }
}
