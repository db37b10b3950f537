//! Switch connection configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, SwitchError};
use crate::switch::DEFAULT_TIMEOUT_SECS;

/// Default serial port for the switch
#[cfg(not(windows))]
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
/// Default serial port for the switch
#[cfg(windows)]
pub const DEFAULT_PORT: &str = "COM4";

/// Connection parameters for a single switch.
///
/// Every field is optional in TOML and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Serial device path (e.g. "/dev/ttyUSB0", "COM4")
    pub port: String,
    /// Read timeout in seconds
    pub timeout_secs: u64,
    /// Answer from the in-memory simulator instead of opening the port
    pub simulation: bool,
    /// Log every line sent and received at debug level
    pub debug_uart: bool,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            simulation: false,
            debug_uart: false,
        }
    }
}

impl SwitchConfig {
    /// Live configuration for `port` with default timeout
    pub fn live(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Default::default()
        }
    }

    /// Simulated configuration
    pub fn simulated() -> Self {
        Self {
            simulation: true,
            ..Default::default()
        }
    }

    /// Read timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject values no switch can be opened with
    pub fn validate(&self) -> Result<()> {
        if self.simulation {
            return Ok(());
        }
        if self.port.trim().is_empty() {
            return Err(SwitchError::Config("serial port cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(SwitchError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse SwitchConfig from TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SwitchError::Config(format!("Invalid switch config: {}", e)))
    }

    /// Serialize SwitchConfig to TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SwitchError::Config(format!("Cannot serialize switch config: {}", e)))
    }
}
