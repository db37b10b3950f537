//! Error types for the Leoni switch driver

use thiserror::Error;

/// Core error type for switch operations
#[derive(Error, Debug)]
pub enum SwitchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serial port errors (open, read, write)
    #[error("Serial port error: {0}")]
    Serial(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Device disconnected (USB unplugged, power cycle)
    #[error("Device disconnected: {0}")]
    DeviceDisconnected(String),

    /// The transport was released by `close`
    #[error("Switch connection is closed")]
    Closed,

    /// Reply did not match the expected textual pattern
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Numeric reply could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Channel argument outside [1, max]
    #[error("Channel out of range: {channel} (must be 1-{max})")]
    ChannelOutOfRange { channel: i64, max: u32 },

    /// Channel argument is not an integer
    #[error("Invalid channel '{0}': only integers are allowed")]
    InvalidChannel(String),
}

impl SwitchError {
    /// Returns `true` for failures of the underlying transport (open, read,
    /// write, timeout, disconnect, use after close).
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            SwitchError::Serial(_)
                | SwitchError::Timeout(_)
                | SwitchError::DeviceDisconnected(_)
                | SwitchError::Closed
        )
    }

    /// Returns `true` for rejected channel arguments.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            SwitchError::ChannelOutOfRange { .. } | SwitchError::InvalidChannel(_)
        )
    }
}

/// Result type alias for switch operations
pub type Result<T> = std::result::Result<T, SwitchError>;
