//! Leoni Switch Core Library
//!
//! Shared types, protocol definitions, and configuration for Leoni `eol 1xN`
//! and `mol 1xN` fibre-optic switches. This crate is used by both the
//! hardware driver and the CLI.

pub mod config;
pub mod error;
pub mod switch;
pub mod types;

// Re-export commonly used types
pub use config::{default_config_path, SwitchConfig, DEFAULT_PORT};
pub use error::*;
pub use switch::*;
pub use types::*;
