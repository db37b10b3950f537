//! Configuration types for the switch driver
//!
//! [`SwitchConfig`] carries the connection parameters of one switch and is
//! what `SwitchController::open` consumes. Tools may persist it as TOML at
//! [`default_config_path`].

mod paths;
mod switch_config;

pub use paths::default_config_path;
pub use switch_config::{SwitchConfig, DEFAULT_PORT};
