//! Leoni Switch CLI Library
//!
//! This library provides the core functionality for the `leonictl` tool.
//!
//! # Public API
//!
//! Configuration types are available via [`config::CliConfig`] and
//! [`config::ConfigBuilder`]. Switch access itself lives in
//! `leoni_hardware::SwitchController`.
//!
//! ```no_run
//! use leonictl::config::CliConfig;
//! use leoni_hardware::SwitchController;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = CliConfig::builder().with_env_overrides().build()?;
//! let mut switch = SwitchController::open(&config.switch).await?;
//! println!("Channels: {}", switch.channel_count().await?);
//! switch.close()?;
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;
