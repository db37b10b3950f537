//! Default path resolution for configuration files
//!
//! Uses XDG Base Directory specification when available, with sensible fallbacks.

use std::path::PathBuf;

/// Returns the default path for the switch configuration file.
///
/// Uses XDG config directory if available:
/// - Linux/macOS: `~/.config/leoni/config.toml`
/// - Fallback: `/etc/leoni/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("leoni")
        .join("config.toml")
}
