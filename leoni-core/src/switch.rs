//! Switch model definitions
//!
//! Leoni fibre switches identify themselves in reply to `type?` with a model
//! prefix followed by the port layout, e.g. `eol 1x7` for a seven channel
//! single-input switch. This module holds the model variants, the fixed
//! communication parameters, and the parsing of that identification reply.
//!
//! Note: Actual serial I/O is in the `leoni-hardware` crate.

use crate::{Result, SwitchError};

/// Serial baud rate used by all supported switches
pub const BAUD_RATE: u32 = 57600;

/// Default read timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 1;

/// Channel count reported by the simulated switch
pub const SIMULATED_CHANNEL_COUNT: u32 = 7;

/// Firmware revision reported by the simulated switch
pub const SIMULATOR_FIRMWARE: &str = "Leoni fibre switch simulator";

/// Switch model family, taken from the `type?` reply prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchModel {
    /// `eol 1xN` switch
    Eol,
    /// `mol 1xN` switch
    Mol,
}

impl SwitchModel {
    /// All known models, in prefix match order
    pub const ALL: [SwitchModel; 2] = [SwitchModel::Eol, SwitchModel::Mol];

    /// Reply prefix preceding the channel count
    pub fn reply_prefix(&self) -> &'static str {
        match self {
            SwitchModel::Eol => "eol 1x",
            SwitchModel::Mol => "mol 1x",
        }
    }

    /// Human-readable model name
    pub fn name(&self) -> &'static str {
        match self {
            SwitchModel::Eol => "Leoni eol 1xN",
            SwitchModel::Mol => "Leoni mol 1xN",
        }
    }
}

impl std::fmt::Display for SwitchModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Model and channel count of a connected switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwitchInfo {
    /// Model family
    pub model: SwitchModel,
    /// Number of selectable output channels
    pub channel_count: u32,
}

impl SwitchInfo {
    /// Info reported by the simulated switch
    pub fn simulated() -> Self {
        Self {
            model: SwitchModel::Eol,
            channel_count: SIMULATED_CHANNEL_COUNT,
        }
    }

    /// Parse the reply to `type?`
    ///
    /// The reply is trimmed, must start with `eol 1x` or `mol 1x`, and the
    /// remainder is the channel count.
    ///
    /// # Examples
    ///
    /// ```
    /// use leoni_core::switch::{SwitchInfo, SwitchModel};
    ///
    /// let info = SwitchInfo::from_type_reply("mol 1x12\r\n").unwrap();
    /// assert_eq!(info.model, SwitchModel::Mol);
    /// assert_eq!(info.channel_count, 12);
    ///
    /// assert!(SwitchInfo::from_type_reply("foo 1x7").is_err());
    /// ```
    pub fn from_type_reply(reply: &str) -> Result<Self> {
        let reply = reply.trim();

        let (model, count) = SwitchModel::ALL
            .iter()
            .find_map(|model| {
                reply
                    .strip_prefix(model.reply_prefix())
                    .map(|rest| (*model, rest))
            })
            .ok_or_else(|| {
                SwitchError::Protocol(format!(
                    "Unexpected reply to type query: '{}' (expected 'eol 1xN' or 'mol 1xN')",
                    reply
                ))
            })?;

        let channel_count = count.trim().parse::<u32>().map_err(|e| {
            SwitchError::Parse(format!("Invalid channel count '{}': {}", count, e))
        })?;

        Ok(Self {
            model,
            channel_count,
        })
    }
}
