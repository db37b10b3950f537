//! Core types and data structures for the switch driver

use serde::{Deserialize, Serialize};

use crate::{Result, SwitchError};

/// A channel number, counted from 1
///
/// The upper bound depends on the connected switch, so a `Channel` is only
/// known to be valid after [`Channel::validate`] or [`Channel::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(u32);

impl Channel {
    /// Wrap a raw channel number without validation
    pub fn new(channel: u32) -> Self {
        Self(channel)
    }

    /// Raw channel number
    pub fn get(self) -> u32 {
        self.0
    }

    /// Check that the channel lies within [1, channel_count]
    pub fn validate(self, channel_count: u32) -> Result<Self> {
        check_range(i64::from(self.0), channel_count).map(|_| self)
    }

    /// Parse a channel from text and check it against `channel_count`
    ///
    /// The type check comes first: anything that is not integer text
    /// (`"2.5"`, `"two"`, `""`) is an [`SwitchError::InvalidChannel`], even
    /// when it would also be out of range. Integers outside
    /// [1, channel_count], negative ones included, are
    /// [`SwitchError::ChannelOutOfRange`].
    ///
    /// # Examples
    ///
    /// ```
    /// use leoni_core::{Channel, SwitchError};
    ///
    /// assert_eq!(Channel::parse("3", 7).unwrap().get(), 3);
    /// assert!(matches!(Channel::parse("2.5", 7), Err(SwitchError::InvalidChannel(_))));
    /// assert!(matches!(Channel::parse("8", 7), Err(SwitchError::ChannelOutOfRange { .. })));
    /// ```
    pub fn parse(raw: &str, channel_count: u32) -> Result<Self> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| SwitchError::InvalidChannel(raw.to_string()))?;

        check_range(value, channel_count)?;
        // In range implies 1 <= value <= u32::MAX
        Ok(Self(value as u32))
    }
}

fn check_range(channel: i64, channel_count: u32) -> Result<()> {
    if channel < 1 || channel > i64::from(channel_count) {
        return Err(SwitchError::ChannelOutOfRange {
            channel,
            max: channel_count,
        });
    }
    Ok(())
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a switch, as reported by the CLI `status` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchStatus {
    /// Serial port, absent when simulated
    pub port: Option<String>,
    /// Whether the simulated backend answered
    pub simulated: bool,
    /// Number of selectable channels
    pub channel_count: u32,
    /// Currently selected channel
    pub active_channel: u32,
    /// Firmware revision string
    pub firmware: String,
}

/// A serial port found on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSummary {
    /// Device path or COM name
    pub name: String,
    /// Port kind: "usb", "pci", "bluetooth" or "unknown"
    pub kind: String,
    /// USB vendor ID, for USB ports
    pub usb_vid: Option<u16>,
    /// USB product ID, for USB ports
    pub usb_pid: Option<u16>,
    /// USB product string, when reported
    pub product: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parse_integer() {
        assert_eq!(Channel::parse("1", 7).unwrap(), Channel::new(1));
        assert_eq!(Channel::parse(" 7 ", 7).unwrap(), Channel::new(7));
    }

    #[test]
    fn test_channel_parse_non_integer_is_type_error() {
        for raw in ["2.5", "two", "", "0x3", "3ch"] {
            let result = Channel::parse(raw, 7);
            assert!(
                matches!(result, Err(SwitchError::InvalidChannel(_))),
                "'{}' should be rejected as non-integer",
                raw
            );
        }
    }

    #[test]
    fn test_channel_type_checked_before_range() {
        // Out of range as well, but the type error wins.
        let result = Channel::parse("99.5", 7);
        assert!(matches!(result, Err(SwitchError::InvalidChannel(_))));

        let result = Channel::parse("-0.5", 7);
        assert!(matches!(result, Err(SwitchError::InvalidChannel(_))));
    }

    #[test]
    fn test_channel_parse_out_of_range() {
        assert!(matches!(
            Channel::parse("-1", 7),
            Err(SwitchError::ChannelOutOfRange { channel: -1, max: 7 })
        ));
        assert!(matches!(
            Channel::parse("0", 7),
            Err(SwitchError::ChannelOutOfRange { channel: 0, max: 7 })
        ));
        assert!(matches!(
            Channel::parse("8", 7),
            Err(SwitchError::ChannelOutOfRange { channel: 8, max: 7 })
        ));
        assert!(matches!(
            Channel::parse("99999999999", 7),
            Err(SwitchError::ChannelOutOfRange { .. })
        ));
    }

    #[test]
    fn test_channel_validate_bounds() {
        for c in 1..=7 {
            assert!(Channel::new(c).validate(7).is_ok());
        }
        assert!(matches!(
            Channel::new(0).validate(7),
            Err(SwitchError::ChannelOutOfRange { channel: 0, max: 7 })
        ));
        assert!(matches!(
            Channel::new(8).validate(7),
            Err(SwitchError::ChannelOutOfRange { channel: 8, max: 7 })
        ));
    }

    #[test]
    fn test_channel_validate_zero_channel_switch() {
        assert!(Channel::new(1).validate(0).is_err());
    }

    #[test]
    fn test_switch_status_serialization() {
        let status = SwitchStatus {
            port: None,
            simulated: true,
            channel_count: 7,
            active_channel: 1,
            firmware: "Leoni fibre switch simulator".to_string(),
        };

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"channel_count\":7"));
        assert!(json.contains("\"simulated\":true"));

        let parsed: SwitchStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }
}
