//! Enumeration types for the conversation analytics simulator
//!
//! This module contains the fixed categorical domains that back the static
//! dimension tables (channels and devices) and the two output schema layouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conversation channels, in dimension key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Browser chat widget
    Web,
    /// Native mobile app
    App,
    /// Third-party messenger integration
    Messenger,
}

impl Channel {
    /// All channels in surrogate key order
    pub const ALL: [Channel; 3] = [Channel::Web, Channel::App, Channel::Messenger];

    /// Name used in configuration, logs and `Dim_Channel`
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Web => "web",
            Channel::App => "app",
            Channel::Messenger => "messenger",
        }
    }

    /// Extra latency added to every turn on this channel
    pub fn latency_penalty_ms(&self) -> f64 {
        match self {
            Channel::Messenger => 200.0,
            Channel::Web | Channel::App => 0.0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Channel::Web),
            "app" => Ok(Channel::App),
            "messenger" => Ok(Channel::Messenger),
            _ => Err(format!("Unknown channel: {}", s)),
        }
    }
}

/// Device families, in dimension key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// Android phones and tablets
    Android,
    /// iPhones and iPads
    #[serde(rename = "iOS")]
    Ios,
    /// Desktop browsers
    Desktop,
}

impl DeviceType {
    /// All device families in surrogate key order
    pub const ALL: [DeviceType; 3] = [DeviceType::Android, DeviceType::Ios, DeviceType::Desktop];

    /// Name used in configuration, `Dim_User` and `Dim_Device`
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Android => "Android",
            DeviceType::Ios => "iOS",
            DeviceType::Desktop => "Desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = String;

    // Exact match only: the snowflake join treats any other spelling as unmatched.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Android" => Ok(DeviceType::Android),
            "iOS" => Ok(DeviceType::Ios),
            "Desktop" => Ok(DeviceType::Desktop),
            _ => Err(format!("Unknown device: {}", s)),
        }
    }
}

/// Relational layouts the dataset is emitted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaLayout {
    /// Facts plus flat dimensions, users keep their device name
    Star,
    /// Star layout with users normalized against `Dim_Device`
    Snowflake,
}

impl SchemaLayout {
    /// Directory name under the output root
    pub fn dir_name(&self) -> &'static str {
        match self {
            SchemaLayout::Star => "star",
            SchemaLayout::Snowflake => "snowflake",
        }
    }
}

impl fmt::Display for SchemaLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_round_trips_through_names() {
        for channel in Channel::ALL {
            assert_eq!(channel.as_str().parse::<Channel>().unwrap(), channel);
        }
        assert!("sms".parse::<Channel>().is_err());
    }

    #[test]
    fn test_only_messenger_has_latency_penalty() {
        assert_eq!(Channel::Messenger.latency_penalty_ms(), 200.0);
        assert_eq!(Channel::Web.latency_penalty_ms(), 0.0);
        assert_eq!(Channel::App.latency_penalty_ms(), 0.0);
    }

    #[test]
    fn test_device_matching_is_exact() {
        assert_eq!("iOS".parse::<DeviceType>().unwrap(), DeviceType::Ios);
        assert!("ios".parse::<DeviceType>().is_err());
        assert!("android".parse::<DeviceType>().is_err());
    }

    #[test]
    fn test_schema_layout_dirs() {
        assert_eq!(SchemaLayout::Star.dir_name(), "star");
        assert_eq!(SchemaLayout::Snowflake.to_string(), "snowflake");
    }
}
