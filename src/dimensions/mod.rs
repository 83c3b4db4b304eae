//! Dimension tables
//!
//! Static reference tables (channel, intent, device) are built from
//! configuration before any session is generated; the time dimension is derived
//! afterwards from the session facts.
//!
//! # Overview
//!
//! - **ChannelDimension**: fixed keys 1..3 for web, app, messenger
//! - **IntentDimension**: keys 1..N in configuration order, with categories
//! - **DeviceDimension**: fixed keys 1..3 for Android, iOS, Desktop (snowflake only)
//! - **TimeDimension**: one row per calendar day sessions actually touch

pub mod channel;
pub mod device;
pub mod intent;
pub mod time;

pub use channel::{ChannelDimension, ChannelRow};
pub use device::{DeviceDimension, DeviceRow};
pub use intent::{intent_category, IntentDimension, IntentRow};
pub use time::{TimeDimension, TimeRow};

use tracing::debug;

use crate::types::GeneratorConfig;

/// The static dimensions shared by both layouts
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSet {
    /// Channel lookup
    pub channels: ChannelDimension,
    /// Intent lookup
    pub intents: IntentDimension,
    /// Device lookup
    pub devices: DeviceDimension,
}

impl DimensionSet {
    /// Build the static dimensions from configuration
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let dimensions = Self {
            channels: ChannelDimension::new(),
            intents: IntentDimension::from_names(config.intents.keys()),
            devices: DeviceDimension::new(),
        };
        debug!(
            "Built dimensions: {} channels, {} intents, {} devices",
            dimensions.channels.rows().len(),
            dimensions.intents.len(),
            dimensions.devices.rows().len()
        );
        dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_config_same_keys() {
        let config = GeneratorConfig::default();
        assert_eq!(DimensionSet::from_config(&config), DimensionSet::from_config(&config));
    }

    #[test]
    fn test_intent_keys_follow_config_order() {
        let config = GeneratorConfig::default();
        let dimensions = DimensionSet::from_config(&config);
        for (position, name) in config.intents.keys().enumerate() {
            assert_eq!(dimensions.intents.key_for(name), Some(position as u32 + 1));
        }
    }
}
