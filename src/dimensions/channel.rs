//! Channel dimension

use serde::{Deserialize, Serialize};

use crate::types::Channel;

/// One `Dim_Channel` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRow {
    /// Surrogate key, fixed per channel
    pub channel_key: u32,
    /// Channel name
    pub channel_name: String,
}

/// Fixed channel lookup table: web=1, app=2, messenger=3
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDimension {
    rows: Vec<ChannelRow>,
}

impl ChannelDimension {
    /// Build the table; keys do not depend on configuration cardinality
    pub fn new() -> Self {
        let rows = Channel::ALL
            .iter()
            .enumerate()
            .map(|(position, channel)| ChannelRow {
                channel_key: position as u32 + 1,
                channel_name: channel.as_str().to_string(),
            })
            .collect();
        Self { rows }
    }

    /// Surrogate key of a channel
    pub fn key_for(&self, channel: Channel) -> u32 {
        Channel::ALL
            .iter()
            .position(|candidate| *candidate == channel)
            .map(|position| position as u32 + 1)
            .unwrap_or_default()
    }

    /// Whether `key` names a row
    pub fn contains_key(&self, key: u32) -> bool {
        self.rows.iter().any(|row| row.channel_key == key)
    }

    /// Rows in key order
    pub fn rows(&self) -> &[ChannelRow] {
        &self.rows
    }
}

impl Default for ChannelDimension {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_channel_keys() {
        let dimension = ChannelDimension::new();
        let names: Vec<(u32, &str)> = dimension
            .rows()
            .iter()
            .map(|row| (row.channel_key, row.channel_name.as_str()))
            .collect();
        assert_eq!(names, vec![(1, "web"), (2, "app"), (3, "messenger")]);
    }

    #[test]
    fn test_key_lookup() {
        let dimension = ChannelDimension::new();
        assert_eq!(dimension.key_for(Channel::Web), 1);
        assert_eq!(dimension.key_for(Channel::Messenger), 3);
        assert!(dimension.contains_key(2));
        assert!(!dimension.contains_key(4));
    }
}
