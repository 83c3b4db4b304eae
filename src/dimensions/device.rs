//! Device dimension, only emitted in the snowflake layout

use serde::{Deserialize, Serialize};

use crate::types::DeviceType;

/// One `Dim_Device` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRow {
    /// Surrogate key
    pub device_key: u32,
    /// Device name
    pub device: String,
}

/// Fixed device lookup table: Android=1, iOS=2, Desktop=3
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDimension {
    rows: Vec<DeviceRow>,
}

impl DeviceDimension {
    /// Build the table
    pub fn new() -> Self {
        let rows = DeviceType::ALL
            .iter()
            .enumerate()
            .map(|(position, device)| DeviceRow {
                device_key: position as u32 + 1,
                device: device.as_str().to_string(),
            })
            .collect();
        Self { rows }
    }

    /// Key for a device name; exact string match, `None` when unmatched
    pub fn key_for(&self, device: &str) -> Option<u32> {
        self.rows.iter().find(|row| row.device == device).map(|row| row.device_key)
    }

    /// Rows in key order
    pub fn rows(&self) -> &[DeviceRow] {
        &self.rows
    }
}

impl Default for DeviceDimension {
    fn default() -> Self {
        Self::new()
    }
}
