//! Table layouts
//!
//! Both layouts write the same facts and the time, intent and channel
//! dimensions. They differ only in the user dimension: star keeps the device
//! name on each user, snowflake replaces it with a key into `Dim_Device`.

use serde::{Deserialize, Serialize};

use crate::dimensions::DeviceDimension;
use crate::types::{SchemaLayout, UserId};
use crate::user::User;

/// `Fact_Conversation` file name
pub const FACT_CONVERSATION_FILE: &str = "Fact_Conversation.csv";
/// `Fact_IntentUsage` file name
pub const FACT_INTENT_USAGE_FILE: &str = "Fact_IntentUsage.csv";
/// `Dim_User` file name
pub const DIM_USER_FILE: &str = "Dim_User.csv";
/// `Dim_Time` file name
pub const DIM_TIME_FILE: &str = "Dim_Time.csv";
/// `Dim_Intent` file name
pub const DIM_INTENT_FILE: &str = "Dim_Intent.csv";
/// `Dim_Channel` file name
pub const DIM_CHANNEL_FILE: &str = "Dim_Channel.csv";
/// `Dim_Device` file name
pub const DIM_DEVICE_FILE: &str = "Dim_Device.csv";

/// Files written for a layout
pub fn table_files(layout: SchemaLayout) -> &'static [&'static str] {
    match layout {
        SchemaLayout::Star => &[
            FACT_CONVERSATION_FILE,
            FACT_INTENT_USAGE_FILE,
            DIM_USER_FILE,
            DIM_TIME_FILE,
            DIM_INTENT_FILE,
            DIM_CHANNEL_FILE,
        ],
        SchemaLayout::Snowflake => &[
            DIM_USER_FILE,
            DIM_DEVICE_FILE,
            DIM_TIME_FILE,
            DIM_INTENT_FILE,
            DIM_CHANNEL_FILE,
            FACT_CONVERSATION_FILE,
            FACT_INTENT_USAGE_FILE,
        ],
    }
}

/// Snowflake `Dim_User` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowflakeUserRow {
    /// User identifier
    pub user_id: UserId,
    /// Age in years
    pub age: u8,
    /// Country name
    pub country: String,
    /// Days since sign-up
    pub tenure_days: u32,
    /// Key into `Dim_Device`; empty when the device name has no row
    pub device_key: Option<u32>,
}

/// Left-join users against the device dimension, one row per user
pub fn snowflake_users(users: &[User], devices: &DeviceDimension) -> Vec<SnowflakeUserRow> {
    users
        .iter()
        .map(|user| SnowflakeUserRow {
            user_id: user.user_id,
            age: user.age,
            country: user.country.clone(),
            tenure_days: user.tenure_days,
            device_key: devices.key_for(&user.device),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_join_keeps_every_user() {
        let users = vec![
            User::new(UserId(0), 20, "US", "Android", 5),
            User::new(UserId(1), 40, "DE", "Desktop", 50),
            User::new(UserId(2), 33, "JP", "Tablet", 9),
        ];
        let rows = snowflake_users(&users, &DeviceDimension::new());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].device_key, Some(1));
        assert_eq!(rows[1].device_key, Some(3));
        assert_eq!(rows[2].device_key, None);
        assert_eq!(rows[2].country, "JP");
    }

    #[test]
    fn test_snowflake_adds_device_table() {
        assert!(table_files(SchemaLayout::Snowflake).contains(&DIM_DEVICE_FILE));
        assert!(!table_files(SchemaLayout::Star).contains(&DIM_DEVICE_FILE));
        assert_eq!(table_files(SchemaLayout::Star).len(), 6);
    }
}
