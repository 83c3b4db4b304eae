//! Core user struct
//!
//! This module contains the User record drawn once per population slot.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A simulated chatbot user (one `Dim_User` row in the star layout)
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Sequential identifier (`U000000`, `U000001`, ...)
    pub user_id: UserId,
    /// Age in whole years, within [13, 75]
    pub age: u8,
    /// Country name as configured
    pub country: String,
    /// Device name as configured
    pub device: String,
    /// Days since sign-up
    pub tenure_days: u32,
}

impl User {
    /// Create a new user
    pub fn new(
        user_id: UserId,
        age: u8,
        country: impl Into<String>,
        device: impl Into<String>,
        tenure_days: u32,
    ) -> Self {
        Self { user_id, age, country: country.into(), device: device.into(), tenure_days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_in_column_order() {
        let user = User::new(UserId(3), 31, "US", "iOS", 120);
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(
            json,
            r#"{"user_id":"U000003","age":31,"country":"US","device":"iOS","tenure_days":120}"#
        );
    }
}
