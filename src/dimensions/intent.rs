//! Intent dimension
//!
//! Keys follow the configuration's declaration order, so the same
//! configuration always yields the same key-to-name binding.

use serde::{Deserialize, Serialize};

/// One `Dim_Intent` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRow {
    /// Surrogate key, 1-based in declaration order
    pub intent_key: u32,
    /// Intent name
    pub intent_name: String,
    /// Name prefix before the first underscore
    pub category: String,
}

/// Intent lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct IntentDimension {
    rows: Vec<IntentRow>,
}

/// Category of an intent: `billing_help` → `billing`, `greeting` → `greeting`
pub fn intent_category(intent_name: &str) -> &str {
    intent_name.split('_').next().unwrap_or(intent_name)
}

impl IntentDimension {
    /// Build from intent names in declaration order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = names
            .into_iter()
            .enumerate()
            .map(|(position, name)| {
                let name = name.as_ref();
                IntentRow {
                    intent_key: position as u32 + 1,
                    intent_name: name.to_string(),
                    category: intent_category(name).to_string(),
                }
            })
            .collect();
        Self { rows }
    }

    /// Key for an intent name
    pub fn key_for(&self, intent_name: &str) -> Option<u32> {
        self.rows.iter().find(|row| row.intent_name == intent_name).map(|row| row.intent_key)
    }

    /// Whether `key` names a row
    pub fn contains_key(&self, key: u32) -> bool {
        key >= 1 && key as usize <= self.rows.len()
    }

    /// Rows in key order
    pub fn rows(&self) -> &[IntentRow] {
        &self.rows
    }

    /// Number of intents
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no intents are declared
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
