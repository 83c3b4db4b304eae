//! Fact rows
//!
//! Both layouts share the same fact tables; only the user dimension differs.

use serde::{Deserialize, Serialize};

use crate::types::{SessionId, TimeKey, UserId};

/// One `Fact_Conversation` row: a session and its aggregates
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationFact {
    /// Session identifier
    pub session_id: SessionId,
    /// User who held the session
    pub user_id: UserId,
    /// Calendar key of the session start
    pub time_key: TimeKey,
    /// Channel surrogate key
    pub channel_key: u32,
    /// Number of turns, at least 2
    pub turns_count: u32,
    /// Mean turn latency, truncated to whole milliseconds
    pub avg_latency_ms: u64,
    /// Share of turns that fell back, rounded to 3 decimals
    pub fallback_rate: f64,
    /// 1 when the session had fewer than two fallbacks
    pub resolved_flag: u8,
    /// Satisfaction score in 1..=5
    pub satisfaction_score: u8,
}

/// One `Fact_IntentUsage` row: how one intent fared within one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentUsageFact {
    /// Session identifier
    pub session_id: SessionId,
    /// Intent surrogate key
    pub intent_key: u32,
    /// Turns with this intent
    pub intent_turns: u32,
    /// Fallback turns with this intent
    pub intent_fallbacks: u32,
}
