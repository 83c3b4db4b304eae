//! Turn events
//!
//! A turn event is one line of `logs.jsonl`. Turns are never persisted as a
//! relational table; the schemas only carry their per-session aggregates.

use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

use crate::types::{Channel, SessionId, UserId};

/// One chatbot turn as written to the raw event log
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnEvent {
    /// Session the turn belongs to
    pub session_id: SessionId,
    /// 1-based position within the session
    pub turn_id: u32,
    /// Local timestamp of the turn
    #[serde(serialize_with = "serialize_iso_timestamp")]
    pub ts: NaiveDateTime,
    /// User driving the session
    pub user_id: UserId,
    /// Session channel
    pub channel: Channel,
    /// Session locale
    pub locale: String,
    /// Intent detected for this turn
    pub intent: String,
    /// Classifier confidence, rounded to 3 decimals
    pub confidence: f64,
    /// 1 when the bot fell back, else 0
    pub fallback: u8,
    /// Response latency in milliseconds
    pub latency_ms: u64,
    /// Placeholder utterance
    pub text: String,
}

impl TurnEvent {
    /// Placeholder utterance for an intent
    pub fn placeholder_text(intent: &str) -> String {
        format!("user asks about {}", intent)
    }

    /// Whether the turn fell back
    pub fn is_fallback(&self) -> bool {
        self.fallback == 1
    }
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS[.ffffff]`
///
/// The fractional part is microseconds and is omitted when zero.
pub fn format_iso_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() / 1_000 == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", ts.format("%Y-%m-%dT%H:%M:%S"), ts.nanosecond() / 1_000)
    }
}

fn serialize_iso_timestamp<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_iso_timestamp(ts))
}
