//! Summary record written to `SUMMARY.json`

use serde::{Deserialize, Serialize};

use crate::schema::ConversationFact;

/// Headline means over the conversation facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of sessions
    pub sessions: usize,
    /// Mean `turns_count`
    pub avg_turns: f64,
    /// Mean `avg_latency_ms`
    pub avg_latency_ms: f64,
    /// Mean `fallback_rate`
    pub fallback_rate_mean: f64,
    /// Mean `satisfaction_score`
    pub satisfaction_mean: f64,
}

impl SummaryStatistics {
    /// Means over the facts; every mean is 0.0 when there are none
    pub fn from_conversations(conversations: &[ConversationFact]) -> Self {
        let mean = |value: fn(&ConversationFact) -> f64| {
            if conversations.is_empty() {
                0.0
            } else {
                conversations.iter().map(value).sum::<f64>() / conversations.len() as f64
            }
        };

        Self {
            sessions: conversations.len(),
            avg_turns: mean(|fact| f64::from(fact.turns_count)),
            avg_latency_ms: mean(|fact| fact.avg_latency_ms as f64),
            fallback_rate_mean: mean(|fact| fact.fallback_rate),
            satisfaction_mean: mean(|fact| f64::from(fact.satisfaction_score)),
        }
    }
}
