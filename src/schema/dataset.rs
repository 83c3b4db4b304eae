//! The assembled dataset

use crate::dimensions::{DimensionSet, TimeDimension};
use crate::schema::{snowflake_users, ConversationFact, IntentUsageFact, SnowflakeUserRow, SummaryStatistics};
use crate::user::User;

/// Everything one run produced, held in memory until it is written
///
/// The turn events themselves are not kept; they were streamed to the event
/// sink during generation and only their count survives here.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    /// User population (star `Dim_User`)
    pub users: Vec<User>,
    /// `Fact_Conversation` rows in session order
    pub conversations: Vec<ConversationFact>,
    /// `Fact_IntentUsage` rows in session then intent order
    pub intent_usage: Vec<IntentUsageFact>,
    /// Channel, intent and device lookups
    pub dimensions: DimensionSet,
    /// `Dim_Time`, derived from the conversation facts
    pub time: TimeDimension,
    /// Number of turn events streamed to the sink
    pub turn_events: usize,
}

impl GeneratedDataset {
    /// Users normalized against `Dim_Device`
    pub fn snowflake_users(&self) -> Vec<SnowflakeUserRow> {
        snowflake_users(&self.users, &self.dimensions.devices)
    }

    /// Headline statistics over the conversation facts
    pub fn summary(&self) -> SummaryStatistics {
        SummaryStatistics::from_conversations(&self.conversations)
    }
}
