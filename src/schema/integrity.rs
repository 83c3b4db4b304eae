//! Referential integrity and value range checks
//!
//! Generation is correct by construction; these checks exist so a produced
//! dataset can be audited after the fact (`--verify`) and so tests can assert
//! the whole contract in one call.

use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

use crate::schema::GeneratedDataset;
use crate::types::{SessionId, TimeKey, UserId};

/// A broken invariant found in a generated dataset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityViolation {
    /// Session has fewer than two turns
    #[error("Session {session_id} has {turns} turns")]
    TooFewTurns {
        /// Offending session
        session_id: SessionId,
        /// Its turn count
        turns: u32,
    },

    /// Fallback rate outside [0, 1]
    #[error("Session {session_id} has fallback rate {rate}")]
    FallbackRateOutOfRange {
        /// Offending session
        session_id: SessionId,
        /// Its fallback rate
        rate: f64,
    },

    /// Satisfaction outside 1..=5
    #[error("Session {session_id} has satisfaction score {score}")]
    SatisfactionOutOfRange {
        /// Offending session
        session_id: SessionId,
        /// Its score
        score: u8,
    },

    /// Resolved flag disagrees with the fallback count
    #[error("Session {session_id} resolved flag does not match its fallbacks")]
    ResolvedFlagMismatch {
        /// Offending session
        session_id: SessionId,
    },

    /// Intent usage reports more fallbacks than turns
    #[error("Session {session_id} intent {intent_key} has {fallbacks} fallbacks over {turns} turns")]
    FallbacksExceedTurns {
        /// Offending session
        session_id: SessionId,
        /// Intent key
        intent_key: u32,
        /// Turns with this intent
        turns: u32,
        /// Fallbacks with this intent
        fallbacks: u32,
    },

    /// Intent usage turns do not add up to the session's turn count
    #[error("Session {session_id} intent turns sum to {usage_turns}, expected {turns}")]
    IntentTurnsMismatch {
        /// Offending session
        session_id: SessionId,
        /// Sum of intent turns
        usage_turns: u32,
        /// Session turn count
        turns: u32,
    },

    /// Intent usage row for a session with no conversation fact
    #[error("Intent usage references unknown session {0}")]
    UnknownSession(SessionId),

    /// Fact references a user not in `Dim_User`
    #[error("Session {session_id} references unknown user {user_id}")]
    UnknownUser {
        /// Offending session
        session_id: SessionId,
        /// Dangling user id
        user_id: UserId,
    },

    /// Fact references a channel key not in `Dim_Channel`
    #[error("Session {session_id} references unknown channel key {channel_key}")]
    UnknownChannel {
        /// Offending session
        session_id: SessionId,
        /// Dangling key
        channel_key: u32,
    },

    /// Fact references a time key not in `Dim_Time`
    #[error("Session {session_id} references unknown time key {time_key}")]
    UnknownTime {
        /// Offending session
        session_id: SessionId,
        /// Dangling key
        time_key: TimeKey,
    },

    /// Usage row references an intent key not in `Dim_Intent`
    #[error("Session {session_id} references unknown intent key {intent_key}")]
    UnknownIntent {
        /// Offending session
        session_id: SessionId,
        /// Dangling key
        intent_key: u32,
    },

    /// Snowflake user whose device has no `Dim_Device` row
    #[error("User {0} has no device key")]
    MissingDeviceKey(UserId),

    /// The event log line count differs from the total turns
    #[error("Event log has {events} lines, sessions have {turns} turns")]
    EventCountMismatch {
        /// Events streamed
        events: usize,
        /// Sum of session turn counts
        turns: usize,
    },
}

/// Check every invariant of a dataset, returning all violations found
pub fn verify_integrity(dataset: &GeneratedDataset) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    let user_ids: HashSet<UserId> = dataset.users.iter().map(|user| user.user_id).collect();
    let mut usage_by_session: HashMap<SessionId, (u32, u32)> = HashMap::new();

    for usage in &dataset.intent_usage {
        if usage.intent_fallbacks > usage.intent_turns {
            violations.push(IntegrityViolation::FallbacksExceedTurns {
                session_id: usage.session_id,
                intent_key: usage.intent_key,
                turns: usage.intent_turns,
                fallbacks: usage.intent_fallbacks,
            });
        }
        if !dataset.dimensions.intents.contains_key(usage.intent_key) {
            violations.push(IntegrityViolation::UnknownIntent {
                session_id: usage.session_id,
                intent_key: usage.intent_key,
            });
        }
        let totals = usage_by_session.entry(usage.session_id).or_default();
        totals.0 += usage.intent_turns;
        totals.1 += usage.intent_fallbacks;
    }

    let mut total_turns = 0usize;
    for fact in &dataset.conversations {
        let session_id = fact.session_id;
        total_turns += fact.turns_count as usize;

        if fact.turns_count < 2 {
            violations.push(IntegrityViolation::TooFewTurns { session_id, turns: fact.turns_count });
        }
        if !(0.0..=1.0).contains(&fact.fallback_rate) {
            violations.push(IntegrityViolation::FallbackRateOutOfRange { session_id, rate: fact.fallback_rate });
        }
        if !(1..=5).contains(&fact.satisfaction_score) {
            violations.push(IntegrityViolation::SatisfactionOutOfRange {
                session_id,
                score: fact.satisfaction_score,
            });
        }
        if !user_ids.contains(&fact.user_id) {
            violations.push(IntegrityViolation::UnknownUser { session_id, user_id: fact.user_id });
        }
        if !dataset.dimensions.channels.contains_key(fact.channel_key) {
            violations.push(IntegrityViolation::UnknownChannel { session_id, channel_key: fact.channel_key });
        }
        if !dataset.time.contains_key(fact.time_key) {
            violations.push(IntegrityViolation::UnknownTime { session_id, time_key: fact.time_key });
        }

        let (usage_turns, usage_fallbacks) = usage_by_session.remove(&session_id).unwrap_or_default();
        if usage_turns != fact.turns_count {
            violations.push(IntegrityViolation::IntentTurnsMismatch {
                session_id,
                usage_turns,
                turns: fact.turns_count,
            });
        }
        if (fact.resolved_flag == 1) != (usage_fallbacks < 2) {
            violations.push(IntegrityViolation::ResolvedFlagMismatch { session_id });
        }
    }

    // Whatever is left never matched a conversation fact
    let mut orphans: Vec<SessionId> = usage_by_session.into_keys().collect();
    orphans.sort();
    violations.extend(orphans.into_iter().map(IntegrityViolation::UnknownSession));

    violations.extend(
        dataset
            .snowflake_users()
            .into_iter()
            .filter(|row| row.device_key.is_none())
            .map(|row| IntegrityViolation::MissingDeviceKey(row.user_id)),
    );

    if dataset.turn_events != total_turns {
        violations.push(IntegrityViolation::EventCountMismatch { events: dataset.turn_events, turns: total_turns });
    }

    if violations.is_empty() {
        debug!("Dataset passed integrity verification");
    } else {
        warn!("Dataset has {} integrity violations", violations.len());
    }
    violations
}
