//! Statistics collection and reporting
//!
//! This module contains the run statistics printed after a generation pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::schema::GeneratedDataset;

/// Counts gathered over one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    // Population
    /// Number of users in the population
    pub total_users: usize,

    // Volume
    /// Number of sessions generated
    pub total_sessions: usize,
    /// Number of turn events written to the event log
    pub total_turn_events: usize,
    /// Number of `Fact_IntentUsage` rows
    pub total_intent_usage_rows: usize,
    /// Number of distinct calendar days with sessions
    pub distinct_days: usize,

    // Outcomes
    /// Turns that fell back
    pub fallback_turns: usize,
    /// Sessions with fewer than two fallbacks
    pub resolved_sessions: usize,

    // Run metadata
    /// Seed the run was driven by
    pub seed: u64,
    /// Wall-clock duration of the run
    pub generation_duration: Duration,
}

impl GenerationStatistics {
    /// Collect statistics from a generated dataset
    pub fn from_dataset(dataset: &GeneratedDataset, seed: u64) -> Self {
        Self {
            total_users: dataset.users.len(),
            total_sessions: dataset.conversations.len(),
            total_turn_events: dataset.turn_events,
            total_intent_usage_rows: dataset.intent_usage.len(),
            distinct_days: dataset.time.len(),
            fallback_turns: dataset.intent_usage.iter().map(|u| u.intent_fallbacks as usize).sum(),
            resolved_sessions: dataset
                .conversations
                .iter()
                .filter(|fact| fact.resolved_flag == 1)
                .count(),
            seed,
            generation_duration: Duration::from_secs(0),
        }
    }

    /// Record how long the run took
    pub fn set_generation_duration(&mut self, duration: Duration) {
        self.generation_duration = duration;
    }

    /// Percentage of turns that fell back
    pub fn fallback_percentage(&self) -> f64 {
        if self.total_turn_events == 0 {
            0.0
        } else {
            (self.fallback_turns as f64 / self.total_turn_events as f64) * 100.0
        }
    }

    /// Percentage of sessions that resolved
    pub fn resolved_percentage(&self) -> f64 {
        if self.total_sessions == 0 {
            0.0
        } else {
            (self.resolved_sessions as f64 / self.total_sessions as f64) * 100.0
        }
    }

    /// Average turns per session
    pub fn average_turns_per_session(&self) -> f64 {
        if self.total_sessions == 0 {
            0.0
        } else {
            self.total_turn_events as f64 / self.total_sessions as f64
        }
    }

    /// Average sessions per active day
    pub fn average_sessions_per_day(&self) -> f64 {
        if self.distinct_days == 0 {
            0.0
        } else {
            self.total_sessions as f64 / self.distinct_days as f64
        }
    }

    /// Turn events generated per wall-clock second
    pub fn events_per_second(&self) -> f64 {
        let seconds = self.generation_duration.as_secs_f64();
        if seconds > 0.0 {
            self.total_turn_events as f64 / seconds
        } else {
            0.0
        }
    }

    /// Multi-line report for the operator
    pub fn generate_statistics_report(&self) -> String {
        let mut output = String::new();

        output.push_str("Conversation Dataset Generation Complete!\n");
        output.push_str("=========================================\n\n");

        output.push_str("Run Summary:\n");
        output.push_str(&format!("   Seed: {}\n", self.seed));
        output.push_str(&format!(
            "   Duration: {:.2} seconds\n",
            self.generation_duration.as_secs_f64()
        ));
        output.push_str(&format!("   Users: {}\n\n", self.total_users));

        output.push_str("Volume:\n");
        output.push_str(&format!("   Sessions: {}\n", self.total_sessions));
        output.push_str(&format!(
            "   Turn Events: {} (avg {:.2} per session)\n",
            self.total_turn_events,
            self.average_turns_per_session()
        ));
        output.push_str(&format!("   Intent Usage Rows: {}\n", self.total_intent_usage_rows));
        output.push_str(&format!(
            "   Active Days: {} (avg {:.1} sessions/day)\n\n",
            self.distinct_days,
            self.average_sessions_per_day()
        ));

        output.push_str("Outcomes:\n");
        output.push_str(&format!(
            "   Fallback Turns: {} ({:.1}%)\n",
            self.fallback_turns,
            self.fallback_percentage()
        ));
        output.push_str(&format!(
            "   Resolved Sessions: {} ({:.1}%)\n\n",
            self.resolved_sessions,
            self.resolved_percentage()
        ));

        if self.generation_duration.as_secs_f64() > 0.0 {
            output.push_str("Performance:\n");
            output.push_str(&format!("   Generated {:.0} events/second\n\n", self.events_per_second()));
        }

        output.push_str("Summary: ");
        output.push_str(&self.generate_compact_summary());
        output.push('\n');

        output
    }

    /// One-line summary suitable for logging
    pub fn generate_compact_summary(&self) -> String {
        format!(
            "{} sessions, {} turns ({} fallbacks), {} resolved, {} users over {} days",
            self.total_sessions,
            self.total_turn_events,
            self.fallback_turns,
            self.resolved_sessions,
            self.total_users,
            self.distinct_days
        )
    }
}

impl fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_statistics_report())
    }
}
