//! Tests for session and turn generation
//!
//! These tests drive the orchestrator through the public API and check the
//! per-session invariants linking the event stream to the fact tables.

use conversation_analytics_simulator::simulation::{satisfaction_score, SimulationOrchestrator};
use conversation_analytics_simulator::types::{GeneratorConfig, IntentConfig};
use conversation_analytics_simulator::{Channel, TurnEvent};
use indexmap::IndexMap;
use std::collections::HashMap;

fn config(sessions: usize, users: usize) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.volume.sessions = sessions;
    config.volume.users = users;
    config
}

fn generate(config: GeneratorConfig) -> (conversation_analytics_simulator::GeneratedDataset, Vec<TurnEvent>) {
    let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
    let mut events: Vec<TurnEvent> = Vec::new();
    let dataset = orchestrator.generate(&mut events).unwrap();
    (dataset, events)
}

/// seed=42, one session, one user, one intent, p=1.0
#[test]
fn test_single_session_scenario() {
    let mut config = config(1, 1);
    config.seed = 42;
    config.intents = IndexMap::from([(
        "billing_help".to_string(),
        IntentConfig { p: 1.0, beta: [2.0, 5.0] },
    )]);
    config.session_turns.geom_p = 1.0;

    let (dataset, events) = generate(config);

    assert_eq!(dataset.conversations.len(), 1);
    assert_eq!(dataset.conversations[0].turns_count, 3);
    assert_eq!(dataset.intent_usage.len(), 1);
    assert_eq!(dataset.intent_usage[0].intent_turns, 3);

    assert_eq!(events.len(), 3);
    for event in &events {
        let json: serde_json::Value = serde_json::to_value(event).unwrap();
        assert_eq!(json["session_id"], "S0000001");
        assert_eq!(json["user_id"], "U000000");
        assert_eq!(json["intent"], "billing_help");
    }
}

#[test]
fn test_row_counts() {
    let (dataset, events) = generate(config(400, 60));

    assert_eq!(dataset.conversations.len(), 400);
    assert_eq!(dataset.users.len(), 60);
    let total_turns: usize = dataset.conversations.iter().map(|c| c.turns_count as usize).sum();
    assert_eq!(events.len(), total_turns);
}

#[test]
fn test_session_value_ranges() {
    let (dataset, _) = generate(config(1_000, 100));

    for fact in &dataset.conversations {
        assert!(fact.turns_count >= 2);
        assert!((0.0..=1.0).contains(&fact.fallback_rate));
        assert!((1..=5).contains(&fact.satisfaction_score));
        assert!(fact.resolved_flag <= 1);
    }
    for usage in &dataset.intent_usage {
        assert!(usage.intent_turns >= 1);
        assert!(usage.intent_fallbacks <= usage.intent_turns);
    }
}

#[test]
fn test_intent_usage_sums_to_turns() {
    let (dataset, _) = generate(config(300, 30));

    let mut usage_turns: HashMap<_, u32> = HashMap::new();
    for usage in &dataset.intent_usage {
        *usage_turns.entry(usage.session_id).or_default() += usage.intent_turns;
    }
    for fact in &dataset.conversations {
        assert_eq!(usage_turns[&fact.session_id], fact.turns_count);
    }
}

#[test]
fn test_events_agree_with_facts() {
    let (dataset, events) = generate(config(200, 20));

    let mut by_session: HashMap<_, Vec<&TurnEvent>> = HashMap::new();
    for event in &events {
        by_session.entry(event.session_id).or_default().push(event);
    }

    for fact in &dataset.conversations {
        let turns = &by_session[&fact.session_id];
        let fallbacks = turns.iter().filter(|e| e.is_fallback()).count() as u32;
        let rate = fallbacks as f64 / fact.turns_count as f64;

        assert_eq!(fact.resolved_flag == 1, fallbacks < 2);
        assert_eq!(fact.satisfaction_score, satisfaction_score(rate));
        assert!((fact.fallback_rate - rate).abs() <= 0.0005 + 1e-12);

        let turn_ids: Vec<u32> = turns.iter().map(|e| e.turn_id).collect();
        assert_eq!(turn_ids, (1..=fact.turns_count).collect::<Vec<_>>());
        for pair in turns.windows(2) {
            assert_eq!((pair[1].ts - pair[0].ts).num_seconds(), 6);
        }
        assert_eq!(
            fact.time_key,
            conversation_analytics_simulator::TimeKey::from_date(turns[0].ts.date())
        );
    }
}

#[test]
fn test_events_follow_session_order() {
    let (_, events) = generate(config(50, 10));
    for pair in events.windows(2) {
        assert!(pair[0].session_id <= pair[1].session_id);
    }
}

#[test]
fn test_channel_keys_match_event_channels() {
    let (dataset, events) = generate(config(200, 20));
    let channel_by_session: HashMap<_, Channel> =
        events.iter().map(|event| (event.session_id, event.channel)).collect();

    for fact in &dataset.conversations {
        let channel = channel_by_session[&fact.session_id];
        assert_eq!(dataset.dimensions.channels.key_for(channel), fact.channel_key);
    }
}

#[test]
fn test_confidence_is_rounded_to_three_decimals() {
    let (_, events) = generate(config(50, 10));
    for event in &events {
        assert!((0.0..=1.0).contains(&event.confidence));
        let scaled = event.confidence * 1_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}

#[test]
fn test_messenger_only_latency_floor() {
    let mut config = config(100, 10);
    config.channels = IndexMap::from([("messenger".to_string(), 1.0)]);

    let (_, events) = generate(config);
    assert!(events.iter().all(|event| event.channel == Channel::Messenger));
    assert!(events.iter().all(|event| event.latency_ms >= 200));
}

#[test]
fn test_start_times_stay_in_window() {
    let mut config = config(300, 10);
    config.time_window.start = "2024-02-01T00:00:00".to_string();
    config.time_window.end = "2024-02-07T23:59:59".to_string();

    let (dataset, _) = generate(config);
    for row in dataset.time.rows() {
        assert_eq!(row.year, 2024);
        assert_eq!(row.month, 2);
        assert!((1..=7).contains(&row.day));
    }
}
