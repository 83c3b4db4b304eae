// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use conversation_analytics_simulator::*;


// Generation and output
mod reproducibility_tests;
mod session_generation_tests;

#[test]
fn test_identifier_formats() {
    assert_eq!(UserId::from_index(0).to_string(), "U000000");
    assert_eq!(UserId::from_index(999_999).to_string(), "U999999");
    assert_eq!(SessionId::from_sequence(1).to_string(), "S0000001");
    assert_eq!(SessionId::from_sequence(1_234_567).to_string(), "S1234567");
}

#[test]
fn test_identifier_serialization_roundtrip() {
    let user_id = UserId::from_index(42);
    let json = serde_json::to_string(&user_id).unwrap();
    assert_eq!(json, "\"U000042\"");
    let deserialized: UserId = serde_json::from_str(&json).unwrap();
    assert_eq!(user_id, deserialized);

    let session_id = SessionId::from_sequence(7);
    let json = serde_json::to_string(&session_id).unwrap();
    let deserialized: SessionId = serde_json::from_str(&json).unwrap();
    assert_eq!(session_id, deserialized);
}

#[test]
fn test_time_key_from_date() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let key = TimeKey::from_date(date);
    assert_eq!(key, TimeKey(20240309));
    assert_eq!(key.to_date(), Some(date));
    assert_eq!(TimeKey(20240230).to_date(), None);
}

#[test]
fn test_channel_names() {
    let names: Vec<String> = Channel::ALL.iter().map(|c| c.to_string()).collect();
    assert_eq!(names, vec!["web", "app", "messenger"]);
    assert_eq!(serde_json::to_string(&Channel::Messenger).unwrap(), "\"messenger\"");
}

#[test]
fn test_default_dataset_passes_integrity() {
    let mut config = GeneratorConfig::default();
    config.volume.sessions = 500;
    config.volume.users = 100;

    let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
    let dataset = orchestrator.generate(&mut NullSink).unwrap();

    assert_eq!(verify_integrity(&dataset), Vec::<IntegrityViolation>::new());
}
