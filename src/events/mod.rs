//! Turn events and the raw event log
//!
//! This module contains the per-turn event record and the sinks events are
//! streamed into while sessions are generated.
//!
//! # Overview
//!
//! - **TurnEvent**: one chatbot turn with intent, confidence, fallback and latency
//! - **EventSink**: destination trait the session generator writes through
//! - **JsonlEventWriter**: newline-delimited JSON writer backing `logs.jsonl`
//!
//! # Usage Example
//!
//! ```rust
//! use conversation_analytics_simulator::events::*;
//!
//! let mut writer = JsonlEventWriter::new(Vec::new());
//! assert_eq!(writer.lines_written(), 0);
//! let bytes = writer.into_inner().unwrap();
//! assert!(bytes.is_empty());
//! ```

pub mod sink;
pub mod turn_event;

// Re-export all public types for convenience
pub use sink::*;
pub use turn_event::*;
