//! Simulation orchestration and control
//!
//! This module contains the orchestrator, the session and turn generator,
//! statistics collection, logging setup and error handling.
//!
//! # Overview
//!
//! - **SimulationOrchestrator**: seeds the generator and runs every stage in order
//! - **SessionGenerator**: draws sessions and turns and folds their aggregates
//! - **GenerationStatistics**: counts reported at the end of a run
//! - **LoggingConfig**: tracing subscriber setup
//! - **SimulationError**: error type shared by every stage
//!
//! # Usage Example
//!
//! ```rust
//! use conversation_analytics_simulator::events::NullSink;
//! use conversation_analytics_simulator::simulation::*;
//! use conversation_analytics_simulator::types::*;
//!
//! let mut config = GeneratorConfig::default();
//! config.volume.sessions = 20;
//! config.volume.users = 5;
//!
//! let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
//! let dataset = orchestrator.generate(&mut NullSink).unwrap();
//! assert_eq!(dataset.conversations.len(), 20);
//! ```

pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod session_generator;
pub mod statistics;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use session_generator::*;
pub use statistics::*;
