//! Conversation Analytics Simulator
//!
//! A synthetic conversational-analytics dataset generator. It simulates chatbot
//! sessions between a fixed user population and a bot, and emits the result as
//! a raw JSON-lines event log plus star and snowflake relational schemas with a
//! summary record.
//!
//! # Overview
//!
//! Users, sessions and turns are drawn from configured distributions by a single
//! seeded generator, so the same configuration and seed always produce the same
//! bytes. Turn events are streamed to the event log as they are drawn; the
//! session and per-intent aggregates are folded from the same draws.
//!
//! ## Key Features
//!
//! - **User Population**: ages, countries, devices and tenures drawn once per user
//! - **Session Model**: geometric turn counts, Beta confidences per intent,
//!   log-normal latencies with a messenger penalty
//! - **Outcome Model**: fallbacks, resolution and satisfaction per session
//! - **Relational Output**: star and snowflake CSV schemas with a JSON summary
//! - **Integrity Audit**: every key reference and value range checked on demand
//!
//! ## Quick Start
//!
//! ```rust
//! use conversation_analytics_simulator::*;
//!
//! let mut config = GeneratorConfig::default();
//! config.volume.sessions = 100;
//! config.volume.users = 25;
//!
//! let mut orchestrator = SimulationOrchestrator::new(config)?;
//! let mut events: Vec<TurnEvent> = Vec::new();
//! let dataset = orchestrator.generate(&mut events)?;
//!
//! assert_eq!(dataset.conversations.len(), 100);
//! assert_eq!(events.len(), dataset.turn_events);
//! assert!(verify_integrity(&dataset).is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums and configuration
//! - [`sampling`]: the weighted categorical primitive and sampling errors
//! - [`user`]: the user population
//! - [`dimensions`]: channel, intent, device and time lookup tables
//! - [`events`]: turn events and event sinks
//! - [`schema`]: fact rows, layouts, summary, writer and integrity checks
//! - [`simulation`]: orchestration, session generation, statistics, logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Sampling   │    │    User     │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Categorical │◄───┤ Population  │
//! │ Enums       │    │ Errors      │    │ Stats       │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ Dimensions  │    │   Events    │    │ Simulation  │
//! │             │    │             │    │             │
//! │ Channel     │◄───┤ TurnEvent   │◄───┤ Orchestrator│
//! │ Intent      │    │ Sinks       │    │ Sessions    │
//! │ Device/Time │    │             │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                               │
//!                                               ▼
//!                                        ┌─────────────┐
//!                                        │   Schema    │
//!                                        │ Star/Snow   │
//!                                        │ Summary     │
//!                                        └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod dimensions;
pub mod events;
pub mod sampling;
pub mod schema;
pub mod simulation;
pub mod types;
pub mod user;

// Core types and identifiers
pub use types::{
    // Enums
    Channel,
    // Configuration
    CliArgs,
    ConfigError,
    ConfigValidationError,
    DeviceType,
    GeneratorConfig,
    SchemaLayout,
    // Identifiers
    SessionId,
    TimeKey,
    UserId,
};

// Sampling
pub use sampling::{Categorical, SamplingError};

// Users
pub use user::{User, UserGenerator, UserStats};

// Dimensions
pub use dimensions::{ChannelDimension, DeviceDimension, DimensionSet, IntentDimension, TimeDimension};

// Events
pub use events::{EventSink, JsonlEventWriter, NullSink, TurnEvent};

// Schema output
pub use schema::{
    verify_integrity, ConversationFact, DatasetWriter, GeneratedDataset, IntegrityViolation,
    IntentUsageFact, SnowflakeUserRow, SummaryStatistics,
};

// Simulation
pub use simulation::{
    GenerationStatistics, LoggingConfig, SessionGenerator, SimulationError, SimulationOrchestrator,
    SimulationResult,
};
