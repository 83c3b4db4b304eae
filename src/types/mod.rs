//! Core types and identifiers for the conversation analytics simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the generator.
//!
//! # Overview
//!
//! - **Identifiers**: sequential user and session ids, `YYYYMMDD` time keys
//! - **Enums**: channels, device families and output schema layouts
//! - **Configuration**: generator configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use conversation_analytics_simulator::types::*;
//!
//! let user_id = UserId::from_index(0);
//! assert_eq!(user_id.to_string(), "U000000");
//!
//! let mut config = GeneratorConfig::default();
//! config.volume.sessions = 100;
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
