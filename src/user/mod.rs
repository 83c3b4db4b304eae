//! User population modeling
//!
//! This module contains the user record and the population sampler that draws
//! the fixed set of users once, before any session is generated.
//!
//! # Usage Example
//!
//! ```rust
//! use conversation_analytics_simulator::types::GeneratorConfig;
//! use conversation_analytics_simulator::user::UserGenerator;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = GeneratorConfig::default();
//! let generator = UserGenerator::from_config(&config).unwrap();
//! let mut rng = StdRng::seed_from_u64(config.seed);
//!
//! let users = generator.generate_users(10, &mut rng);
//! assert_eq!(users.len(), 10);
//! assert_eq!(users[0].user_id.to_string(), "U000000");
//! ```

#[allow(clippy::module_inception)]
pub mod user;
pub mod generator;

pub use generator::{UserGenerator, UserStats};
pub use user::User;
