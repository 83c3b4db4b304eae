//! Random sampling primitives
//!
//! Every component draws from the same explicitly passed generator; this module
//! holds the pieces they share: the weighted categorical primitive and the error
//! raised when a configured distribution cannot be constructed.

pub mod categorical;

pub use categorical::Categorical;

use rand::distributions::WeightedError;
use std::fmt;
use thiserror::Error;

/// Errors raised while building sampling distributions from configuration
#[derive(Debug, Error)]
pub enum SamplingError {
    /// Categorical weights were empty, negative, or all zero
    #[error("Invalid categorical mapping {name}: {source}")]
    Categorical {
        /// Mapping the weights came from
        name: String,
        /// Underlying weight error
        #[source]
        source: WeightedError,
    },

    /// A continuous or discrete distribution rejected its parameters
    #[error("Invalid {name} distribution: {reason}")]
    Distribution {
        /// Which distribution failed
        name: String,
        /// Parameter error reported by the distribution
        reason: String,
    },
}

impl SamplingError {
    /// Wrap a distribution constructor error
    pub fn distribution(name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Distribution { name: name.into(), reason: reason.to_string() }
    }
}
