//! Error types and handling
//!
//! This module contains the error type shared by every generation stage. There is
//! no recovery path: the first failure aborts the run and is reported to the
//! operator.

use thiserror::Error;

use crate::sampling::SamplingError;
use crate::types::{ConfigError, ConfigValidationError, TimeKey};

/// Errors that can occur while generating or writing a dataset
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),

    /// Configuration failed validation
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),

    /// A configured distribution could not be built
    #[error("Sampling error: {0}")]
    SamplingError(#[from] SamplingError),

    /// Session or turn generation failed
    #[error("Event generation failed: {0}")]
    EventGenerationError(String),

    /// A time key does not name a real calendar day
    #[error("Invalid time key: {0}")]
    InvalidTimeKey(TimeKey),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl SimulationError {
    /// Create an event generation error
    pub fn event_generation_error(msg: impl Into<String>) -> Self {
        Self::EventGenerationError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::ValidationError(_) => "Validation",
            SimulationError::SamplingError(_) => "Sampling",
            SimulationError::EventGenerationError(_) => "Event Generation",
            SimulationError::InvalidTimeKey(_) => "Time Dimension",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::CsvError(_) => "CSV",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = SimulationError::event_generation_error("boom");
        assert_eq!(err.category(), "Event Generation");
        assert_eq!(err.to_string(), "Event generation failed: boom");

        let err = SimulationError::InvalidTimeKey(TimeKey(20241340));
        assert_eq!(err.category(), "Time Dimension");
        assert!(err.to_string().contains("20241340"));
    }

    #[test]
    fn test_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SimulationError = io.into();
        assert_eq!(err.category(), "IO");

        let err: SimulationError = ConfigValidationError::InvalidUserCount(0).into();
        assert_eq!(err.category(), "Validation");
        assert!(err.to_string().contains("User count must be greater than 0"));
    }
}
