//! Configuration structures for the conversation analytics simulator
//!
//! This module contains the generator configuration, the command line surface,
//! configuration file loading (YAML or JSON) and validation.

use super::Channel;
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration file read when `--config` is not given and the file exists
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Output directory used when `--outdir` is not given
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Insertion-ordered category → weight mapping
pub type WeightMap = IndexMap<String, f64>;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "conversation-analytics-simulator",
    version = "0.1.0",
    about = "Conversation Analytics Simulator - Generates synthetic chatbot analytics datasets",
    long_about = "Generates simulated chatbot sessions (users, intents, confidences, fallbacks, latencies) and emits them as a raw JSONL event log plus star and snowflake CSV schemas with a summary record.

EXAMPLES:
    # Run with config.yaml (or built-in defaults if it does not exist)
    conversation-analytics-simulator

    # Use a specific configuration file
    conversation-analytics-simulator --config my-config.yaml

    # Override volumes and output directory
    conversation-analytics-simulator --sessions 20000 --users 3000 --outdir data

    # Generate configuration template
    conversation-analytics-simulator --print-config > my-config.yaml

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag, default config.yaml)
    3. Default values (lowest priority)

    Supported configuration file formats: YAML (.yaml, .yml), JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (YAML or JSON)
    #[arg(
        short,
        long,
        help = "Configuration file path (YAML or JSON)",
        long_help = "Path to a YAML or JSON configuration file. When omitted, config.yaml is used if present, otherwise built-in defaults."
    )]
    pub config: Option<String>,

    /// Number of sessions to generate
    #[arg(long, help = "Number of sessions to generate (overrides volume.sessions)")]
    pub sessions: Option<usize>,

    /// Number of users in the population
    #[arg(long, help = "Number of users to generate (overrides volume.users)")]
    pub users: Option<usize>,

    /// Output directory
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, help = "Output directory")]
    pub outdir: String,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed (overrides the configured seed)")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without generating
    #[arg(long, help = "Validate configuration without generating data")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in YAML format and exit")]
    pub print_config: bool,

    /// Check referential integrity of the generated dataset before exiting
    #[arg(long, help = "Verify dataset invariants after generation")]
    pub verify: bool,
}

/// Dataset volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Number of sessions to generate
    pub sessions: usize,
    /// Number of users in the population
    pub users: usize,
}

/// Sampling parameters for one intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentConfig {
    /// Relative weight of the intent among all turns
    pub p: f64,
    /// Beta shape parameters `[alpha, beta]` for the confidence score
    pub beta: [f64; 2],
}

/// Session length distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionTurnsConfig {
    /// Success probability of the geometric draw
    pub geom_p: f64,
}

/// Log-normal latency parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Mean of the underlying normal
    pub mu: f64,
    /// Standard deviation of the underlying normal
    pub sigma: f64,
}

/// Window session start times are drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindowConfig {
    /// Inclusive start, ISO date or date-time
    pub start: String,
    /// End, ISO date or date-time
    pub end: String,
}

impl TimeWindowConfig {
    /// Parse both bounds
    pub fn bounds(&self) -> Result<(NaiveDateTime, NaiveDateTime), ConfigError> {
        Ok((parse_timestamp(&self.start)?, parse_timestamp(&self.end)?))
    }
}

/// Parse an ISO-8601 date or local date-time (`T` or space separated)
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ConfigError> {
    let value = value.trim();
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ConfigError::InvalidTimestamp(value.to_string()))
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Random seed
    pub seed: Option<u64>,
    /// Dataset volume
    pub volume: Option<VolumeConfig>,
    /// Intent name → sampling parameters
    pub intents: Option<IndexMap<String, IntentConfig>>,
    /// Country weights
    pub countries: Option<WeightMap>,
    /// Device weights
    pub devices: Option<WeightMap>,
    /// Channel weights
    pub channels: Option<WeightMap>,
    /// Locale weights
    pub locales: Option<WeightMap>,
    /// Session length distribution
    pub session_turns: Option<SessionTurnsConfig>,
    /// Latency distribution
    pub latency_lognorm: Option<LatencyConfig>,
    /// Session start window
    pub time_window: Option<TimeWindowConfig>,
}

/// Configuration for the dataset generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Random seed; every draw in a run derives from it
    pub seed: u64,
    /// Dataset volume
    pub volume: VolumeConfig,
    /// Intent name → sampling parameters, in dimension key order
    pub intents: IndexMap<String, IntentConfig>,
    /// Country weights
    pub countries: WeightMap,
    /// Device weights
    pub devices: WeightMap,
    /// Channel weights (names must be channel dimension entries)
    pub channels: WeightMap,
    /// Locale weights
    pub locales: WeightMap,
    /// Session length distribution
    pub session_turns: SessionTurnsConfig,
    /// Latency distribution
    pub latency_lognorm: LatencyConfig,
    /// Session start window
    pub time_window: TimeWindowConfig,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .yaml, .yml, .json)")]
    UnsupportedFormat(String),

    /// Timestamp in the time window could not be parsed
    #[error("Invalid timestamp: {0} (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)")]
    InvalidTimestamp(String),
}

/// Validation errors for generator configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Session count is invalid
    #[error("Session count must be greater than 0, got {0}")]
    InvalidSessionCount(usize),

    /// User count is invalid
    #[error("User count must be greater than 0, got {0}")]
    InvalidUserCount(usize),

    /// A categorical mapping has no entries
    #[error("Mapping {0} must contain at least one entry")]
    EmptyMapping(String),

    /// A categorical weight is negative or not finite
    #[error("Invalid weight for {field}.{category}: {value}")]
    InvalidWeight {
        /// Mapping containing the weight
        field: String,
        /// Category the weight belongs to
        category: String,
        /// The invalid weight
        value: f64,
    },

    /// Every weight in a mapping is zero
    #[error("Mapping {0} needs at least one positive weight")]
    ZeroWeights(String),

    /// Beta shape parameters must be positive
    #[error("Beta shape for intent {intent} must be positive, got [{alpha}, {beta}]")]
    InvalidBetaShape {
        /// Intent name
        intent: String,
        /// First shape parameter
        alpha: f64,
        /// Second shape parameter
        beta: f64,
    },

    /// Geometric success probability out of range
    #[error("session_turns.geom_p must be in (0, 1], got {0}")]
    InvalidGeometricProbability(f64),

    /// Log-normal parameters invalid
    #[error("latency_lognorm needs finite mu and non-negative sigma, got mu={mu}, sigma={sigma}")]
    InvalidLatency {
        /// Mean of the underlying normal
        mu: f64,
        /// Standard deviation of the underlying normal
        sigma: f64,
    },

    /// Channel name has no row in the channel dimension
    #[error("Unknown channel {0} (expected web, app or messenger)")]
    UnknownChannel(String),

    /// Time window is unparsable or reversed
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),
}

fn weights(pairs: &[(&str, f64)]) -> WeightMap {
    pairs.iter().map(|(name, weight)| (name.to_string(), *weight)).collect()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let intents = [
            ("billing_help", 0.25, [5.0, 2.0]),
            ("account_login", 0.20, [6.0, 2.0]),
            ("order_status", 0.20, [7.0, 2.0]),
            ("refund_request", 0.15, [3.0, 3.0]),
            ("tech_support", 0.15, [2.0, 3.0]),
            ("smalltalk_greeting", 0.05, [8.0, 2.0]),
        ]
        .into_iter()
        .map(|(name, p, beta)| (name.to_string(), IntentConfig { p, beta }))
        .collect();

        Self {
            seed: 42,
            volume: VolumeConfig { sessions: 5_000, users: 1_000 },
            intents,
            countries: weights(&[
                ("US", 0.40),
                ("IN", 0.20),
                ("GB", 0.15),
                ("DE", 0.10),
                ("BR", 0.10),
                ("JP", 0.05),
            ]),
            devices: weights(&[("Android", 0.50), ("iOS", 0.35), ("Desktop", 0.15)]),
            channels: weights(&[("web", 0.45), ("app", 0.35), ("messenger", 0.20)]),
            locales: weights(&[
                ("en-US", 0.60),
                ("en-GB", 0.15),
                ("hi-IN", 0.10),
                ("de-DE", 0.08),
                ("pt-BR", 0.07),
            ]),
            session_turns: SessionTurnsConfig { geom_p: 0.35 },
            latency_lognorm: LatencyConfig { mu: 6.2, sigma: 0.45 },
            time_window: TimeWindowConfig {
                start: "2024-01-01T00:00:00".to_string(),
                end: "2024-03-31T23:59:59".to_string(),
            },
        }
    }
}

impl GeneratorConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(config_path) => Self::from_file(config_path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH)?,
            None => Self::default(),
        };

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, &args);

        Ok(config)
    }

    /// Load configuration from a file (YAML or JSON)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        let config_file: ConfigFile = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            Some(ext) => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => return Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        };
        Ok(Self::from_config_file(config_file))
    }

    /// Create configuration from a config file, merging with defaults
    pub fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            seed: config_file.seed.unwrap_or(defaults.seed),
            volume: config_file.volume.unwrap_or(defaults.volume),
            intents: config_file.intents.unwrap_or(defaults.intents),
            countries: config_file.countries.unwrap_or(defaults.countries),
            devices: config_file.devices.unwrap_or(defaults.devices),
            channels: config_file.channels.unwrap_or(defaults.channels),
            locales: config_file.locales.unwrap_or(defaults.locales),
            session_turns: config_file.session_turns.unwrap_or(defaults.session_turns),
            latency_lognorm: config_file.latency_lognorm.unwrap_or(defaults.latency_lognorm),
            time_window: config_file.time_window.unwrap_or(defaults.time_window),
        }
    }

    /// Apply CLI argument overrides to configuration
    ///
    /// A zero `--sessions` or `--users` counts as unset and keeps the configured volume.
    fn apply_cli_overrides(config: &mut Self, args: &CliArgs) {
        if let Some(value) = args.sessions.filter(|&sessions| sessions > 0) {
            config.volume.sessions = value;
        }
        if let Some(value) = args.users.filter(|&users| users > 0) {
            config.volume.users = value;
        }
        if let Some(value) = args.seed {
            config.seed = value;
        }
    }

    /// Save configuration to a YAML or JSON file, chosen by extension
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => serde_yaml::to_string(self)?,
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as YAML
    pub fn print_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.volume.sessions == 0 {
            return Err(ConfigValidationError::InvalidSessionCount(self.volume.sessions));
        }
        if self.volume.users == 0 {
            return Err(ConfigValidationError::InvalidUserCount(self.volume.users));
        }

        let intent_weights: WeightMap =
            self.intents.iter().map(|(name, intent)| (name.clone(), intent.p)).collect();
        Self::validate_weights("intents", &intent_weights)?;
        for (name, intent) in &self.intents {
            let [alpha, beta] = intent.beta;
            if !(alpha > 0.0 && beta > 0.0 && alpha.is_finite() && beta.is_finite()) {
                return Err(ConfigValidationError::InvalidBetaShape {
                    intent: name.clone(),
                    alpha,
                    beta,
                });
            }
        }

        Self::validate_weights("countries", &self.countries)?;
        Self::validate_weights("devices", &self.devices)?;
        Self::validate_weights("channels", &self.channels)?;
        Self::validate_weights("locales", &self.locales)?;

        if let Some(unknown) = self.channels.keys().find(|name| name.parse::<Channel>().is_err()) {
            return Err(ConfigValidationError::UnknownChannel(unknown.clone()));
        }

        let geom_p = self.session_turns.geom_p;
        if !(geom_p > 0.0 && geom_p <= 1.0) {
            return Err(ConfigValidationError::InvalidGeometricProbability(geom_p));
        }

        let LatencyConfig { mu, sigma } = self.latency_lognorm;
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(ConfigValidationError::InvalidLatency { mu, sigma });
        }

        let (start, end) = self
            .time_window
            .bounds()
            .map_err(|e| ConfigValidationError::InvalidTimeWindow(e.to_string()))?;
        if end < start {
            return Err(ConfigValidationError::InvalidTimeWindow(format!(
                "end {} is before start {}",
                end, start
            )));
        }

        Ok(())
    }

    /// Helper method to validate a categorical weight mapping
    fn validate_weights(field: &str, weights: &WeightMap) -> Result<(), ConfigValidationError> {
        if weights.is_empty() {
            return Err(ConfigValidationError::EmptyMapping(field.to_string()));
        }
        for (category, &value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::InvalidWeight {
                    field: field.to_string(),
                    category: category.clone(),
                    value,
                });
            }
        }
        if weights.values().all(|&value| value == 0.0) {
            return Err(ConfigValidationError::ZeroWeights(field.to_string()));
        }
        Ok(())
    }
}
