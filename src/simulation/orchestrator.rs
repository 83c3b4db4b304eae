//! Main simulation orchestrator
//!
//! This module contains the SimulationOrchestrator, which drives one generation
//! run: users, then sessions and turns, then the derived time dimension, then
//! the written outputs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::dimensions::{DimensionSet, TimeDimension};
use crate::events::{EventSink, JsonlEventWriter};
use crate::schema::{DatasetWriter, GeneratedDataset};
use crate::simulation::{GenerationStatistics, SessionGenerator, SimulationResult};
use crate::types::GeneratorConfig;
use crate::user::UserGenerator;

/// Coordinates every generation stage from a single seed
#[derive(Debug)]
pub struct SimulationOrchestrator {
    /// Validated configuration
    config: GeneratorConfig,
    /// Static dimensions built from configuration
    dimensions: DimensionSet,
    /// Population sampler
    user_generator: UserGenerator,
    /// Session and turn sampler
    session_generator: SessionGenerator,
    /// Statistics of the last run
    statistics: GenerationStatistics,
}

impl SimulationOrchestrator {
    /// Validate the configuration and build every sampler
    #[instrument(skip(config), fields(sessions = config.volume.sessions, users = config.volume.users))]
    pub fn new(config: GeneratorConfig) -> SimulationResult<Self> {
        config.validate()?;

        let dimensions = DimensionSet::from_config(&config);
        let user_generator = UserGenerator::from_config(&config)?;
        let session_generator = SessionGenerator::new(&config, &dimensions)?;

        info!(
            "Initialized orchestrator for {} sessions over {} users with seed {}",
            config.volume.sessions, config.volume.users, config.seed
        );

        Ok(Self {
            config,
            dimensions,
            user_generator,
            session_generator,
            statistics: GenerationStatistics::default(),
        })
    }

    /// The configuration the orchestrator was built with
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Statistics of the most recent run
    pub fn get_statistics(&self) -> GenerationStatistics {
        self.statistics.clone()
    }

    /// Generate the dataset, streaming turn events into `sink`
    ///
    /// Each call reseeds from the configured seed, so repeated calls produce
    /// the same dataset and the same event stream.
    pub fn generate<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> SimulationResult<GeneratedDataset> {
        let started = Instant::now();
        let _span = crate::perf_span!(
            "generate_dataset",
            sessions = self.config.volume.sessions,
            users = self.config.volume.users,
        )
        .entered();

        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let users = self.user_generator.generate_users(self.config.volume.users, &mut rng);
        debug!("{}", self.user_generator.get_user_stats(&users));

        let output = self
            .session_generator
            .generate(self.config.volume.sessions, &users, &mut rng, sink)?;
        sink.flush()?;

        let time = TimeDimension::derive(output.conversations.iter().map(|fact| fact.time_key))?;

        let dataset = GeneratedDataset {
            users,
            conversations: output.conversations,
            intent_usage: output.intent_usage,
            dimensions: self.dimensions.clone(),
            time,
            turn_events: output.turn_events,
        };

        self.statistics = GenerationStatistics::from_dataset(&dataset, self.config.seed);
        self.statistics.set_generation_duration(started.elapsed());
        info!("{}", self.statistics.generate_compact_summary());

        Ok(dataset)
    }

    /// Generate and write the complete output tree under `outdir`
    ///
    /// The event log is written while sessions are generated; the schemas and
    /// the summary are written once generation has finished.
    pub fn run<P: AsRef<Path>>(&mut self, outdir: P) -> SimulationResult<GeneratedDataset> {
        let started = Instant::now();
        let writer = DatasetWriter::new(outdir.as_ref());
        writer.prepare()?;

        let dataset = {
            let mut event_log = JsonlEventWriter::create(writer.event_log_path())?;
            let dataset = self.generate(&mut event_log)?;
            debug!("Wrote {} event log lines", event_log.lines_written());
            dataset
        };

        let _span = crate::perf_span!("write_outputs").entered();
        writer.write_all(&dataset)?;

        self.statistics.set_generation_duration(started.elapsed());
        info!("Dataset written to {}", writer.outdir().display());
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{NullSink, TurnEvent};
    use crate::simulation::SimulationError;

    fn small_config() -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.volume.sessions = 50;
        config.volume.users = 10;
        config
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = SimulationOrchestrator::new(small_config()).unwrap();
        assert_eq!(orchestrator.config().volume.sessions, 50);
        assert_eq!(orchestrator.get_statistics(), GenerationStatistics::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = small_config();
        config.volume.users = 0;
        assert!(matches!(
            SimulationOrchestrator::new(config),
            Err(SimulationError::ValidationError(_))
        ));
    }

    #[test]
    fn test_generate_row_counts() {
        let mut orchestrator = SimulationOrchestrator::new(small_config()).unwrap();
        let mut events: Vec<TurnEvent> = Vec::new();
        let dataset = orchestrator.generate(&mut events).unwrap();

        assert_eq!(dataset.users.len(), 10);
        assert_eq!(dataset.conversations.len(), 50);
        assert_eq!(events.len(), dataset.turn_events);
        assert_eq!(
            dataset.turn_events,
            dataset.conversations.iter().map(|c| c.turns_count as usize).sum::<usize>()
        );

        let stats = orchestrator.get_statistics();
        assert_eq!(stats.total_sessions, 50);
        assert_eq!(stats.total_users, 10);
        assert_eq!(stats.total_turn_events, events.len());
        assert_eq!(stats.fallback_turns, events.iter().filter(|e| e.is_fallback()).count());
        assert_eq!(stats.distinct_days, dataset.time.len());
    }

    #[test]
    fn test_generate_is_repeatable() {
        let mut orchestrator = SimulationOrchestrator::new(small_config()).unwrap();
        let first = orchestrator.generate(&mut NullSink).unwrap();
        let second = orchestrator.generate(&mut NullSink).unwrap();
        assert_eq!(first.users, second.users);
        assert_eq!(first.conversations, second.conversations);
        assert_eq!(first.intent_usage, second.intent_usage);
    }

    #[test]
    fn test_run_writes_output_tree() {
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = SimulationOrchestrator::new(small_config()).unwrap();
        let dataset = orchestrator.run(dir.path()).unwrap();

        let log = std::fs::read_to_string(dir.path().join("logs.jsonl")).unwrap();
        assert_eq!(log.lines().count(), dataset.turn_events);
        assert!(dir.path().join("SUMMARY.json").is_file());
        assert!(dir.path().join("star").join("Fact_Conversation.csv").is_file());
        assert!(dir.path().join("snowflake").join("Dim_Device.csv").is_file());
    }
}
