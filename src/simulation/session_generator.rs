//! Session and turn generation
//!
//! This module contains the stochastic engine that turns the configured
//! distributions into sessions. Each turn event is handed to the event sink as
//! soon as it is drawn, while the session and per-intent aggregates are folded
//! from the same draws, so the log stream and the fact tables always agree.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rand_distr::{Beta, Distribution, Geometric, LogNormal};
use tracing::{debug, info, instrument};

use crate::dimensions::{ChannelDimension, DimensionSet};
use crate::events::{EventSink, TurnEvent};
use crate::sampling::{Categorical, SamplingError};
use crate::schema::{ConversationFact, IntentUsageFact};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Channel, ConfigValidationError, GeneratorConfig, SessionId, TimeKey};
use crate::user::User;

/// Fixed constants of the turn and outcome model
pub mod turn_model {
    /// Confidence below this always falls back
    pub const FALLBACK_CONFIDENCE_THRESHOLD: f64 = 0.45;

    /// Chance that a confident turn still falls back
    pub const NOISE_FALLBACK_PROBABILITY: f64 = 0.02;

    /// Seconds between consecutive turns of a session
    pub const TURN_SPACING_SECONDS: i64 = 6;

    /// Turns added on top of the geometric draw
    pub const EXTRA_TURNS: u32 = 2;

    /// Sessions with at least this many fallbacks are unresolved
    pub const RESOLVED_FALLBACK_LIMIT: u32 = 2;
}

/// Satisfaction score for a session's (unrounded) fallback rate
///
/// Rounds half to even before clamping to [1, 5].
pub fn satisfaction_score(fallback_rate: f64) -> u8 {
    let raw = 3.6 + 1.2 * ((1.0 - fallback_rate) - 0.6) - 1.1 * fallback_rate;
    raw.round_ties_even().clamp(1.0, 5.0) as u8
}

/// Whether a session with `fallbacks` fallback turns counts as resolved
pub fn is_resolved(fallbacks: u32) -> bool {
    fallbacks < turn_model::RESOLVED_FALLBACK_LIMIT
}

/// Round to a fixed number of decimals, ties to even
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Per-intent sampling parameters
#[derive(Debug, Clone)]
struct IntentModel {
    name: String,
    intent_key: u32,
    confidence: Beta<f64>,
}

/// Per-session counter for one intent; a fresh set is allocated per session
#[derive(Debug, Clone, Copy, Default)]
struct IntentCounter {
    turns: u32,
    fallbacks: u32,
}

/// Facts produced by a generation pass
#[derive(Debug, Clone, Default)]
pub struct SessionOutput {
    /// One row per session, in session order
    pub conversations: Vec<ConversationFact>,
    /// One row per (session, observed intent), in session then intent key order
    pub intent_usage: Vec<IntentUsageFact>,
    /// Number of turn events handed to the sink
    pub turn_events: usize,
}

/// Generates sessions, turns and their aggregates
#[derive(Debug, Clone)]
pub struct SessionGenerator {
    window_start: NaiveDateTime,
    window_micros: i64,
    channels: Categorical<Channel>,
    channel_dimension: ChannelDimension,
    locales: Categorical<String>,
    intents: Categorical<usize>,
    intent_models: Vec<IntentModel>,
    turns: Geometric,
    latency: LogNormal<f64>,
}

impl SessionGenerator {
    /// Build the sampling model from configuration and the static dimensions
    pub fn new(config: &GeneratorConfig, dimensions: &DimensionSet) -> SimulationResult<Self> {
        let (window_start, window_end) = config.time_window.bounds()?;
        let window_micros = (window_end - window_start).num_microseconds().ok_or_else(|| {
            ConfigValidationError::InvalidTimeWindow("window too long".to_string())
        })?;
        if window_micros < 0 {
            return Err(ConfigValidationError::InvalidTimeWindow(format!(
                "end {} is before start {}",
                window_end, window_start
            ))
            .into());
        }

        let channel_weights = config
            .channels
            .iter()
            .map(|(name, weight)| {
                name.parse::<Channel>()
                    .map(|channel| (channel, *weight))
                    .map_err(|_| ConfigValidationError::UnknownChannel(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut intent_models = Vec::with_capacity(config.intents.len());
        for (name, intent) in &config.intents {
            let intent_key = dimensions.intents.key_for(name).ok_or_else(|| {
                SimulationError::event_generation_error(format!("intent {} missing from Dim_Intent", name))
            })?;
            let [alpha, beta] = intent.beta;
            let confidence = Beta::new(alpha, beta)
                .map_err(|e| SamplingError::distribution(format!("confidence[{}]", name), e))?;
            intent_models.push(IntentModel { name: name.clone(), intent_key, confidence });
        }

        let intents = Categorical::new(
            "intents",
            config.intents.values().enumerate().map(|(index, intent)| (index, intent.p)),
        )?;
        let turns = Geometric::new(config.session_turns.geom_p)
            .map_err(|e| SamplingError::distribution("session_turns", e))?;
        let latency = LogNormal::new(config.latency_lognorm.mu, config.latency_lognorm.sigma)
            .map_err(|e| SamplingError::distribution("latency_lognorm", e))?;

        Ok(Self {
            window_start,
            window_micros,
            channels: Categorical::new("channels", channel_weights)?,
            channel_dimension: dimensions.channels.clone(),
            locales: Categorical::from_weights("locales", &config.locales)?,
            intents,
            intent_models,
            turns,
            latency,
        })
    }

    /// Draw one start timestamp per session, uniformly within the window
    pub fn draw_start_times<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<NaiveDateTime> {
        (0..count)
            .map(|_| {
                let offset = (rng.gen::<f64>() * self.window_micros as f64).round() as i64;
                self.window_start + Duration::microseconds(offset)
            })
            .collect()
    }

    /// Draw a session length: trials until first success, plus two
    pub fn draw_turn_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        // rand_distr counts failures before the first success
        let trials = self.turns.sample(rng).saturating_add(1);
        u32::try_from(trials).unwrap_or(u32::MAX - turn_model::EXTRA_TURNS) + turn_model::EXTRA_TURNS
    }

    /// Generate `session_count` sessions over `users`, streaming turns into `sink`
    ///
    /// All start times are drawn first, then each session in order.
    #[instrument(skip(self, users, rng, sink), fields(user_count = users.len()))]
    pub fn generate<R, S>(
        &self,
        session_count: usize,
        users: &[User],
        rng: &mut R,
        sink: &mut S,
    ) -> SimulationResult<SessionOutput>
    where
        R: Rng + ?Sized,
        S: EventSink + ?Sized,
    {
        if users.is_empty() {
            return Err(SimulationError::event_generation_error(
                "Cannot generate sessions without any users",
            ));
        }

        let start_times = self.draw_start_times(session_count, rng);
        let mut output = SessionOutput {
            conversations: Vec::with_capacity(session_count),
            ..Default::default()
        };

        for (index, started_at) in start_times.into_iter().enumerate() {
            let session_id = SessionId::from_sequence(index + 1);
            self.generate_session(session_id, started_at, users, rng, sink, &mut output)?;

            if (index + 1) % 10_000 == 0 {
                debug!("Generated {} of {} sessions", index + 1, session_count);
            }
        }

        info!(
            "Generated {} sessions with {} turn events and {} intent usage rows",
            output.conversations.len(),
            output.turn_events,
            output.intent_usage.len()
        );
        Ok(output)
    }

    fn generate_session<R, S>(
        &self,
        session_id: SessionId,
        started_at: NaiveDateTime,
        users: &[User],
        rng: &mut R,
        sink: &mut S,
        output: &mut SessionOutput,
    ) -> SimulationResult<()>
    where
        R: Rng + ?Sized,
        S: EventSink + ?Sized,
    {
        let user = &users[rng.gen_range(0..users.len())];
        let channel = *self.channels.sample(rng);
        let locale = self.locales.sample(rng);
        let turns = self.draw_turn_count(rng);

        let mut counters = vec![IntentCounter::default(); self.intent_models.len()];
        let mut fallbacks = 0u32;
        let mut latency_sum = 0u64;

        for turn_index in 0..turns {
            let intent_index = *self.intents.sample(rng);
            let model = &self.intent_models[intent_index];
            let confidence = model.confidence.sample(rng);
            // The noise draw is only taken for confident turns
            let fallback = confidence < turn_model::FALLBACK_CONFIDENCE_THRESHOLD
                || rng.gen::<f64>() < turn_model::NOISE_FALLBACK_PROBABILITY;
            let latency_ms = (self.latency.sample(rng) + channel.latency_penalty_ms()) as u64;

            let event = TurnEvent {
                session_id,
                turn_id: turn_index + 1,
                ts: started_at
                    + Duration::seconds(turn_model::TURN_SPACING_SECONDS * i64::from(turn_index)),
                user_id: user.user_id,
                channel,
                locale: locale.clone(),
                intent: model.name.clone(),
                confidence: round_to(confidence, 3),
                fallback: u8::from(fallback),
                latency_ms,
                text: TurnEvent::placeholder_text(&model.name),
            };
            sink.emit(&event)?;
            output.turn_events += 1;

            let counter = &mut counters[intent_index];
            counter.turns += 1;
            counter.fallbacks += u32::from(fallback);
            fallbacks += u32::from(fallback);
            latency_sum += latency_ms;
        }

        let fallback_rate = f64::from(fallbacks) / f64::from(turns);
        output.conversations.push(ConversationFact {
            session_id,
            user_id: user.user_id,
            time_key: TimeKey::from_date(started_at.date()),
            channel_key: self.channel_dimension.key_for(channel),
            turns_count: turns,
            avg_latency_ms: (latency_sum as f64 / f64::from(turns)) as u64,
            fallback_rate: round_to(fallback_rate, 3),
            resolved_flag: u8::from(is_resolved(fallbacks)),
            satisfaction_score: satisfaction_score(fallback_rate),
        });

        output.intent_usage.extend(
            counters
                .iter()
                .zip(&self.intent_models)
                .filter(|(counter, _)| counter.turns > 0)
                .map(|(counter, model)| IntentUsageFact {
                    session_id,
                    intent_key: model.intent_key,
                    intent_turns: counter.turns,
                    intent_fallbacks: counter.fallbacks,
                }),
        );

        Ok(())
    }
}
