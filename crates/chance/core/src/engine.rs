//! Engine context tying one stream to one event dispatcher.

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::config::ChanceConfig;
use crate::dice::{DiceBuilder, Difficulty, Haste, HasteSideEffect, Outcome, RollError, RollType};
use crate::events::EventDispatcher;
use crate::stream::{self, DeterministicStream, Seed, SharedStream, StreamState};

/// A stream and the dispatcher its rolls report to.
///
/// Cloning an engine shares both; use [`fork_stream`](Self::fork_stream) for
/// an independent copy of the sequence.
#[derive(Clone, Debug)]
pub struct ChanceEngine {
    stream: SharedStream,
    dispatcher: Arc<EventDispatcher>,
}

impl ChanceEngine {
    /// Engine over a fresh stream seeded with `seed`.
    pub fn new(seed: Seed) -> Self {
        Self::with_stream(DeterministicStream::new(seed).into_shared())
    }

    /// Engine over an existing stream, with an empty dispatcher.
    pub fn with_stream(stream: SharedStream) -> Self {
        Self {
            stream,
            dispatcher: Arc::new(EventDispatcher::new()),
        }
    }

    pub fn from_config(config: &ChanceConfig) -> Self {
        let state = config.initial_state();
        debug!(%state, "creating chance engine");
        Self::with_stream(DeterministicStream::from_state(state).into_shared())
    }

    /// Process-wide engine, configured from the environment on first use.
    ///
    /// Invalid configuration is logged and replaced by the defaults.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<ChanceEngine> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let config = ChanceConfig::from_env().unwrap_or_else(|err| {
                warn!(error = %err, "ignoring invalid chance configuration");
                ChanceConfig::default()
            });
            Self::from_config(&config)
        })
    }

    pub fn stream(&self) -> &SharedStream {
        &self.stream
    }

    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    /// Current `(seed, position)` of the shared stream.
    pub fn state(&self) -> StreamState {
        stream::lock(&self.stream).state()
    }

    /// Replaces the shared stream's sequence with a fresh one for `seed`.
    ///
    /// Every roller holding this engine's stream observes the new sequence.
    pub fn set_seed(&self, seed: Seed) {
        *stream::lock(&self.stream) = DeterministicStream::new(seed);
        debug!(seed, "reseeded chance engine");
    }

    /// Moves the shared stream to `state`.
    pub fn restore(&self, state: StreamState) {
        *stream::lock(&self.stream) = DeterministicStream::from_state(state);
        debug!(%state, "restored chance engine");
    }

    /// Independent copy of the shared stream at its current position.
    pub fn fork_stream(&self) -> DeterministicStream {
        stream::lock(&self.stream).fork()
    }

    /// Starts configuring a roll on this engine's stream and dispatcher.
    pub fn dice(&self) -> DiceBuilder {
        DiceBuilder::new(Arc::clone(&self.stream), Arc::clone(&self.dispatcher))
    }

    /// Rolls `n` standard dice.
    pub fn roll_nd(&self, n: i64) -> Result<Outcome, RollError> {
        self.dice().count(n).build().roll_detailed()
    }

    pub fn flux(&self) -> Result<Outcome, RollError> {
        self.typed(RollType::Flux)
    }

    pub fn good_flux(&self) -> Result<Outcome, RollError> {
        self.typed(RollType::GoodFlux)
    }

    pub fn bad_flux(&self) -> Result<Outcome, RollError> {
        self.typed(RollType::BadFlux)
    }

    pub fn digit_pair(&self) -> Result<Outcome, RollError> {
        self.typed(RollType::DigitPair)
    }

    /// Task check: dice from difficulty and haste, events from the side effect.
    pub fn task(
        &self,
        difficulty: Difficulty,
        haste: Option<Haste>,
        side_effect: HasteSideEffect,
    ) -> Result<Outcome, RollError> {
        let mut builder = self.dice().difficulty(difficulty).side_effect(side_effect);
        if let Some(haste) = haste {
            builder = builder.haste(haste);
        }
        builder.build().roll_detailed()
    }

    fn typed(&self, roll_type: RollType) -> Result<Outcome, RollError> {
        self.dice().roll_type(roll_type).build().roll_detailed()
    }
}

/// Stream of the process-wide engine.
pub fn default_stream() -> &'static SharedStream {
    ChanceEngine::global().stream()
}

/// Reseeds the process-wide engine.
pub fn set_seed(seed: Seed) {
    ChanceEngine::global().set_seed(seed);
}
