//! Deterministic dice rolling and task resolution.
//!
//! `chance-core` draws dice from a seeded, replayable stream
//! ([`DeterministicStream`]), combines them into typed rolls ([`Dice`]),
//! describes notable patterns ([`feedback::describe`]) and notifies observers
//! of haste side effects and critical results ([`EventDispatcher`]). A
//! [`ChanceEngine`] bundles one stream with one dispatcher; any roll can be
//! reproduced from the [`StreamState`] that preceded it.
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod events;
pub mod feedback;
pub mod stream;

pub use config::{ChanceConfig, ConfigError};
pub use dice::{
    Dice, DiceBuilder, DieValue, Difficulty, Haste, HasteSideEffect, Outcome, RollError, RollType,
};
pub use engine::{ChanceEngine, default_stream, set_seed};
pub use error::{ChanceError, ErrorSeverity};
pub use events::{
    DispatchError, EventDispatcher, EventMetadata, HandlerError, HandlerId, MetadataValue,
    RollEvent, RollEventHandler, RollEventKind,
};
pub use stream::{DeterministicStream, Position, Seed, SharedStream, StreamError, StreamState};
