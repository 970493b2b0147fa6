//! Roll composition: configuration, drawing, totals, feedback and events.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::outcome::{DieValue, Outcome};
use super::types::{Difficulty, Haste, HasteSideEffect, RollType};
use crate::error::{ChanceError, ErrorSeverity};
use crate::events::{DispatchError, EventDispatcher, EventMetadata, RollEvent, RollEventKind, keys};
use crate::feedback;
use crate::stream::{self, SharedStream};

/// Dice rolled when neither a count nor a difficulty is configured.
const DEFAULT_DICE: usize = 2;

/// Errors surfaced by [`Dice::roll_detailed`].
#[derive(Debug, thiserror::Error)]
pub enum RollError {
    /// The roll completed but an event handler failed.
    ///
    /// The outcome is final; only event delivery is incomplete.
    #[error("roll completed ({outcome}) but event delivery failed: {source}")]
    Dispatch {
        outcome: Outcome,
        #[source]
        source: DispatchError,
    },
}

impl RollError {
    /// The outcome computed before the failure.
    pub fn outcome(&self) -> &Outcome {
        match self {
            Self::Dispatch { outcome, .. } => outcome,
        }
    }

    pub fn into_outcome(self) -> Outcome {
        match self {
            Self::Dispatch { outcome, .. } => outcome,
        }
    }
}

impl ChanceError for RollError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Dispatch { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Dispatch { .. } => "ROLL_DISPATCH_FAILED",
        }
    }
}

/// Builder for [`Dice`].
///
/// An explicit count wins over difficulty and haste; a two-dice roll type wins
/// over both.
#[derive(Clone, Debug)]
#[must_use]
pub struct DiceBuilder {
    count: Option<i64>,
    difficulty: Option<Difficulty>,
    haste: Option<Haste>,
    side_effect: HasteSideEffect,
    roll_type: RollType,
    stream: SharedStream,
    dispatcher: Arc<EventDispatcher>,
}

impl DiceBuilder {
    /// Starts a configuration drawing from `stream` and notifying `dispatcher`.
    pub fn new(stream: SharedStream, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            count: None,
            difficulty: None,
            haste: None,
            side_effect: HasteSideEffect::None,
            roll_type: RollType::Standard,
            stream,
            dispatcher,
        }
    }

    /// Explicit number of dice. Negative counts are clamped to zero.
    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn haste(mut self, haste: Haste) -> Self {
        self.haste = Some(haste);
        self
    }

    pub fn side_effect(mut self, side_effect: HasteSideEffect) -> Self {
        self.side_effect = side_effect;
        self
    }

    pub fn roll_type(mut self, roll_type: RollType) -> Self {
        self.roll_type = roll_type;
        self
    }

    /// Draws from `stream` instead of the default one.
    pub fn stream(mut self, stream: SharedStream) -> Self {
        self.stream = stream;
        self
    }

    fn dice_count(&self) -> usize {
        if let Some(fixed) = self.roll_type.fixed_dice() {
            return fixed;
        }
        if let Some(count) = self.count {
            return usize::try_from(count.max(0)).unwrap_or(usize::MAX);
        }
        match self.difficulty {
            Some(difficulty) => usize::from(difficulty.dice_with(self.haste)),
            None => DEFAULT_DICE,
        }
    }

    pub fn build(self) -> Dice {
        Dice {
            n: self.dice_count(),
            roll_type: self.roll_type,
            difficulty: self.difficulty,
            haste: self.haste,
            side_effect: self.side_effect,
            stream: self.stream,
            dispatcher: self.dispatcher,
        }
    }
}

/// A configured roll.
///
/// Each call to [`roll_detailed`](Self::roll_detailed) is an independent
/// transaction: draw, total, describe, dispatch, return. The only state
/// carried between calls is the stream's position.
#[derive(Clone, Debug)]
pub struct Dice {
    n: usize,
    roll_type: RollType,
    difficulty: Option<Difficulty>,
    haste: Option<Haste>,
    side_effect: HasteSideEffect,
    stream: SharedStream,
    dispatcher: Arc<EventDispatcher>,
}

impl Dice {
    /// Number of dice this roll draws.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn roll_type(&self) -> RollType {
        self.roll_type
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn haste(&self) -> Option<Haste> {
        self.haste
    }

    pub fn side_effect(&self) -> HasteSideEffect {
        self.side_effect
    }

    /// Rolls and returns only the total.
    pub fn roll(&self) -> Result<i32, RollError> {
        self.roll_detailed().map(|outcome| outcome.total())
    }

    /// Rolls, describes the result and notifies observers.
    ///
    /// The stream lock is held while drawing, so the dice of one roll occupy
    /// consecutive stream positions even when the stream is shared.
    pub fn roll_detailed(&self) -> Result<Outcome, RollError> {
        let dice = self.draw();
        let total = self.roll_type.total(&dice);
        let feedback = feedback::describe(&dice, total, self.roll_type);
        let outcome = Outcome::new(total, dice, feedback);

        debug!(
            roll = %self,
            total,
            dice = ?outcome.dice(),
            feedback = outcome.feedback(),
            "rolled"
        );

        match self.notify(&outcome) {
            Ok(()) => Ok(outcome),
            Err(source) => Err(RollError::Dispatch { outcome, source }),
        }
    }

    fn draw(&self) -> Vec<DieValue> {
        if self.n == 0 {
            return Vec::new();
        }
        let mut stream = stream::lock(&self.stream);
        stream
            .draws(1, 6)
            .take(self.n)
            .map(|value| value as DieValue)
            .collect()
    }

    fn notify(&self, outcome: &Outcome) -> Result<(), DispatchError> {
        for event in self.triggered_events(outcome) {
            self.dispatcher.dispatch(&event)?;
        }
        Ok(())
    }

    /// Events raised by `outcome` under this configuration, in dispatch order.
    fn triggered_events(&self, outcome: &Outcome) -> Vec<RollEvent> {
        let mut events = Vec::new();
        let task_event = |kind| {
            RollEvent::new(kind)
                .with_outcome(outcome.clone())
                .with_task(self.difficulty, self.haste)
        };

        let haste_kind = match self.side_effect {
            HasteSideEffect::None => None,
            HasteSideEffect::Dangerous => Some(RollEventKind::DangerousHaste),
            HasteSideEffect::Destructive => Some(RollEventKind::DestructiveHaste),
        };
        if let Some(kind) = haste_kind {
            events.push(
                task_event(kind).with_metadata(
                    EventMetadata::new()
                        .with(keys::DICE_COUNT, self.n)
                        .with(keys::SIDE_EFFECT, self.side_effect),
                ),
            );
        }

        let critical = match outcome.dice() {
            [first, rest @ ..] if !rest.is_empty() && rest.iter().all(|die| die == first) => {
                match first {
                    1 => Some((RollEventKind::CriticalSuccess, keys::ALL_ONES)),
                    6 => Some((RollEventKind::CriticalFailure, keys::ALL_SIXES)),
                    _ => None,
                }
            }
            _ => None,
        };
        if let Some((kind, key)) = critical {
            events.push(task_event(kind).with_metadata(EventMetadata::new().with(key, true)));
        }

        events
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.roll_type {
            RollType::Standard => write!(f, "{}D6", self.n),
            other => write!(f, "{other}"),
        }
    }
}
