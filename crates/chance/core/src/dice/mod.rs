//! Dice configuration and rolling.
//!
//! [`Dice`] is a configured roll: how many dice, how they combine, and the
//! task context (difficulty, haste, side effect) that decides which events it
//! raises. Build one with [`DiceBuilder`], usually through
//! [`ChanceEngine::dice`](crate::ChanceEngine::dice).
mod outcome;
mod roller;
mod types;

pub use outcome::{DieValue, Outcome};
pub use roller::{Dice, DiceBuilder, RollError};
pub use types::{Difficulty, Haste, HasteSideEffect, RollType};
