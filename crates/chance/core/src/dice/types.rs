//! Roll configuration vocabulary: difficulty tiers, haste, side effects, roll types.

use super::outcome::DieValue;

/// Task difficulty tier. The numeric value is the base number of dice rolled.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Difficulty {
    Automatic = 0,
    Easy = 1,
    #[default]
    Average = 2,
    Difficult = 3,
    Formidable = 4,
    Staggering = 5,
    Hopeless = 6,
    Impossible = 7,
    BeyondImpossible = 8,
}

impl Difficulty {
    /// Base number of dice for a task at this difficulty.
    pub const fn dice(self) -> u8 {
        self as u8
    }

    /// Number of dice after applying `haste`, clamped to the difficulty scale.
    pub fn dice_with(self, haste: Option<Haste>) -> u8 {
        let modifier = haste.map_or(0, Haste::modifier);
        let count = i16::from(self.dice()) + i16::from(modifier);
        count.clamp(
            i16::from(Self::Automatic.dice()),
            i16::from(Self::BeyondImpossible.dice()),
        ) as u8
    }
}

/// Time-pressure modifier added to a task's difficulty.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(i8)]
pub enum Haste {
    Cautious = -1,
    Hasty = 1,
    ExtraHasty = 2,
}

impl Haste {
    /// Signed change in dice count.
    pub const fn modifier(self) -> i8 {
        self as i8
    }
}

/// Consequence attached to a hasty task, orthogonal to the dice count.
///
/// Side effects never change how many dice are rolled; they only raise events.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HasteSideEffect {
    #[default]
    None,
    /// May injure whoever performs the task.
    Dangerous,
    /// May damage the equipment used for the task.
    Destructive,
}

/// How individual dice combine into a total.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RollType {
    /// Sum of all dice.
    #[default]
    Standard,
    /// First die minus second. Range -5..=5.
    Flux,
    /// Larger die minus smaller. Range 0..=5.
    GoodFlux,
    /// Smaller die minus larger. Range -5..=0.
    BadFlux,
    /// Two dice read as decimal digits ("DD"). Range 11..=66.
    #[strum(to_string = "digit_pair", serialize = "dd")]
    DigitPair,
}

impl RollType {
    /// Dice count imposed by the roll type, overriding any configured count.
    pub const fn fixed_dice(self) -> Option<usize> {
        match self {
            Self::Standard => None,
            Self::Flux | Self::GoodFlux | Self::BadFlux | Self::DigitPair => Some(2),
        }
    }

    /// Computes the total for `dice` under this roll type.
    ///
    /// Two-dice types read only the first two values; given fewer than two
    /// dice they have no defined total and yield 0.
    pub fn total(self, dice: &[DieValue]) -> i32 {
        match (self, dice) {
            (Self::Standard, _) => dice.iter().map(|&d| i32::from(d)).sum(),
            (Self::Flux, [first, second, ..]) => i32::from(*first) - i32::from(*second),
            (Self::GoodFlux, [first, second, ..]) => (i32::from(*first) - i32::from(*second)).abs(),
            (Self::BadFlux, [first, second, ..]) => -(i32::from(*first) - i32::from(*second)).abs(),
            (Self::DigitPair, [tens, units, ..]) => i32::from(*tens) * 10 + i32::from(*units),
            _ => 0,
        }
    }
}
