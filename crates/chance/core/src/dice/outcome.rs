//! Immutable roll results.

use std::fmt;

/// Face value of a single six-sided die, always in `1..=6`.
pub type DieValue = u8;

/// Result of one roll: the computed total, every die in draw order, and feedback.
///
/// Produced once by a roll and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    total: i32,
    dice: Vec<DieValue>,
    feedback: String,
}

impl Outcome {
    pub(crate) fn new(total: i32, dice: Vec<DieValue>, feedback: String) -> Self {
        Self {
            total,
            dice,
            feedback,
        }
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn dice(&self) -> &[DieValue] {
        &self.dice
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Splits the outcome into `(total, dice, feedback)`.
    pub fn into_parts(self) -> (i32, Vec<DieValue>, String) {
        (self.total, self.dice, self.feedback)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total={}, Dice=[", self.total)?;
        if self.dice.is_empty() {
            f.write_str("none")?;
        }
        for (index, die) in self.dice.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{die}")?;
        }
        write!(f, "], Feedback={:?}", self.feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_dice_in_order() {
        let outcome = Outcome::new(35, vec![3, 5], "Normal roll.".to_string());
        assert_eq!(
            outcome.to_string(),
            r#"Total=35, Dice=[3, 5], Feedback="Normal roll.""#
        );
    }

    #[test]
    fn display_marks_empty_rolls() {
        let outcome = Outcome::new(0, Vec::new(), "No dice rolled.".to_string());
        assert_eq!(
            outcome.to_string(),
            r#"Total=0, Dice=[none], Feedback="No dice rolled.""#
        );
    }
}
