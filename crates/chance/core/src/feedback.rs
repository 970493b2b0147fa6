//! Descriptive feedback for finished rolls.
//!
//! [`describe`] is a pure function of the dice, the computed total and the
//! roll type. It checks rule categories in a fixed order and joins every
//! non-empty part with a single space:
//!
//! 1. uniform dice (all the same face)
//! 2. extremes (1s and 6s)
//! 3. straights
//! 4. multiples (pairs, triples, ...)
//! 5. roll-type boundaries (flux limits, digit-pair doubles)
//! 6. statistical deviation for standard rolls
//!
//! Categories 2–4 only apply when the dice are not uniform. A single die gets
//! exactly one of three verdicts and nothing else.

use crate::dice::{DieValue, RollType};

const NO_DICE: &str = "No dice rolled.";
const NORMAL: &str = "Normal roll.";

/// Approximate standard deviation of one d6 (√(35/12)).
const DIE_STD_DEV: f64 = 1.71;

/// Describes notable patterns in a roll.
pub fn describe(dice: &[DieValue], total: i32, roll_type: RollType) -> String {
    match dice {
        [] => return NO_DICE.to_string(),
        [single] => return single_die(*single).to_string(),
        _ => {}
    }

    let faces = FaceCounts::tally(dice);
    let mut parts: Vec<String> = Vec::new();

    if let Some(face) = uniform_face(dice) {
        parts.push(all_same(face, dice.len()));
    } else {
        parts.extend(extremes(&faces, dice.len()));
        parts.extend(straight(&faces, dice.len()).map(str::to_string));
        parts.extend(multiples(dice, &faces));
    }

    parts.extend(roll_type_boundary(dice, total, roll_type));

    if roll_type == RollType::Standard {
        parts.extend(statistical(total, dice.len()).map(str::to_string));
    }

    if parts.is_empty() {
        NORMAL.to_string()
    } else {
        parts.join(" ")
    }
}

/// Occurrences of each face, indexed by face value.
struct FaceCounts([usize; 7]);

impl FaceCounts {
    fn tally(dice: &[DieValue]) -> Self {
        let mut counts = [0usize; 7];
        for &die in dice {
            if let Some(slot) = counts.get_mut(usize::from(die)) {
                *slot += 1;
            }
        }
        Self(counts)
    }

    fn of(&self, face: DieValue) -> usize {
        self.0.get(usize::from(face)).copied().unwrap_or(0)
    }

    fn faces(&self) -> impl Iterator<Item = (DieValue, usize)> + '_ {
        (1..=6u8).map(|face| (face, self.of(face)))
    }
}

fn single_die(value: DieValue) -> &'static str {
    match value {
        1 => "Critical low!",
        6 => "Critical high!",
        _ => NORMAL,
    }
}

fn uniform_face(dice: &[DieValue]) -> Option<DieValue> {
    let (&first, rest) = dice.split_first()?;
    rest.iter().all(|&die| die == first).then_some(first)
}

fn all_same(face: DieValue, count: usize) -> String {
    match face {
        1 => format!("Outstanding! All {count} dice show 1!"),
        6 => format!("Disastrous! All {count} dice show 6!"),
        _ => format!("Remarkable! All {count} dice show {face}!"),
    }
}

fn extremes(faces: &FaceCounts, count: usize) -> Option<String> {
    let ones = faces.of(1);
    let sixes = faces.of(6);

    match (ones, sixes) {
        (0, 0) => None,
        (_, 0) => (ones >= count / 2)
            .then(|| format!("Lucky streak! {ones} of {count} dice are 1s.")),
        (0, _) => (sixes >= count / 2)
            .then(|| format!("Unlucky streak! {sixes} of {count} dice are 6s.")),
        _ if ones + sixes < count => Some("Wild swing! Mix of 1s and 6s.".to_string()),
        _ => Some(
            match ones.cmp(&sixes) {
                core::cmp::Ordering::Equal => "Goofy! Equal parts triumph and disaster!",
                core::cmp::Ordering::Greater => "Chaotic luck! More highs than lows!",
                core::cmp::Ordering::Less => "Chaotic doom! More lows than highs!",
            }
            .to_string(),
        ),
    }
}

fn straight(faces: &FaceCounts, count: usize) -> Option<&'static str> {
    if count < 3 {
        return None;
    }

    let (longest, _) = faces.faces().fold((0, 0), |(longest, run), (_, seen)| {
        let run = if seen > 0 { run + 1 } else { 0 };
        (longest.max(run), run)
    });

    match longest {
        4.. => Some("Straight! Four or more in sequence!"),
        3 if count <= 4 => Some("Small straight! Three in sequence."),
        _ => None,
    }
}

fn multiples(dice: &[DieValue], faces: &FaceCounts) -> Option<String> {
    let highest = faces.faces().map(|(_, seen)| seen).max().unwrap_or(0);
    let groups = faces.faces().filter(|&(_, seen)| seen >= 2).count();
    // Ties go to the face that appeared first in the roll.
    let first_with = |wanted: fn(usize) -> bool| {
        dice.iter()
            .copied()
            .find(|&die| wanted(faces.of(die)))
            .unwrap_or_default()
    };

    match highest {
        4.. => {
            let face = first_with(|seen| seen >= 4);
            Some(format!("Four of a kind! ({face}s)"))
        }
        3 => {
            let face = first_with(|seen| seen == 3);
            if groups >= 2 {
                Some(format!("Full house! Three {face}s and a pair."))
            } else {
                Some(format!("Three of a kind! ({face}s)"))
            }
        }
        _ if groups >= 2 => Some("Two pair!".to_string()),
        _ => None,
    }
}

fn roll_type_boundary(dice: &[DieValue], total: i32, roll_type: RollType) -> Option<String> {
    let fixed = match (roll_type, total) {
        (RollType::Standard, _) => None,
        (RollType::Flux, 5) => Some("Maximum positive flux!"),
        (RollType::Flux, -5) => Some("Maximum negative flux!"),
        (RollType::Flux, 0) => Some("Neutral flux."),
        (RollType::GoodFlux, 5) => Some("Maximum good flux!"),
        (RollType::GoodFlux, 0) => Some("Zero flux - perfectly balanced."),
        (RollType::BadFlux, -5) => Some("Maximum bad flux!"),
        (RollType::BadFlux, 0) => Some("Zero flux - escaped the worst."),
        (RollType::DigitPair, _) => {
            return match dice {
                [tens, units, ..] if tens == units => Some(format!("Doubles! ({tens}{units})")),
                _ if total == 11 => Some("Minimum DD roll.".to_string()),
                _ if total == 66 => Some("Maximum DD roll!".to_string()),
                _ => None,
            };
        }
        _ => None,
    };
    fixed.map(str::to_string)
}

fn statistical(total: i32, count: usize) -> Option<&'static str> {
    let min_possible = count as f64;
    let max_possible = count as f64 * 6.0;
    let expected = count as f64 * 3.5;
    let total = f64::from(total);

    if total == min_possible {
        return Some("Minimum possible roll!");
    }
    if total == max_possible {
        return Some("Maximum possible roll!");
    }

    let std_dev = DIE_STD_DEV * (count as f64).sqrt();
    let deviation = (total - expected).abs();
    let low = total < expected;

    if deviation > 2.5 * std_dev {
        Some(if low {
            "Exceptionally low roll!"
        } else {
            "Exceptionally high roll!"
        })
    } else if deviation > 2.0 * std_dev {
        Some(if low { "Very low roll." } else { "Very high roll." })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(dice: &[DieValue]) -> String {
        describe(dice, RollType::Standard.total(dice), RollType::Standard)
    }

    fn typed(roll_type: RollType, dice: &[DieValue]) -> String {
        describe(dice, roll_type.total(dice), roll_type)
    }

    #[test]
    fn empty_and_single_die() {
        assert_eq!(standard(&[]), "No dice rolled.");
        assert_eq!(standard(&[1]), "Critical low!");
        assert_eq!(standard(&[6]), "Critical high!");
        assert_eq!(standard(&[4]), "Normal roll.");
    }

    #[test]
    fn uniform_rolls() {
        assert_eq!(
            standard(&[1, 1, 1, 1]),
            "Outstanding! All 4 dice show 1! Minimum possible roll!"
        );
        assert_eq!(
            standard(&[6, 6, 6, 6]),
            "Disastrous! All 4 dice show 6! Maximum possible roll!"
        );
        assert_eq!(standard(&[3, 3, 3]), "Remarkable! All 3 dice show 3!");
    }

    #[test]
    fn mixed_extremes() {
        assert_eq!(standard(&[1, 6]), "Goofy! Equal parts triumph and disaster!");
        assert_eq!(standard(&[1, 1, 6]), "Chaotic luck! More highs than lows!");
        assert_eq!(standard(&[1, 6, 6]), "Chaotic doom! More lows than highs!");
        assert_eq!(standard(&[1, 6, 3]), "Wild swing! Mix of 1s and 6s.");
    }

    #[test]
    fn partial_streaks_use_half_rounded_down() {
        assert_eq!(standard(&[1, 1, 3, 4]), "Lucky streak! 2 of 4 dice are 1s.");
        assert_eq!(standard(&[6, 6, 5, 2]), "Unlucky streak! 2 of 4 dice are 6s.");
        // One 1 among five dice is below the threshold of two.
        assert_eq!(standard(&[1, 3, 4, 4, 5]), "Normal roll.");
    }

    #[test]
    fn straights() {
        assert_eq!(standard(&[1, 2, 3, 4]), "Straight! Four or more in sequence!");
        assert_eq!(standard(&[2, 3, 4]), "Small straight! Three in sequence.");
        // A three-run among five dice is not called out.
        assert_eq!(standard(&[2, 3, 4, 2, 4]), "Two pair!");
    }

    #[test]
    fn multiples() {
        assert_eq!(standard(&[4, 4, 4, 4, 2]), "Four of a kind! (4s)");
        assert_eq!(standard(&[2, 2, 2, 5, 5]), "Full house! Three 2s and a pair.");
        assert_eq!(standard(&[3, 3, 5, 5]), "Two pair!");
        assert_eq!(standard(&[5, 5, 5, 3, 2]), "Three of a kind! (5s)");
    }

    #[test]
    fn statistical_deviation() {
        assert_eq!(
            standard(&[1, 1, 2]),
            "Lucky streak! 2 of 3 dice are 1s. Very low roll."
        );
        assert_eq!(standard(&[6, 5, 5, 5]), "Three of a kind! (5s) Very high roll.");
        assert_eq!(
            standard(&[6, 6, 6, 5]),
            "Unlucky streak! 3 of 4 dice are 6s. Three of a kind! (6s) Exceptionally high roll!"
        );
    }

    #[test]
    fn flux_boundaries() {
        assert_eq!(
            typed(RollType::Flux, &[6, 1]),
            "Goofy! Equal parts triumph and disaster! Maximum positive flux!"
        );
        assert_eq!(
            typed(RollType::Flux, &[3, 3]),
            "Remarkable! All 2 dice show 3! Neutral flux."
        );
        assert_eq!(typed(RollType::GoodFlux, &[2, 4]), "Normal roll.");
        assert_eq!(
            typed(RollType::BadFlux, &[1, 6]),
            "Goofy! Equal parts triumph and disaster! Maximum bad flux!"
        );
    }

    #[test]
    fn digit_pairs() {
        assert_eq!(typed(RollType::DigitPair, &[3, 5]), "Normal roll.");
        assert_eq!(
            typed(RollType::DigitPair, &[4, 4]),
            "Remarkable! All 2 dice show 4! Doubles! (44)"
        );
    }

    #[test]
    fn non_standard_rolls_skip_statistics() {
        // 1+1 would be the minimum standard roll.
        assert_eq!(
            typed(RollType::GoodFlux, &[1, 1]),
            "Outstanding! All 2 dice show 1! Zero flux - perfectly balanced."
        );
    }
}
