//! Rolling commands
//!
//! Each roll prints one `Total=…, Dice=[…], Feedback=…` line and advances the
//! stream.

use anyhow::Result;
use chance_core::{
    ChanceEngine, Difficulty, Haste, HasteSideEffect, Outcome, RollError, RollType,
};
use clap::Parser;
use console::style;

use super::parse_name;

/// Roll N six-sided dice
#[derive(Parser, Debug)]
pub struct Roll {
    /// Number of dice (negative counts roll nothing)
    #[arg(value_name = "N", allow_negative_numbers = true)]
    pub n: i64,

    /// How many times to roll
    #[arg(short, long, default_value_t = 1)]
    pub times: usize,
}

impl Roll {
    pub fn execute(self, engine: &ChanceEngine) -> Result<()> {
        let dice = engine.dice().count(self.n).build();
        print_header(&dice.to_string());
        repeat(self.times, || dice.roll_detailed())
    }
}

/// Two-dice roll of a fixed type
#[derive(Parser, Debug)]
pub struct Pair {
    /// How many times to roll
    #[arg(short, long, default_value_t = 1)]
    pub times: usize,
}

impl Pair {
    pub fn execute(self, engine: &ChanceEngine, roll_type: RollType) -> Result<()> {
        let dice = engine.dice().roll_type(roll_type).build();
        print_header(&dice.to_string());
        repeat(self.times, || dice.roll_detailed())
    }
}

/// Resolve a task
#[derive(Parser, Debug)]
pub struct Task {
    /// Difficulty tier (automatic, easy, average, ... beyond_impossible)
    #[arg(value_name = "DIFFICULTY", value_parser = parse_name::<Difficulty>)]
    pub difficulty: Difficulty,

    /// Haste modifier (cautious, hasty, extra_hasty)
    #[arg(long, value_parser = parse_name::<Haste>)]
    pub haste: Option<Haste>,

    /// Consequence of haste (none, dangerous, destructive)
    #[arg(long, value_parser = parse_name::<HasteSideEffect>, default_value = "none")]
    pub side_effect: HasteSideEffect,

    /// How many times to roll
    #[arg(short, long, default_value_t = 1)]
    pub times: usize,
}

impl Task {
    pub fn execute(self, engine: &ChanceEngine) -> Result<()> {
        let mut builder = engine
            .dice()
            .difficulty(self.difficulty)
            .side_effect(self.side_effect);
        if let Some(haste) = self.haste {
            builder = builder.haste(haste);
        }
        let dice = builder.build();

        let haste = self.haste.map_or_else(String::new, |haste| format!(" {haste}"));
        print_header(&format!("{} task{haste} ({dice})", self.difficulty));
        repeat(self.times, || dice.roll_detailed())
    }
}

fn print_header(label: &str) {
    println!("{}", style(label).bold().cyan());
}

fn repeat<F>(times: usize, mut roll: F) -> Result<()>
where
    F: FnMut() -> Result<Outcome, RollError>,
{
    for _ in 0..times {
        println!("  {}", roll()?);
    }
    Ok(())
}
