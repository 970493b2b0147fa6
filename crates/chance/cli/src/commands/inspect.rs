//! Stream inspection commands
//!
//! Neither command advances the stream, so a session file is written back
//! unchanged.

use anyhow::Result;
use chance_core::{ChanceEngine, DeterministicStream, Position};
use clap::Parser;
use console::style;

/// Show upcoming values without consuming them
#[derive(Parser, Debug)]
pub struct Peek {
    /// Number of values to show
    #[arg(short, long, default_value_t = 5)]
    pub count: usize,

    /// Skip this many values first
    #[arg(short, long, default_value_t = 0)]
    pub offset: u64,

    #[command(flatten)]
    pub range: Range,
}

impl Peek {
    pub fn execute(self, engine: &ChanceEngine) -> Result<()> {
        let state = engine.state();
        let values = engine.fork_stream().peek_sequence(
            self.range.low,
            self.range.high,
            self.count,
            self.offset,
        );

        println!(
            "{} {} (+{})",
            style("Upcoming from").bold().cyan(),
            state,
            self.offset
        );
        print_values(state.position + self.offset, &values);
        Ok(())
    }
}

/// Show the values between two stream positions
#[derive(Parser, Debug)]
pub struct Replay {
    /// First position (inclusive)
    #[arg(value_name = "START")]
    pub start: Position,

    /// Last position (exclusive)
    #[arg(value_name = "END")]
    pub end: Position,

    #[command(flatten)]
    pub range: Range,
}

impl Replay {
    pub fn execute(self, engine: &ChanceEngine) -> Result<()> {
        let seed = engine.state().seed;
        let values = DeterministicStream::reproduce_sequence(
            seed,
            self.start,
            self.end,
            self.range.low,
            self.range.high,
        );

        println!(
            "{} seed {} [{}, {})",
            style("Replay of").bold().cyan(),
            seed,
            self.start,
            self.end
        );
        print_values(self.start, &values);
        Ok(())
    }
}

/// Value range, inclusive. Defaults to a six-sided die.
#[derive(clap::Args, Debug)]
pub struct Range {
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub low: i64,

    #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
    pub high: i64,
}

fn print_values(first: Position, values: &[i64]) {
    if values.is_empty() {
        println!("  {}", style("(empty)").dim());
    }
    for (position, value) in (first..).zip(values) {
        println!("  {position:>6}: {value}");
    }
}
