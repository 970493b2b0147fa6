//! `chance`: roll dice from a replayable stream.
//!
//! Run with: `chance --seed 42 roll 3`

mod commands;
mod observers;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use chance_core::{ChanceConfig, ChanceEngine, RollType, Seed, StreamState};
use clap::Parser;
use commands::{Pair, Peek, Replay, Roll, Task};

/// Deterministic dice roller
#[derive(Parser)]
#[command(name = "chance")]
#[command(about = "Deterministic, replayable dice rolls", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed the stream (overrides CHANCE_SEED and any session file)
    #[arg(long, global = true, value_name = "SEED", conflicts_with = "state")]
    seed: Option<Seed>,

    /// Start from a saved stream state
    #[arg(long, global = true, value_name = "SEED:POSITION")]
    state: Option<StreamState>,

    /// JSON file holding the stream state; loaded if present, written after the command
    #[arg(long, global = true, value_name = "FILE")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Roll N six-sided dice and sum them
    Roll(Roll),

    /// Roll D1 - D2 (range -5 to +5)
    Flux(Pair),

    /// Roll |D1 - D2| (range 0 to +5)
    GoodFlux(Pair),

    /// Roll -|D1 - D2| (range -5 to 0)
    BadFlux(Pair),

    /// Roll two dice read as a two-digit number (11 to 66)
    Dd(Pair),

    /// Resolve a task from its difficulty and haste
    Task(Task),

    /// Show upcoming values without consuming them
    Peek(Peek),

    /// Show the values between two stream positions
    Replay(Replay),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for CHANCE_SEED and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = ChanceEngine::from_config(&starting_config(&cli)?);
    observers::install(engine.dispatcher());

    match cli.command {
        Command::Roll(cmd) => cmd.execute(&engine),
        Command::Flux(cmd) => cmd.execute(&engine, RollType::Flux),
        Command::GoodFlux(cmd) => cmd.execute(&engine, RollType::GoodFlux),
        Command::BadFlux(cmd) => cmd.execute(&engine, RollType::BadFlux),
        Command::Dd(cmd) => cmd.execute(&engine, RollType::DigitPair),
        Command::Task(cmd) => cmd.execute(&engine),
        Command::Peek(cmd) => cmd.execute(&engine),
        Command::Replay(cmd) => cmd.execute(&engine),
    }?;

    if let Some(path) = &cli.session {
        session::save(path, engine.state())?;
    }
    Ok(())
}

/// Picks the starting state: `--state`, then `--seed`, then the session file,
/// then the environment.
fn starting_config(cli: &Cli) -> Result<ChanceConfig> {
    if let Some(state) = cli.state {
        return Ok(ChanceConfig::default()
            .with_seed(state.seed)
            .with_position(state.position));
    }
    if let Some(seed) = cli.seed {
        return Ok(ChanceConfig::default().with_seed(seed));
    }
    if let Some(path) = &cli.session
        && let Some(state) = session::load(path)?
    {
        return Ok(ChanceConfig::default()
            .with_seed(state.seed)
            .with_position(state.position));
    }
    Ok(ChanceConfig::from_env()?)
}
