//! Command-line front end for the maze planners.
//!
//! Run with: `maze-planner <command>`. Set `RUST_LOG=debug` for search
//! diagnostics on stderr.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Battle, Check, Path, Puzzle};

/// AI planning toolkit for the maze game
#[derive(Parser)]
#[command(name = "maze-planner")]
#[command(about = "Battle, route and password planners for the maze game", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Find the minimum-turn winning sequence for a battle scenario
    Battle(Battle),

    /// Plan a score-maximising route through a maze
    Path(Path),

    /// Step the password solver and print its trace
    Puzzle(Puzzle),

    /// Report reachability, isolated cells and cycles of a maze
    Check(Check),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Battle(cmd) => cmd.execute(),
        Command::Path(cmd) => cmd.execute(),
        Command::Puzzle(cmd) => cmd.execute(),
        Command::Check(cmd) => cmd.execute(),
    }
}
