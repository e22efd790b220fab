//! Subcommand implementations.
//!
//! Each command owns its CLI args and execution logic. Load and validation
//! failures are returned as errors; a planner finding no solution is printed
//! and is not an error.

mod battle;
mod check;
mod path;
mod puzzle;

pub use battle::Battle;
pub use check::Check;
pub use path::Path;
pub use puzzle::Puzzle;

/// Output format shared by the planning commands.
#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
