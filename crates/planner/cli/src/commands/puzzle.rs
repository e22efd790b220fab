//! Step the password solver over a lock definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use planner_content::PuzzleLoader;
use planner_core::{Outcome, Strategy, TraceKind};

/// Step the password solver and print its trace
#[derive(Parser)]
pub struct Puzzle {
    /// Puzzle JSON file
    #[arg(value_name = "PUZZLE")]
    puzzle: PathBuf,

    /// Search strategy: filtered, brute or brute_randomized
    #[arg(short, long, default_value = "filtered", value_parser = Strategy::from_name)]
    strategy: Strategy,

    /// Seed for the randomized strategy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Only print the final outcome
    #[arg(short, long)]
    quiet: bool,
}

impl Puzzle {
    pub fn execute(self) -> Result<()> {
        let spec = PuzzleLoader::load(&self.puzzle)?;
        let strategy = self.strategy.with_seed(self.seed);
        let mut solver = spec.solver(strategy)?;

        for trace in solver.by_ref() {
            if self.quiet {
                continue;
            }
            let line = trace.status_text();
            let line = match trace.kind {
                TraceKind::Found => style(line).bold().green(),
                TraceKind::Rejected | TraceKind::Mismatch => style(line).red(),
                TraceKind::Backtracking => style(line).dim(),
                TraceKind::Trying => style(line),
            };
            println!("{:>6}  {}", trace.tries, line);
        }

        println!();
        match solver.outcome() {
            Outcome::Solved(digits) => {
                let password: String = digits.iter().map(|digit| char::from(b'0' + digit)).collect();
                println!(
                    "{} {} after {} attempt(s) ({})",
                    style("Unlocked:").bold().green(),
                    password,
                    solver.tries(),
                    strategy
                );
            }
            Outcome::Exhausted | Outcome::Pending => {
                println!(
                    "{} no password matches after {} attempt(s) ({})",
                    style("Exhausted:").bold().red(),
                    solver.tries(),
                    strategy
                );
            }
        }
        Ok(())
    }
}
