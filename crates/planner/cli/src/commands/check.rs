//! Structural report for a maze snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use planner_content::MazeLoader;
use planner_core::maze::analysis::MazeReport;

use super::{OutputFormat, print_json};

/// Report reachability, isolated cells and cycles of a maze
#[derive(Parser)]
pub struct Check {
    /// Maze file (`.txt` grid or `.json` row list)
    #[arg(value_name = "MAZE")]
    maze: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let maze = MazeLoader::load(&self.maze)?;
        let report = MazeReport::inspect(&maze);

        if let OutputFormat::Json = self.format {
            return print_json(&report);
        }

        println!("{} {}", style("Maze:").bold().cyan(), self.maze.display());
        let reachable = if report.end_reachable {
            style("yes").green()
        } else {
            style("no").red()
        };
        println!("{} {}", style("End reachable:").bold().cyan(), reachable);
        if let Some(steps) = report.shortest_route {
            println!("{} {} steps", style("Shortest route:").bold().cyan(), steps);
        }
        println!(
            "{} {}",
            style("Isolated cells:").bold().cyan(),
            report.isolated.len()
        );
        for position in &report.isolated {
            println!("  {position}");
        }
        println!("{} {}", style("Has cycle:").bold().cyan(), report.has_cycle);
        Ok(())
    }
}
