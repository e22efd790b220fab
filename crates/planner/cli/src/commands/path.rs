//! Plan a route through a maze snapshot.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use planner_content::{ConfigLoader, MazeLoader};
use planner_core::{Maze, PathPlan, PathPlanner, PlannerError, Position, replay};

use super::{OutputFormat, print_json};

/// Plan a score-maximising route through a maze
#[derive(Parser)]
pub struct Path {
    /// Maze file (`.txt` grid or `.json` row list)
    #[arg(value_name = "MAZE")]
    maze: PathBuf,

    /// Planner configuration TOML
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Path {
    pub fn execute(self) -> Result<()> {
        let config = ConfigLoader::load_or_default(self.config.as_deref())?;
        let maze = MazeLoader::load(&self.maze)?;
        let planner = PathPlanner::new(config.path)?;
        let plan = planner.plan(&maze);
        if !plan.is_empty() {
            verify(&maze, &plan, &planner)?;
        }

        match self.format {
            OutputFormat::Summary => print_summary(&maze, &plan),
            OutputFormat::Json => print_json(&plan)?,
        }
        Ok(())
    }
}

/// Re-walks the route so a reported score always matches executing it.
fn verify(maze: &Maze, plan: &PathPlan, planner: &PathPlanner) -> Result<()> {
    let walked = replay(maze, plan, planner.config()).map_err(|error| {
        tracing::error!(
            code = error.error_code(),
            severity = error.severity().as_str(),
            "route failed replay: {}",
            error
        );
        anyhow::anyhow!("Route failed replay [{}]: {}", error.error_code(), error)
    })?;
    if walked.resources.score != plan.score {
        anyhow::bail!(
            "Route replays to score {}, planner reported {}",
            walked.resources.score,
            plan.score
        );
    }
    Ok(())
}

fn print_summary(maze: &Maze, plan: &PathPlan) {
    println!("{}", style("=== Route Plan ===").bold().green());
    println!(
        "{} {}x{}, start {}, end {}",
        style("Maze:").bold().cyan(),
        maze.width(),
        maze.height(),
        maze.start(),
        maze.end()
    );

    if plan.is_empty() {
        let phase = plan
            .failed_phase()
            .map_or_else(|| "unknown".to_string(), |phase| phase.to_string());
        println!(
            "{} phase {} failed",
            style("No route found:").bold().red(),
            phase
        );
        return;
    }

    println!("{} {}", style("Score:").bold().cyan(), plan.score);
    println!(
        "{} health {}, gold {}",
        style("Final budget:").bold().cyan(),
        plan.health,
        plan.gold
    );
    println!("{} {} steps", style("Length:").bold().cyan(), plan.path.len() - 1);
    println!();

    for report in &plan.phases {
        println!(
            "  {} {} → {}: tracked {}, collected {}, expanded {}",
            style(report.phase).yellow(),
            report.from,
            report.to,
            report.tracked.len(),
            report.collected.len(),
            report.stats.expanded
        );
    }
    println!();

    println!("{}", style("Route:").bold().yellow());
    let on_path: HashSet<Position> = plan.path.iter().copied().collect();
    for (y, row) in maze.to_rows().iter().enumerate() {
        let marked: String = row
            .chars()
            .enumerate()
            .map(|(x, code)| {
                let position = Position::new(x as i32, y as i32);
                if code == '.' && on_path.contains(&position) {
                    '*'
                } else {
                    code
                }
            })
            .collect();
        println!("  {marked}");
    }
}
