//! Plan a battle from a scenario file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use planner_content::{ConfigLoader, ScenarioLoader};
use planner_core::{BattlePlan, BattlePlanner, BattleScenario, estimate_turns};

use super::{OutputFormat, print_json};

/// Find the minimum-turn winning sequence for a battle scenario
#[derive(Parser)]
pub struct Battle {
    /// Scenario JSON file
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Only accept sequences the combatant survives
    #[arg(long)]
    survival: bool,

    /// Planner configuration TOML
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Battle {
    pub fn execute(self) -> Result<()> {
        let config = ConfigLoader::load_or_default(self.config.as_deref())?;
        let scenario = ScenarioLoader::load(&self.scenario)?;

        let mut battle_config = config.battle;
        if self.survival {
            battle_config = battle_config.with_survival(true);
        }
        let plan = BattlePlanner::new(battle_config)?.plan(&scenario)?;

        match self.format {
            OutputFormat::Summary => print_summary(&scenario, &plan),
            OutputFormat::Json => print_json(&plan)?,
        }
        Ok(())
    }
}

fn print_summary(scenario: &BattleScenario, plan: &BattlePlan) {
    println!("{}", style("=== Battle Plan ===").bold().green());
    println!(
        "{} {} phase(s), {:.1} turns estimated",
        style("Bosses:").bold().cyan(),
        scenario.bosses.len(),
        estimate_turns(scenario)
    );

    let Some(turns) = plan.turns else {
        println!("{}", style("No winning sequence found").bold().red());
        println!("  Fallback action: attack");
        print_stats(plan);
        return;
    };

    println!("{} {}", style("Turns:").bold().cyan(), turns);
    let labels: Vec<&str> = plan
        .sequence
        .iter()
        .map(|action| action.label(&scenario.skills, &scenario.trades))
        .collect();
    println!("{} {}", style("Sequence:").bold().cyan(), labels.join(" → "));
    let survives = if plan.survives {
        style("yes").green()
    } else {
        style("no").red()
    };
    println!("{} {}", style("Survives:").bold().cyan(), survives);
    println!("{} {}", style("Health lost:").bold().cyan(), plan.health_lost);
    if plan.truncated {
        println!(
            "{}",
            style("Expansion limit reached; the plan may not be optimal").yellow()
        );
    }
    println!();

    println!("{}", style("Turn log:").bold().yellow());
    for record in &plan.log {
        println!(
            "  {:>3}. {:<12} dmg {:>4}  boss #{} hp {:>4}  took {:>3}  hp {:>4}  gold {:>4}",
            record.turn,
            record.label,
            record.damage,
            record.boss_index,
            record.boss_hp,
            record.retaliation,
            record.player_hp,
            record.gold
        );
    }
    println!();
    print_stats(plan);
}

fn print_stats(plan: &BattlePlan) {
    println!(
        "{} expanded {}, pushed {}, pruned {}",
        style("Search:").dim(),
        plan.stats.expanded,
        plan.stats.pushed,
        plan.stats.pruned
    );
}
