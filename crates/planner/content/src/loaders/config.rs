//! Planner configuration loader.

use std::path::Path;

use planner_core::PlannerConfig;

use crate::loaders::{LoadResult, read_file, rejected};

/// Loader for planner configuration from TOML files.
///
/// Missing sections and fields fall back to their defaults, so an empty file
/// is a valid configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> LoadResult<PlannerConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PlannerConfig> {
        let config: PlannerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| rejected("planner config", e))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> LoadResult<PlannerConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(PlannerConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), PlannerConfig::default());
    }

    #[test]
    fn sections_override_individual_fields() {
        let config = ConfigLoader::parse(
            r#"
            [path]
            heuristic_weight = 1.0
            trap_gold_cost = 100

            [path.quota]
            gold = 3

            [battle]
            track_survival = true
            "#,
        )
        .unwrap();

        assert_eq!(config.path.heuristic_weight, 1.0);
        assert_eq!(config.path.trap_gold_cost, 100);
        assert_eq!(config.path.quota.gold, 3);
        assert_eq!(config.path.quota.potions, 4);
        assert!(config.battle.track_survival);
        assert_eq!(config.path.initial_health, 100);
    }

    #[test]
    fn invalid_values_fail_at_load_time() {
        let error = ConfigLoader::parse("[battle]\nmax_expansions = 0\n").unwrap_err();
        assert!(error.to_string().contains("Invalid planner config"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        std::fs::write(&path, "[path]\ninitial_gold = 0\n").unwrap();

        let config = ConfigLoader::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.path.initial_gold, 0);
        assert!(ConfigLoader::load(&dir.path().join("missing.toml")).is_err());
    }
}
