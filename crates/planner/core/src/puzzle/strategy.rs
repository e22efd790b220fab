use super::PuzzleError;

/// How candidate digits are generated at each position.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Strategy {
    /// Only digits every clue allows are branched on.
    #[default]
    Filtered,
    /// All ten digits in ascending order; clues are checked after branching.
    Brute,
    /// As `Brute`, with digits shuffled per position from a seeded generator.
    /// Parsing yields seed 0; see [`Strategy::with_seed`].
    #[strum(to_string = "brute_randomized", serialize = "random")]
    BruteRandomized { seed: u64 },
}

impl Strategy {
    /// Replaces the seed of a randomized strategy; other strategies are returned as is.
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            Strategy::BruteRandomized { .. } => Strategy::BruteRandomized { seed },
            other => other,
        }
    }

    /// Parses a strategy name, reporting unknown names as [`PuzzleError::UnknownStrategy`].
    pub fn from_name(name: &str) -> Result<Self, PuzzleError> {
        name.parse()
            .map_err(|_: strum::ParseError| PuzzleError::UnknownStrategy(name.to_string()))
    }

    /// Whether clue violations are detected after a branch is created.
    pub fn checks_after_branching(&self) -> bool {
        !matches!(self, Strategy::Filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("filtered".parse::<Strategy>(), Ok(Strategy::Filtered));
        assert_eq!("Brute".parse::<Strategy>(), Ok(Strategy::Brute));
        assert_eq!(
            "brute_randomized".parse::<Strategy>(),
            Ok(Strategy::BruteRandomized { seed: 0 })
        );
        assert_eq!(
            Strategy::from_name("random").map(|s| s.with_seed(9)),
            Ok(Strategy::BruteRandomized { seed: 9 })
        );
        assert_eq!(
            Strategy::from_name("greedy"),
            Err(PuzzleError::UnknownStrategy("greedy".to_string()))
        );
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(Strategy::BruteRandomized { seed: 1 }.to_string(), "brute_randomized");
    }
}
