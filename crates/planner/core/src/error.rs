//! Error classification shared by every planner-core error enum.
//!
//! Each module defines its own `thiserror` enum next to the inputs it checks
//! (`MazeError`, `BattleError`, `PuzzleError`, `ConfigError`, `ReplayError`).
//! Errors only come from boundary validation: a search that finds nothing
//! returns an empty result, not an `Err`.

/// How a caller should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The input is malformed; fix it and call again.
    ///
    /// Ragged maze rows, a zero-length password, an empty boss list.
    Validation,

    /// A result disagrees with the rules that produced it. Indicates a bug.
    ///
    /// A replayed route that crosses a wall or skips a phase boundary.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Implemented by every planner-core error enum.
///
/// Loaders and the CLI use [`PlannerError::error_code`] to tag messages with a
/// stable identifier such as `BATTLE_NO_SKILLS`.
pub trait PlannerError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable upper-snake identifier for the variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names() {
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
    }
}
