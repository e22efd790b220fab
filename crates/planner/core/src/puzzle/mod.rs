//! Steppable password solver.
//!
//! Recovers an `L`-digit password (unique digits) from its salted SHA-256
//! digest, guided by positional, parity and primality clues. The search is an
//! explicit frame stack driven one trace record at a time, so hosts can
//! animate it frame by frame and simply stop calling [`PasswordSolver::step`]
//! to cancel.

mod clue;
mod digest;
mod solver;
mod strategy;

pub use clue::{Clue, Parity};
pub use digest::{digest, digest_hex, parse_digest};
pub use solver::{Outcome, PasswordSolver, Trace, TraceKind};
pub use strategy::Strategy;

use crate::error::{ErrorSeverity, PlannerError};

/// Longest password with unique decimal digits.
pub const MAX_LENGTH: usize = 10;

/// Puzzle definition as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleSpec {
    /// Raw clue lists, see [`Clue::from_raw`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub clues: Vec<Vec<i64>>,
    /// Hex-encoded SHA-256 of `salt ∥ password`.
    pub digest: String,
    pub length: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub salt: String,
}

impl PuzzleSpec {
    /// Decodes the clues and builds a solver for `strategy`.
    pub fn solver(&self, strategy: Strategy) -> Result<PasswordSolver, PuzzleError> {
        solve(
            strategy,
            &self.clues,
            &self.digest,
            self.length,
            self.salt.as_bytes(),
        )
    }
}

/// Builds a solver from clues in their raw list form.
///
/// Iterate the result (or call [`PasswordSolver::step`]) to drive the search;
/// the last trace is `Found` on success.
pub fn solve<C: AsRef<[i64]>>(
    strategy: Strategy,
    clues: &[C],
    target_hex: &str,
    length: usize,
    salt: impl Into<Vec<u8>>,
) -> Result<PasswordSolver, PuzzleError> {
    let clues = clues
        .iter()
        .map(|raw| Clue::from_raw(raw.as_ref(), length))
        .collect::<Result<Vec<_>, _>>()?;
    PasswordSolver::new(strategy, clues, target_hex, length, salt)
}

/// Puzzle inputs rejected before the search starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("password length must be positive")]
    ZeroLength,

    #[error("password length {length} exceeds {max} unique digits")]
    TooLong { length: usize, max: usize },

    #[error("target digest is not 32 hex-encoded bytes: {0}")]
    InvalidDigest(String),

    #[error("malformed clue {clue:?}: {reason}")]
    InvalidClue {
        clue: Vec<i64>,
        reason: &'static str,
    },

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

impl PlannerError for PuzzleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use PuzzleError::*;
        match self {
            ZeroLength => "PUZZLE_ZERO_LENGTH",
            TooLong { .. } => "PUZZLE_TOO_LONG",
            InvalidDigest(_) => "PUZZLE_INVALID_DIGEST",
            InvalidClue { .. } => "PUZZLE_INVALID_CLUE",
            UnknownStrategy(_) => "PUZZLE_UNKNOWN_STRATEGY",
        }
    }
}
