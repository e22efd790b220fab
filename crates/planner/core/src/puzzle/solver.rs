use tracing::debug;

use super::clue::all_allow;
use super::{Clue, MAX_LENGTH, PuzzleError, Strategy, digest, parse_digest};
use crate::rng::PcgRng;

/// Kind of step a [`Trace`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TraceKind {
    /// A prefix is entered.
    Trying,
    /// A branch was created and then failed a clue.
    Rejected,
    /// A complete attempt did not match the digest.
    Mismatch,
    /// A complete attempt matched the digest. Always the last trace.
    Found,
    /// The last digit of the attempt is being undone.
    Backtracking,
}

/// One observable search step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    pub attempt: Vec<u8>,
    pub kind: TraceKind,
    /// Complete attempts checked against the digest so far.
    pub tries: u64,
}

impl Trace {
    /// Human-readable status line for visualisation.
    pub fn status_text(&self) -> String {
        let attempt = &self.attempt;
        match self.kind {
            TraceKind::Trying => format!("Trying: {attempt:?}"),
            TraceKind::Rejected => format!("Rejected: {attempt:?}"),
            TraceKind::Mismatch => format!("Mismatch: {attempt:?}"),
            TraceKind::Found => format!("Found Solution: {attempt:?}"),
            TraceKind::Backtracking => format!("Backtracking from {attempt:?}"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == TraceKind::Found
    }
}

/// Terminal state of a solver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Pending,
    Solved(Vec<u8>),
    Exhausted,
}

/// Digits still to try at one position.
#[derive(Clone, Debug)]
struct Frame {
    candidates: Vec<u8>,
    next: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Enter,
    Verify,
    Advance,
    DropRejected,
    Return,
    Done,
}

/// Backtracking password search as a resumable state machine.
///
/// Each call to [`PasswordSolver::step`] (or `Iterator::next`) performs one
/// search step and returns its trace. Digits never repeat within an attempt.
/// The search ends after a `Found` trace or when every branch is exhausted,
/// after which `step` keeps returning `None`.
#[derive(Clone, Debug)]
pub struct PasswordSolver {
    strategy: Strategy,
    clues: Vec<Clue>,
    target: [u8; 32],
    length: usize,
    salt: Vec<u8>,
    rng: PcgRng,
    path: Vec<u8>,
    frames: Vec<Frame>,
    next_step: Step,
    tries: u64,
    outcome: Outcome,
}

impl PasswordSolver {
    pub fn new(
        strategy: Strategy,
        clues: Vec<Clue>,
        target_hex: &str,
        length: usize,
        salt: impl Into<Vec<u8>>,
    ) -> Result<Self, PuzzleError> {
        if length == 0 {
            return Err(PuzzleError::ZeroLength);
        }
        if length > MAX_LENGTH {
            return Err(PuzzleError::TooLong {
                length,
                max: MAX_LENGTH,
            });
        }
        let target = parse_digest(target_hex)?;
        let seed = match strategy {
            Strategy::BruteRandomized { seed } => seed,
            _ => 0,
        };

        Ok(Self {
            strategy,
            clues,
            target,
            length,
            salt: salt.into(),
            rng: PcgRng::new(seed),
            path: Vec::with_capacity(length),
            frames: Vec::with_capacity(length),
            next_step: Step::Enter,
            tries: 0,
            outcome: Outcome::Pending,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn tries(&self) -> u64 {
        self.tries
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.next_step == Step::Done
    }

    /// Runs the search to completion, discarding traces.
    pub fn run(&mut self) -> &Outcome {
        while self.step().is_some() {}
        &self.outcome
    }

    /// Advances one step.
    pub fn step(&mut self) -> Option<Trace> {
        loop {
            match self.next_step {
                Step::Done => return None,

                Step::Enter => {
                    let trace = self.trace(TraceKind::Trying);
                    if self.path.len() == self.length {
                        self.next_step = Step::Verify;
                    } else {
                        let frame = self.frame(self.path.len());
                        self.frames.push(frame);
                        self.next_step = Step::Advance;
                    }
                    return Some(trace);
                }

                Step::Verify => {
                    self.tries += 1;
                    if digest(&self.salt, &self.path) == self.target {
                        debug!(tries = self.tries, strategy = %self.strategy, "password found");
                        self.outcome = Outcome::Solved(self.path.clone());
                        self.next_step = Step::Done;
                        return Some(self.trace(TraceKind::Found));
                    }
                    self.next_step = Step::Return;
                    return Some(self.trace(TraceKind::Mismatch));
                }

                Step::Advance => match self.next_candidate() {
                    Some(digit) => {
                        let position = self.path.len();
                        self.path.push(digit);
                        if self.strategy.checks_after_branching()
                            && !all_allow(&self.clues, position, digit)
                        {
                            self.next_step = Step::DropRejected;
                            return Some(self.trace(TraceKind::Rejected));
                        }
                        self.next_step = Step::Enter;
                    }
                    None => {
                        self.frames.pop();
                        self.next_step = Step::Return;
                    }
                },

                Step::DropRejected => {
                    self.path.pop();
                    self.next_step = Step::Advance;
                }

                Step::Return => {
                    if self.path.is_empty() {
                        debug!(tries = self.tries, strategy = %self.strategy, "password search exhausted");
                        self.outcome = Outcome::Exhausted;
                        self.next_step = Step::Done;
                        return None;
                    }
                    let trace = self.trace(TraceKind::Backtracking);
                    self.path.pop();
                    self.next_step = Step::Advance;
                    return Some(trace);
                }
            }
        }
    }

    fn trace(&self, kind: TraceKind) -> Trace {
        Trace {
            attempt: self.path.clone(),
            kind,
            tries: self.tries,
        }
    }

    fn frame(&mut self, position: usize) -> Frame {
        let mut candidates: Vec<u8> = (0..=9).collect();
        match self.strategy {
            Strategy::Filtered => {
                candidates.retain(|digit| all_allow(&self.clues, position, *digit));
            }
            Strategy::Brute => {}
            Strategy::BruteRandomized { .. } => self.rng.shuffle(&mut candidates),
        }
        Frame {
            candidates,
            next: 0,
        }
    }

    /// Next digit of the top frame not already used in the attempt.
    fn next_candidate(&mut self) -> Option<u8> {
        let frame = self.frames.last_mut()?;
        while let Some(&digit) = frame.candidates.get(frame.next) {
            frame.next += 1;
            if !self.path.contains(&digit) {
                return Some(digit);
            }
        }
        None
    }
}

impl Iterator for PasswordSolver {
    type Item = Trace;

    fn next(&mut self) -> Option<Trace> {
        self.step()
    }
}
