use super::PuzzleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
}

/// A constraint on the password digits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clue {
    /// Every digit is prime (2, 3, 5 or 7).
    AllPrime,
    /// The digit at a 0-based position has the given parity.
    Parity { position: usize, parity: Parity },
    /// Fixed digits; `None` is a wildcard.
    Fixed(Vec<Option<u8>>),
}

impl Clue {
    /// Decodes the puzzle-file encoding:
    ///
    /// - `[-1, -1]`: every digit is prime
    /// - `[p, 0]` / `[p, 1]`: digit at 1-based position `p` is even / odd
    /// - `length` entries of digits or `-1` wildcards: fixed digits
    ///
    /// Two-entry lists decode as parity clues whenever they fit that shape.
    pub fn from_raw(raw: &[i64], length: usize) -> Result<Self, PuzzleError> {
        let invalid = |reason| PuzzleError::InvalidClue {
            clue: raw.to_vec(),
            reason,
        };

        if raw == [-1, -1] {
            return Ok(Clue::AllPrime);
        }

        if let &[position, flag @ (0 | 1)] = raw {
            if position >= 1 && position as usize <= length {
                let parity = if flag == 0 { Parity::Even } else { Parity::Odd };
                return Ok(Clue::Parity {
                    position: position as usize - 1,
                    parity,
                });
            }
            if raw.len() != length {
                return Err(invalid("parity position out of range"));
            }
        }

        if raw.len() != length {
            return Err(invalid("fixed-digit clue must cover every position"));
        }
        raw.iter()
            .map(|value| match *value {
                -1 => Ok(None),
                0..=9 => Ok(Some(*value as u8)),
                _ => Err(invalid("digits must be in 0..=9 or -1")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Clue::Fixed)
    }

    /// Whether `digit` may sit at `position`.
    pub fn allows(&self, position: usize, digit: u8) -> bool {
        match self {
            Clue::AllPrime => matches!(digit, 2 | 3 | 5 | 7),
            Clue::Parity {
                position: at,
                parity,
            } => {
                *at != position
                    || match parity {
                        Parity::Even => digit % 2 == 0,
                        Parity::Odd => digit % 2 == 1,
                    }
            }
            Clue::Fixed(digits) => match digits.get(position) {
                Some(Some(fixed)) => *fixed == digit,
                _ => true,
            },
        }
    }
}

/// Whether every clue allows `digit` at `position`.
pub(crate) fn all_allow(clues: &[Clue], position: usize, digit: u8) -> bool {
    clues.iter().all(|clue| clue.allows(position, digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_clue_shape() {
        assert_eq!(Clue::from_raw(&[-1, -1], 3), Ok(Clue::AllPrime));
        assert_eq!(
            Clue::from_raw(&[2, 1], 3),
            Ok(Clue::Parity {
                position: 1,
                parity: Parity::Odd
            })
        );
        assert_eq!(
            Clue::from_raw(&[-1, 4, -1], 3),
            Ok(Clue::Fixed(vec![None, Some(4), None]))
        );
    }

    #[test]
    fn rejects_malformed_clues() {
        assert!(Clue::from_raw(&[5, 0], 3).is_err());
        assert!(Clue::from_raw(&[1, 2, 3, 4], 3).is_err());
        assert!(Clue::from_raw(&[-1, 12, -1], 3).is_err());
    }

    #[test]
    fn predicates_match_their_positions() {
        let even_first = Clue::Parity {
            position: 0,
            parity: Parity::Even,
        };
        assert!(even_first.allows(0, 4));
        assert!(!even_first.allows(0, 3));
        assert!(even_first.allows(1, 3));
        assert!(!Clue::AllPrime.allows(2, 9));
    }
}
