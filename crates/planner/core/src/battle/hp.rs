use std::fmt;

/// Boss hit points or damage, stored in hundredths.
///
/// Multiplier skills deal fractional damage (`1.5 * 7 = 10.5`). Keeping the
/// value as an integer count of hundredths makes that exact while states
/// stay hashable. Arithmetic saturates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "f64", from = "f64"))]
pub struct Hp(i64);

impl Hp {
    pub const ZERO: Self = Self(0);
    const SCALE: i64 = 100;

    pub const fn whole(value: i64) -> Self {
        Self(value.saturating_mul(Self::SCALE))
    }

    pub const fn from_hundredths(value: i64) -> Self {
        Self(value)
    }

    /// Rounds `value` to the nearest hundredth.
    pub fn from_f64(value: f64) -> Self {
        // `as` saturates on overflow and maps NaN to zero.
        Self((value * Self::SCALE as f64).round() as i64)
    }

    pub const fn hundredths(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Whole turns needed to deal `self` at `per_turn` damage, or `None` when
    /// `per_turn` deals nothing.
    pub fn turns_at(self, per_turn: Self) -> Option<u64> {
        if self.0 <= 0 {
            return Some(0);
        }
        if per_turn.0 <= 0 {
            return None;
        }
        let turns = self.0 / per_turn.0 + i64::from(self.0 % per_turn.0 != 0);
        u64::try_from(turns).ok()
    }
}

impl std::iter::Sum for Hp {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl From<Hp> for f64 {
    fn from(hp: Hp) -> Self {
        hp.as_f64()
    }
}

impl From<f64> for Hp {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Display for Hp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_f64(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_damage_is_exact() {
        let hit = Hp::from_f64(7.0 * 1.5);
        assert_eq!(hit, Hp::from_hundredths(1050));
        assert_eq!(hit.saturating_add(hit), Hp::whole(21));
        assert_eq!(hit.to_string(), "10.5");
    }

    #[test]
    fn turns_round_up() {
        assert_eq!(Hp::whole(21).turns_at(Hp::from_hundredths(1050)), Some(2));
        assert_eq!(Hp::whole(22).turns_at(Hp::from_hundredths(1050)), Some(3));
        assert_eq!(Hp::ZERO.turns_at(Hp::whole(5)), Some(0));
        assert_eq!(Hp::whole(5).turns_at(Hp::ZERO), None);
    }

    #[test]
    fn arithmetic_saturates() {
        let big = Hp::whole(i64::MAX);
        assert_eq!(big.saturating_add(big), Hp::from_hundredths(i64::MAX));
    }
}
