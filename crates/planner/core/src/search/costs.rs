use std::collections::HashMap;
use std::hash::Hash;

/// Visited map that retains only the dominant cost seen for each state.
///
/// The battle planner keeps the lowest turn count per state
/// ([`BestCosts::offer_lower`]); the path planner keeps the highest score per
/// state ([`BestCosts::offer_higher`]).
#[derive(Debug, Clone)]
pub struct BestCosts<S, C> {
    best: HashMap<S, C>,
}

impl<S, C> BestCosts<S, C>
where
    S: Eq + Hash,
    C: PartialOrd + Copy,
{
    pub fn new() -> Self {
        Self {
            best: HashMap::new(),
        }
    }

    /// Records `cost` if it is strictly lower than the stored cost.
    ///
    /// Returns `false` when the state was already reached at an equal or lower cost.
    pub fn offer_lower(&mut self, state: S, cost: C) -> bool {
        self.offer(state, cost, |new, old| new < old)
    }

    /// Records `cost` if it is strictly higher than the stored cost.
    ///
    /// Returns `false` when the state was already reached at an equal or higher cost.
    pub fn offer_higher(&mut self, state: S, cost: C) -> bool {
        self.offer(state, cost, |new, old| new > old)
    }

    fn offer(&mut self, state: S, cost: C, better: impl Fn(&C, &C) -> bool) -> bool {
        match self.best.get_mut(&state) {
            Some(stored) if !better(&cost, stored) => false,
            Some(stored) => {
                *stored = cost;
                true
            }
            None => {
                self.best.insert(state, cost);
                true
            }
        }
    }

    pub fn get(&self, state: &S) -> Option<C> {
        self.best.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

impl<S, C> Default for BestCosts<S, C>
where
    S: Eq + Hash,
    C: PartialOrd + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
