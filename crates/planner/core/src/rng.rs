//! Deterministic random number generation for reproducible search orders.
//!
//! The randomized puzzle strategy shuffles candidate digits at every position.
//! Hosts animate the search step by step, so the same seed must replay the
//! exact same trace.

/// Seeded PCG-XSH-RR stream (64-bit state, 32-bit output).
///
/// See <https://www.pcg-random.org/>.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed, mixing it so nearby seeds diverge.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::mix(seed),
        }
    }

    /// SplitMix64 finaliser applied to the seed.
    fn mix(seed: u64) -> u64 {
        let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        hash
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    /// Uniform value in `0..upper`. Returns 0 when `upper <= 1`.
    pub fn below(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % upper
    }

    /// In-place Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
