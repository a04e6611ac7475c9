//! Injectable randomness for policy tie-breaks

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// The only place a policy draws randomness from
///
/// Production code uses [`RngSource`]; tests swap in [`ScriptedSource`] to
/// pin every coin flip.
pub trait RandomSource: Send {
    /// Fair coin
    fn coin_flip(&mut self) -> bool;

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Pick one item uniformly from a non-empty slice
pub fn choose<T: Copy>(source: &mut dyn RandomSource, items: &[T]) -> T {
    items[source.choose_index(items.len())]
}

/// [`RandomSource`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for RngSource {
    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays fixed answers in order
///
/// Once a queue runs dry, flips answer `false` and picks answer `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    flips: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flips(flips: impl IntoIterator<Item = bool>) -> Self {
        Self {
            flips: flips.into_iter().collect(),
            picks: VecDeque::new(),
        }
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(false)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len
    }
}
