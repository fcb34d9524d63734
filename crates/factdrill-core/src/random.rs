//! Random Sources
//!
//! Every nondeterministic step in the engine (the pre-sort shuffle, the
//! weighted format draw, and which factor a prompt shows) pulls from a
//! [`RandomSource`] passed in by the caller. Any `rand` generator works
//! as-is; [`FixedRoll`] pins the roll for replayable drills.

use rand::Rng;
use rand::RngCore;

/// A source of uniform rolls in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// A source that yields the same roll forever.
///
/// With a roll of `0.0` the shuffle is a fixed permutation and the weighted
/// draw always lands on the first eligible format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRoll(pub f64);

impl RandomSource for FixedRoll {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// The default source: the thread-local system generator.
pub fn system_source() -> rand::rngs::ThreadRng {
    rand::thread_rng()
}

/// Uniform index in `0..len` from a single roll.
///
/// Clamped so a roll of exactly `1.0` from a hand-written source cannot
/// index past the end.
pub(crate) fn roll_index(random: &mut impl RandomSource, len: usize) -> usize {
    debug_assert!(len > 0);
    let index = (random.next_unit() * len as f64).floor() as usize;
    index.min(len - 1)
}

/// In-place Fisher-Yates shuffle driven by a [`RandomSource`].
///
/// `rand::seq::SliceRandom::shuffle` needs an `Rng`, which [`FixedRoll`] is not.
pub fn shuffle<T>(items: &mut [T], random: &mut impl RandomSource) {
    for i in (1..items.len()).rev() {
        let j = roll_index(random, i + 1);
        items.swap(i, j);
    }
}
