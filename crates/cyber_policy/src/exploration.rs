//! Exploration strategy.
//!
//! Explore asks the model for several completions at a raised temperature,
//! keeps the ones that parse, and picks one of those uniformly at random.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::action::Action;

/// Uniform choice among `(candidate_index, action)` pairs.
pub fn sample_uniform<R: Rng + ?Sized>(
    valid: &[(usize, Action)],
    rng: &mut R,
) -> Option<(usize, Action)> {
    valid.choose(rng).cloned()
}
