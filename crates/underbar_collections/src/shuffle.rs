//! Random permutations of sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use underbar_foundation::{Result, Value};

use crate::source::expect_sequence;

/// Returns a uniformly shuffled copy of `sequence` using Fisher-Yates.
///
/// The input is left untouched.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn shuffle<R: Rng + ?Sized>(sequence: &Value, rng: &mut R) -> Result<Value> {
    let items = expect_sequence(sequence, "shuffle")?;
    let mut shuffled: Vec<Value> = items.iter().cloned().collect();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    Ok(Value::Vec(shuffled.into()))
}

/// Shuffles with a `ChaCha8` generator seeded from `seed`, so the same seed
/// always yields the same permutation.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn shuffle_seeded(sequence: &Value, seed: u64) -> Result<Value> {
    shuffle(sequence, &mut ChaCha8Rng::seed_from_u64(seed))
}
