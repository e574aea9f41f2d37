//! Fisher-Yates over two randomness sources: the thread CSPRNG for
//! operational play, and a key-seeded generator for fairness verification.
//!
//! The fold and LCG constants below are a wire contract, not an
//! implementation detail: an auditor re-running them over a revealed
//! shuffle key must reproduce the identical permutation.

use rand::Rng;

use crate::game::cards::Card;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Operational shuffle driven by the CSPRNG. Not reproducible.
pub fn shuffle(deck: &mut [Card]) {
    let mut rng = rand::rng();
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Folds the shuffle key into a 32-bit state: each byte shifts-and-adds
/// into the accumulator (`acc * 31 + byte`, wrapping).
fn fold_key(key: &str) -> u32 {
    let mut acc: u32 = 0;
    for byte in key.bytes() {
        acc = acc.wrapping_mul(31).wrapping_add(u32::from(byte));
    }
    acc
}

/// Seed-reproducible shuffle: the same key always yields the same
/// permutation. Each Fisher-Yates step advances the LCG state once and
/// reduces it modulo `i + 1` to pick the swap index.
pub fn shuffle_seeded(deck: &mut [Card], key: &str) {
    let mut state = fold_key(key);
    for i in (1..deck.len()).rev() {
        state = state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        let j = (state as usize) % (i + 1);
        deck.swap(i, j);
    }
}
