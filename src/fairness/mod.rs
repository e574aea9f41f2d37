//! Commit-reveal fairness protocol.
//!
//! The server commits to `hash(seed + ":" + nonce)` before any card is
//! shown, then reveals seed and nonce once the hand completes. Anyone can
//! recompute the commitment and replay the seeded shuffle to confirm the
//! deck was fixed before their hold decisions existed.

pub mod shuffle;

use rand::RngCore;
use sha2::{Digest, Sha256};

/// 32 bytes from the thread-local CSPRNG, hex-encoded: 256 bits of entropy.
pub fn generate_seed() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn generate_nonce() -> u32 {
    rand::rng().next_u32()
}

/// The shuffle key: the exact string the commitment hashes over.
pub fn combine(seed: &str, nonce: u32) -> String {
    format!("{}:{}", seed, nonce)
}

/// Hex SHA-256 over the combined seed and nonce.
pub fn commit(seed: &str, nonce: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(combine(seed, nonce).as_bytes());
    hex::encode(hasher.finalize())
}

/// Auditor-side check after reveal.
pub fn verify(seed: &str, nonce: u32, commitment: &str) -> bool {
    commit(seed, nonce) == commitment
}
