use crate::RandSource;
use rand::{RngCore, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically. It is the standing source for random identifiers
/// and is never shared with a seeded stream.
///
/// ⚠️ NOTE: The underlying `ThreadRng` is not `Send` or `Sync`. Since this type
/// is a zero-sized wrapper that does not store the RNG, it **is** thread-safe
/// and may be freely used across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn fill(&mut self, dest: &mut [u8]) {
        rng().fill_bytes(dest);
    }
}
