use crate::{Identifier, RandSource, Seed, encode};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A deterministic entropy stream bound to a single [`Seed`].
///
/// Two sources built from the same seed yield the same infinite byte
/// sequence, and therefore the same identifiers, in every process and on
/// every platform. The source is never reseeded; every read advances it.
///
/// ⚠️ NOTE: The stream is predictable to anyone who knows the seed. Never use
/// it where [`crate::new_random_identifier`] is required.
///
/// A `SeededSource` has a single owner. Inside a [`crate::SeedRegistry`] it is
/// only reachable under the registry lock.
#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: Seed,
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates the stream for `seed`, positioned at its first byte.
    ///
    /// # Example
    /// ```
    /// use pseud_uuid::SeededSource;
    ///
    /// let mut a = SeededSource::new(7);
    /// let mut b = SeededSource::new(7);
    /// assert_eq!(a.next_identifier(), b.next_identifier());
    /// ```
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            // Seeds are signed; reinterpret the bits rather than clamp.
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
        }
    }

    /// The seed this stream was built from.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Encodes the next identifier of this stream.
    pub fn next_identifier(&mut self) -> Identifier {
        encode(self)
    }
}

impl RandSource for SeededSource {
    fn fill(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }
}
