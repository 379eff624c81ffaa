use crate::{
    Identifier, Result, Seed, SeededSource,
    mutex::{Mutex, lock},
};
use std::collections::HashMap;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A thread-safe table mapping each [`Seed`] to its private
/// [`SeededSource`].
///
/// Entries are created lazily on first use of a seed and live until
/// [`Self::delete`] is called. A single mutex covers the whole
/// resolve → read → encode sequence, so concurrent callers never interleave
/// reads from the same stream and every seed's output matches what it would
/// produce in isolation.
///
/// ## Ownership of entries
///
/// The registry does **not** reference count entries. Whoever owns a seed is
/// responsible for deleting it once every consumer is done; deleting early
/// resets the stream for anyone still drawing from it. [`SeedLease`] wraps
/// this in an RAII token. Seeds that are never deleted keep one source alive
/// for the lifetime of the registry.
///
/// ## Example
/// ```
/// use pseud_uuid::{SeedRegistry, SeededSource};
///
/// let registry = SeedRegistry::new();
/// let id = registry.derive(42).unwrap();
/// assert_eq!(id, SeededSource::new(42).next_identifier());
/// ```
///
/// [`SeedLease`]: crate::SeedLease
#[derive(Debug, Default)]
pub struct SeedRegistry {
    sources: Mutex<HashMap<Seed, SeededSource>>,
}

impl SeedRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` on the source for `seed`, creating it first if absent.
    ///
    /// `f` runs under the registry lock: keep it short, and never call back
    /// into the registry from inside it.
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn get_or_create<T, F>(&self, seed: Seed, f: F) -> Result<T>
    where
        F: FnOnce(&mut SeededSource) -> T,
    {
        let mut sources = lock(&self.sources)?;
        let source = sources.entry(seed).or_insert_with(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(seed, "creating seeded source");
            SeededSource::new(seed)
        });
        Ok(f(source))
    }

    /// Derives the next pseudo-random identifier of `seed`'s stream.
    ///
    /// Exactly one identifier's worth of entropy is consumed from the seed's
    /// source; no other caller can read from it in between.
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn derive(&self, seed: Seed) -> Result<Identifier> {
        self.get_or_create(seed, SeededSource::next_identifier)
    }

    /// Derives `n` consecutive identifiers of `seed`'s stream under a single
    /// lock acquisition.
    ///
    /// The result equals `n` sequential calls to [`Self::derive`].
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn derive_many(&self, seed: Seed, n: usize) -> Result<Vec<Identifier>> {
        self.get_or_create(seed, |source| {
            (0..n).map(|_| source.next_identifier()).collect()
        })
    }

    /// Removes the source for `seed`, returning whether one existed.
    ///
    /// Idempotent. A later use of the same seed starts a fresh stream from
    /// the seed's first identifier.
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn delete(&self, seed: Seed) -> Result<bool> {
        let removed = lock(&self.sources)?.remove(&seed).is_some();
        #[cfg(feature = "tracing")]
        if removed {
            tracing::debug!(seed, "deleted seeded source");
        }
        Ok(removed)
    }

    /// Returns whether `seed` currently has a live source.
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn contains(&self, seed: Seed) -> Result<bool> {
        Ok(lock(&self.sources)?.contains_key(&seed))
    }

    /// Number of live sources.
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(lock(&self.sources)?.len())
    }

    /// Returns `true` if no seed has a live source.
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(lock(&self.sources)?.is_empty())
    }
}
