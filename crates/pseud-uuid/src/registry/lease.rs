use crate::{Result, Seed, SeedRegistry};
use std::sync::Arc;

/// An owner token for one seed of a [`SeedRegistry`].
///
/// Dropping the lease deletes the seed's source, which bounds registry memory
/// without any reference counting inside the registry. Hold exactly one lease
/// per seed, and keep it alive at least as long as every factory drawing
/// from that seed.
///
/// # Example
/// ```
/// use pseud_uuid::SeedRegistry;
/// use std::sync::Arc;
///
/// let registry = Arc::new(SeedRegistry::new());
/// {
///     let lease = registry.lease(9);
///     registry.derive(lease.seed()).unwrap();
///     assert!(registry.contains(9).unwrap());
/// }
/// assert!(!registry.contains(9).unwrap());
/// ```
#[derive(Debug)]
#[must_use = "dropping a lease immediately deletes its seed"]
pub struct SeedLease {
    registry: Arc<SeedRegistry>,
    seed: Seed,
    released: bool,
}

impl SeedRegistry {
    /// Takes ownership of `seed`'s lifetime in this registry.
    ///
    /// The source itself is still created lazily on first derivation.
    pub fn lease(self: &Arc<Self>, seed: Seed) -> SeedLease {
        SeedLease {
            registry: Arc::clone(self),
            seed,
            released: false,
        }
    }
}

impl SeedLease {
    /// The leased seed.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// The registry the seed lives in.
    pub fn registry(&self) -> &Arc<SeedRegistry> {
        &self.registry
    }

    /// Deletes the seed now, reporting lock failures that `Drop` would
    /// swallow.
    ///
    /// # Errors
    /// - Returns an error if the registry lock has been poisoned.
    pub fn release(mut self) -> Result<bool> {
        self.released = true;
        self.registry.delete(self.seed)
    }
}

impl Drop for SeedLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(_e) = self.registry.delete(self.seed) {
            #[cfg(feature = "tracing")]
            tracing::warn!(seed = self.seed, error = %_e, "failed to release seed");
        }
    }
}
