use crate::{
    Error, FactoryConfig, Identifier, IdentifierQueue, Result, Seed, SeedRegistry,
    mutex::{Mutex, lock},
};
use std::sync::Arc;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Most identifiers a refill derives per registry lock acquisition.
pub const REFILL_BATCH: usize = 64;

/// A buffered, thread-safe consumer of one seed's identifier stream.
///
/// The factory keeps a queue of identifiers derived from its seed through a
/// shared [`SeedRegistry`]. It fills the queue to `queue_max` on
/// construction and, whenever a dequeue leaves `queue_min` or fewer behind,
/// refills it to `queue_max` before returning. Refills are synchronous: the
/// caller that crosses the low-water mark pays for them.
///
/// ## Locking
///
/// Each factory has its own lock, held across the registry calls a refill
/// makes. The registry never calls back into a factory, so the order is
/// always factory → registry.
///
/// A refill takes the registry lock once per [`REFILL_BATCH`] identifiers,
/// not once per identifier. That amortizes locking, but every other seed
/// waits for up to one batch of derivations while a refill holds the lock.
/// With concurrent factories on one seed, each batch is a contiguous run of
/// the stream.
///
/// ## Sharing a seed
///
/// Several factories may use the same seed. They advance one shared stream,
/// so their outputs interleave rather than repeat. Dropping a factory does
/// not delete its seed from the registry.
///
/// ## Example
/// ```
/// use pseud_uuid::{PrefetchFactory, SeedRegistry};
/// use std::sync::Arc;
///
/// let registry = Arc::new(SeedRegistry::new());
/// let factory = PrefetchFactory::new(registry, 42, 2, 5).unwrap();
/// assert_eq!(factory.len().unwrap(), 5);
///
/// let ids = factory.dequeue_n(3).unwrap();
/// assert_eq!(ids.len(), 3);
/// // The third dequeue left 2 behind and refilled to 5.
/// assert_eq!(factory.len().unwrap(), 5);
/// ```
#[derive(Debug)]
pub struct PrefetchFactory {
    registry: Arc<SeedRegistry>,
    seed: Seed,
    config: FactoryConfig,
    queue: Mutex<IdentifierQueue>,
}

impl PrefetchFactory {
    /// Creates a factory for `seed` and fills it to `queue_max`.
    ///
    /// # Errors
    /// - [`Error::InvalidWatermarks`] if `queue_min > queue_max`; nothing is
    ///   derived in that case.
    /// - [`Error::LockPoisoned`] if the registry lock has been poisoned.
    pub fn new(
        registry: Arc<SeedRegistry>,
        seed: Seed,
        queue_min: usize,
        queue_max: usize,
    ) -> Result<Self> {
        Self::with_config(registry, seed, FactoryConfig::new(queue_min, queue_max)?)
    }

    /// Creates a factory from a [`FactoryConfig`] and fills it.
    ///
    /// # Errors
    /// Same as [`Self::new`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(registry)))]
    pub fn with_config(
        registry: Arc<SeedRegistry>,
        seed: Seed,
        config: FactoryConfig,
    ) -> Result<Self> {
        config.validate()?;
        let factory = Self {
            registry,
            seed,
            config,
            queue: Mutex::new(IdentifierQueue::with_capacity(config.queue_max)),
        };
        {
            let mut queue = lock(&factory.queue)?;
            factory.refill(&mut queue)?;
        }
        Ok(factory)
    }

    /// Removes and returns the identifier at the head of the queue.
    ///
    /// If that leaves `queue_min` or fewer identifiers, the queue is refilled
    /// to `queue_max` before this returns.
    ///
    /// # Errors
    /// - [`Error::QueueExhausted`] if the queue is empty even after a refill
    ///   (only possible with `queue_max == 0`).
    /// - [`Error::LockPoisoned`] if a lock has been poisoned. The popped
    ///   identifier is put back at the head.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(seed = self.seed)))]
    pub fn dequeue(&self) -> Result<Identifier> {
        let mut queue = lock(&self.queue)?;
        self.dequeue_locked(&mut queue)
    }

    /// Dequeues `n` identifiers in FIFO order under a single factory lock.
    ///
    /// Every step applies the same low-water check as [`Self::dequeue`], so
    /// the result equals `n` sequential dequeues.
    ///
    /// # Errors
    /// Same as [`Self::dequeue`]. On error, the identifiers already taken are
    /// returned to the head of the queue in their original order; no partial
    /// result is ever handed out.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(seed = self.seed)))]
    pub fn dequeue_n(&self, n: usize) -> Result<Vec<Identifier>> {
        let mut queue = lock(&self.queue)?;
        // `n` is caller-controlled; reserve only what one refill can supply.
        let reserve = queue.len().saturating_add(self.config.queue_max);
        let mut ids = Vec::with_capacity(n.min(reserve));
        for _ in 0..n {
            match self.dequeue_locked(&mut queue) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    for id in ids.into_iter().rev() {
                        queue.push_front(id);
                    }
                    return Err(e);
                }
            }
        }
        Ok(ids)
    }

    /// Appends `id` at the tail, e.g. to hand back an unused identifier.
    ///
    /// # Errors
    /// - [`Error::LockPoisoned`] if the factory lock has been poisoned.
    pub fn enqueue(&self, id: Identifier) -> Result<()> {
        lock(&self.queue)?.enqueue(id);
        Ok(())
    }

    /// Number of identifiers currently buffered.
    ///
    /// # Errors
    /// - [`Error::LockPoisoned`] if the factory lock has been poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(lock(&self.queue)?.len())
    }

    /// Returns `true` if nothing is buffered.
    ///
    /// # Errors
    /// - [`Error::LockPoisoned`] if the factory lock has been poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(lock(&self.queue)?.is_empty())
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn config(&self) -> FactoryConfig {
        self.config
    }

    pub fn queue_min(&self) -> usize {
        self.config.queue_min
    }

    pub fn queue_max(&self) -> usize {
        self.config.queue_max
    }

    pub fn registry(&self) -> &Arc<SeedRegistry> {
        &self.registry
    }

    fn dequeue_locked(&self, queue: &mut IdentifierQueue) -> Result<Identifier> {
        if queue.is_empty() {
            self.refill(queue)?;
        }
        let id = queue.dequeue().ok_or(Error::QueueExhausted)?;
        if queue.len() <= self.config.queue_min {
            if let Err(e) = self.refill(queue) {
                queue.push_front(id);
                return Err(e);
            }
        }
        Ok(id)
    }

    /// Tops the queue up to `queue_max`. Caller holds the factory lock.
    ///
    /// Derives in chunks of at most [`REFILL_BATCH`], releasing the registry
    /// lock between chunks so other seeds are not held up by a large refill.
    fn refill(&self, queue: &mut IdentifierQueue) -> Result<()> {
        let missing = self.config.queue_max.saturating_sub(queue.len());
        let mut remaining = missing;
        while remaining > 0 {
            let batch = remaining.min(REFILL_BATCH);
            queue.extend(self.registry.derive_many(self.seed, batch)?);
            remaining -= batch;
        }
        #[cfg(feature = "tracing")]
        if missing > 0 {
            tracing::trace!(seed = self.seed, added = missing, len = queue.len(), "refilled");
        }
        Ok(())
    }
}
