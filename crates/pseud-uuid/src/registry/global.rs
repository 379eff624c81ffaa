//! The process-wide registry.
//!
//! Applications that want the initialization failure at a single, known
//! point should build an `Arc<SeedRegistry>` at startup and pass it to every
//! [`PrefetchFactory`]. The global below is for callers without such a handle:
//! it is constructed on first access, bounded by [`INIT_TIMEOUT`], and the
//! outcome is shared by every later caller.

use crate::{Error, PrefetchFactory, Result, Seed, SeedRegistry};
use core::time::Duration;
use std::sync::{Arc, OnceLock, mpsc};
use std::thread;

/// Upper bound on the one-time construction of the global registry.
pub const INIT_TIMEOUT: Duration = Duration::from_secs(4);

static REGISTRY: TimedInit<Arc<SeedRegistry>> = TimedInit::new(INIT_TIMEOUT);

/// A once-cell whose initializer is given a bounded amount of time.
///
/// The initializer runs on a helper thread while the first caller waits up to
/// `timeout` for it. Concurrent callers block on that same attempt. Whatever
/// the outcome, value or error, it is cached: the initializer never runs
/// twice and there are no retries.
///
/// # Example
/// ```
/// use core::time::Duration;
/// use pseud_uuid::TimedInit;
///
/// let cell = TimedInit::new(Duration::from_secs(1));
/// assert_eq!(*cell.get_or_init(|| 5).unwrap(), 5);
/// assert_eq!(*cell.get_or_init(|| 6).unwrap(), 5);
/// ```
#[derive(Debug)]
pub struct TimedInit<T> {
    cell: OnceLock<Result<T>>,
    timeout: Duration,
}

impl<T> TimedInit<T> {
    /// Creates an uninitialized cell bounded by `timeout`.
    pub const fn new(timeout: Duration) -> Self {
        Self {
            cell: OnceLock::new(),
            timeout,
        }
    }

    /// The initialization bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The cached outcome, if initialization has already been attempted.
    pub fn get(&self) -> Option<&Result<T>> {
        self.cell.get()
    }
}

impl<T: Send + 'static> TimedInit<T> {
    /// Returns the value, running `init` if no attempt has been made yet.
    ///
    /// # Errors
    /// - [`Error::InitializationTimeout`] if `init` did not finish in time.
    /// - [`Error::InitializationFailed`] if `init` panicked or its thread
    ///   could not be spawned.
    pub fn get_or_init<F>(&self, init: F) -> Result<&T>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        self.cell
            .get_or_init(|| run_bounded(init, self.timeout))
            .as_ref()
            .map_err(Clone::clone)
    }
}

fn run_bounded<T, F>(init: F, timeout: Duration) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);
    thread::Builder::new()
        .name("pseud-uuid-init".into())
        .spawn(move || {
            // The waiter may have timed out and hung up already.
            let _ = tx.send(init());
        })
        .map_err(|_| Error::InitializationFailed)?;

    let outcome = match rx.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(Error::InitializationTimeout { timeout }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(Error::InitializationFailed),
    };
    #[cfg(feature = "tracing")]
    if let Err(e) = &outcome {
        tracing::error!(error = %e, "initialization did not complete");
    }
    outcome
}

/// Returns the process-wide [`SeedRegistry`], constructing it on first use.
///
/// # Errors
/// - [`Error::InitializationTimeout`] or [`Error::InitializationFailed`] if
///   the one-time construction did not succeed. The failure is permanent for
///   the process; seeded generation through the global is unavailable.
///
/// # Example
/// ```
/// let registry = pseud_uuid::registry().unwrap();
/// let again = pseud_uuid::registry().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&registry, &again));
/// ```
pub fn registry() -> Result<Arc<SeedRegistry>> {
    registry_in(&REGISTRY)
}

pub(crate) fn registry_in(cell: &TimedInit<Arc<SeedRegistry>>) -> Result<Arc<SeedRegistry>> {
    cell.get_or_init(|| Arc::new(SeedRegistry::new())).cloned()
}

/// Creates a [`PrefetchFactory`] over the global registry.
///
/// # Errors
/// - Any error from [`registry`].
/// - [`Error::InvalidWatermarks`] if `queue_min > queue_max`.
/// - [`Error::LockPoisoned`] if a lock was poisoned during the initial fill.
pub fn new_seeded_factory(
    seed: Seed,
    queue_min: usize,
    queue_max: usize,
) -> Result<PrefetchFactory> {
    new_seeded_factory_in(&REGISTRY, seed, queue_min, queue_max)
}

pub(crate) fn new_seeded_factory_in(
    cell: &TimedInit<Arc<SeedRegistry>>,
    seed: Seed,
    queue_min: usize,
    queue_max: usize,
) -> Result<PrefetchFactory> {
    PrefetchFactory::new(registry_in(cell)?, seed, queue_min, queue_max)
}

/// Deletes `seed` from the global registry. Idempotent.
///
/// # Errors
/// - Any error from [`registry`], or a poisoned registry lock.
pub fn delete_seed(seed: Seed) -> Result<bool> {
    delete_seed_in(&REGISTRY, seed)
}

pub(crate) fn delete_seed_in(cell: &TimedInit<Arc<SeedRegistry>>, seed: Seed) -> Result<bool> {
    registry_in(cell)?.delete(seed)
}
