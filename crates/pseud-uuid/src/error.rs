use core::time::Duration;

/// A result type defaulting to this crate's [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `pseud-uuid` can emit.
///
/// Random identifiers are infallible. Everything that touches the seed
/// registry or a prefetch queue returns one of these.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The lazily-initialized global registry was not constructed within its
    /// time bound.
    ///
    /// The outcome is cached, so every later access to the global registry
    /// reports the same error. Random identifiers are unaffected.
    #[error("registry initialization timed out after {timeout:?}")]
    InitializationTimeout {
        /// The bound that was exceeded.
        timeout: Duration,
    },

    /// The global registry initializer panicked or its helper thread could
    /// not be spawned.
    #[error("registry initialization failed")]
    InitializationFailed,

    /// A prefetch queue was empty even after a refill.
    ///
    /// Only reachable with `queue_max == 0`; a factory never hands out a
    /// zero-valued identifier in its place.
    #[error("identifier queue exhausted")]
    QueueExhausted,

    /// Factory watermarks did not satisfy `queue_min <= queue_max`.
    #[error("invalid watermarks: queue_min ({queue_min}) > queue_max ({queue_max})")]
    InvalidWatermarks {
        /// Requested low-water mark.
        queue_min: usize,
        /// Requested high-water mark.
        queue_max: usize,
    },

    /// The operation failed because a lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is never produced.
    #[error("lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::mutex::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
