use crate::{Error, Result};

/// Watermarks for a [`crate::PrefetchFactory`].
///
/// The factory refills to `queue_max` whenever a dequeue leaves it holding
/// `queue_min` or fewer identifiers. The gap between the two is the slack that
/// absorbs bursts without paying generation cost inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FactoryConfig {
    /// Low-water mark.
    pub queue_min: usize,
    /// High-water mark; the queue length right after a refill.
    pub queue_max: usize,
}

impl FactoryConfig {
    pub const DEFAULT_QUEUE_MIN: usize = 8;
    pub const DEFAULT_QUEUE_MAX: usize = 32;

    /// Builds a validated config.
    ///
    /// # Errors
    /// - [`Error::InvalidWatermarks`] if `queue_min > queue_max`.
    pub fn new(queue_min: usize, queue_max: usize) -> Result<Self> {
        let config = Self {
            queue_min,
            queue_max,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks `queue_min <= queue_max`.
    ///
    /// # Errors
    /// - [`Error::InvalidWatermarks`] if the watermarks are inverted.
    pub fn validate(&self) -> Result<()> {
        if self.queue_min > self.queue_max {
            return Err(Error::InvalidWatermarks {
                queue_min: self.queue_min,
                queue_max: self.queue_max,
            });
        }
        Ok(())
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            queue_min: Self::DEFAULT_QUEUE_MIN,
            queue_max: Self::DEFAULT_QUEUE_MAX,
        }
    }
}
