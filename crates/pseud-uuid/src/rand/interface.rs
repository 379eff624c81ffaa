/// A source of entropy that identifiers are encoded from.
///
/// This abstraction allows you to plug in the thread-local cryptographic RNG,
/// a seeded deterministic stream, or a mocked source in tests.
///
/// # Example
/// ```
/// use pseud_uuid::{RandSource, encode};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn fill(&mut self, dest: &mut [u8]) {
///         dest.fill(0xAB);
///     }
/// }
///
/// let id = encode(&mut FixedRand);
/// assert_eq!(id.get_version_num(), 4);
/// ```
pub trait RandSource {
    /// Fills `dest` entirely with entropy, advancing the source.
    fn fill(&mut self, dest: &mut [u8]);
}

impl<R: RandSource + ?Sized> RandSource for &mut R {
    fn fill(&mut self, dest: &mut [u8]) {
        (**self).fill(dest);
    }
}
