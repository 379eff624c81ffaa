use crate::{RandSource, ThreadRandom};
use uuid::{Builder, Uuid};

/// An opaque 128-bit identifier laid out as a version-4, RFC 4122 UUID.
pub type Identifier = Uuid;

/// The key selecting one deterministic identifier stream.
///
/// Seeds are not secret; the bytes derived from them are the protected
/// quantity.
pub type Seed = i64;

/// Number of entropy bytes consumed per identifier.
pub const IDENTIFIER_BYTES: usize = 16;

/// Encodes one identifier from exactly [`IDENTIFIER_BYTES`] bytes of `rng`.
///
/// The entropy source is passed in rather than installed globally, so
/// concurrent callers using different sources never observe each other.
///
/// # Example
/// ```
/// use pseud_uuid::{SeededSource, encode};
///
/// let mut source = SeededSource::new(1);
/// let id = encode(&mut source);
/// assert_eq!(id.get_version(), Some(pseud_uuid::uuid::Version::Random));
/// ```
pub fn encode<R: RandSource + ?Sized>(rng: &mut R) -> Identifier {
    let mut bytes = [0u8; IDENTIFIER_BYTES];
    rng.fill(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Generates a cryptographically random identifier.
///
/// Draws from the thread-local RNG and never touches the seed registry, so it
/// always succeeds, even if the global registry failed to initialize.
///
/// # Example
/// ```
/// use pseud_uuid::new_random_identifier;
///
/// let a = new_random_identifier();
/// let b = new_random_identifier();
/// assert_ne!(a, b);
/// ```
pub fn new_random_identifier() -> Identifier {
    encode(&mut ThreadRandom)
}
