//! Match code generation.

use rand::Rng;

/// Collisions tolerated before `create` gives up.
pub(crate) const MAX_ATTEMPTS: usize = 64;

/// Random code of `length` lowercase ASCII letters.
pub(crate) fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect()
}
