//! Random code generation for the verification flows.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// Generate a numeric one-time password of `length` digits.
///
/// The thread-local PRNG is sufficient here: the code expires after a
/// short TTL, is delivered out-of-band, and is rate-limited by the
/// caller.
pub fn generate_otp(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Generate a URL-safe security code from `entropy_bytes` bytes of
/// CSPRNG output.
///
/// This code gates password resets and must resist guessing, so the
/// randomness comes from the operating system, not a general-purpose
/// PRNG.
pub fn generate_security_code(entropy_bytes: usize) -> String {
    let mut bytes = vec![0u8; entropy_bytes];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
