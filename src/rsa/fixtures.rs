// Shared keys for codec tests

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::bigint::from_u64;
use super::keygen::{generate_keypair_with, KeyGenConfig, KeyPair};

/// Deterministic 125-bit key built from 2^61 - 1 and 2^64 - 59
pub fn small_keypair() -> KeyPair {
    KeyPair::from_primes(
        from_u64(2_305_843_009_213_693_951),
        from_u64(18_446_744_073_709_551_557),
        from_u64(65537),
    )
    .expect("fixed primes form a valid key")
}

/// A 512-bit key generated once per test binary
pub fn keypair_512() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(512);
        generate_keypair_with(&mut rng, &KeyGenConfig::new(512)).expect("512-bit key")
    })
}
