// Probable Prime Generation
// Rejection sampling of random odd candidates filtered by Miller-Rabin

use log::{debug, trace};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::error::{RsaError, RsaResult};

/// Default number of Miller-Rabin rounds (false positive rate <= 4^-20)
pub const DEFAULT_MR_ROUNDS: u32 = 20;

/// Smallest prime size the candidate generator accepts
pub const MIN_PRIME_BITS: u32 = 16;

/// Odd primes used to discard candidates before Miller-Rabin
const SMALL_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

fn check_prime_size(bit_length: u32) -> RsaResult<()> {
    if bit_length < MIN_PRIME_BITS || bit_length % 8 != 0 {
        return Err(RsaError::InvalidPrimeSize(bit_length));
    }
    Ok(())
}

/// Draw a random odd candidate of exactly `bit_length` bits.
///
/// The buffer holds `bit_length / 8` random bytes. The two most significant
/// bits of the first byte are forced to 1 so that the product of two such
/// numbers has exactly twice the bit length, and the low bit of the last
/// byte is forced to 1 so the candidate is odd.
pub fn generate_candidate<R: RngCore + CryptoRng>(
    rng: &mut R,
    bit_length: u32,
) -> RsaResult<BigUint> {
    check_prime_size(bit_length)?;

    let mut buffer = vec![0u8; (bit_length / 8) as usize];
    rng.fill_bytes(&mut buffer);

    buffer[0] |= 0xC0;
    if let Some(last) = buffer.last_mut() {
        *last |= 0x01;
    }

    Ok(BigUint::from_bytes_be(&buffer))
}

/// Miller-Rabin primality test using the operating system's random source
pub fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    is_probable_prime_with(&mut OsRng, n, rounds)
}

/// Miller-Rabin primality test with an explicit witness source
///
/// Returns false as soon as one witness proves `n` composite, true only if
/// every one of `rounds` witnesses accepts.
pub fn is_probable_prime_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: &BigUint,
    rounds: u32,
) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    if n == &two || n == &BigUint::from(3u32) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        // Uniform witness in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    true
}

fn has_small_factor(n: &BigUint) -> bool {
    SMALL_PRIMES.iter().any(|&p| {
        let p = BigUint::from(p);
        n != &p && (n % &p).is_zero()
    })
}

/// Generate a probable prime of exactly `bit_length` bits.
///
/// Retries until a candidate passes, with no attempt limit.
pub fn generate_prime<R: RngCore + CryptoRng>(
    rng: &mut R,
    bit_length: u32,
    rounds: u32,
) -> RsaResult<BigUint> {
    check_prime_size(bit_length)?;
    if rounds == 0 {
        return Err(RsaError::InvalidRoundCount);
    }

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let candidate = generate_candidate(rng, bit_length)?;

        if has_small_factor(&candidate) {
            continue;
        }

        trace!("running {} Miller-Rabin rounds on candidate #{}", rounds, attempts);
        if is_probable_prime_with(rng, &candidate, rounds) {
            debug!(
                "found {}-bit probable prime after {} candidates",
                bit_length, attempts
            );
            return Ok(candidate);
        }
    }
}
