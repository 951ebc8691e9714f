// RSA Key Generation
// Derives the modulus and exponents of a key pair from two probable primes

use log::{debug, info, warn};
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::bigint::{from_u64, mod_inverse, totient, RsaBigInt};
use super::error::{RsaError, RsaResult};
use super::prime::{generate_prime, DEFAULT_MR_ROUNDS};

/// Conventional public exponent (0x10001)
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Smallest supported modulus size in bits
pub const MIN_KEY_BITS: u32 = 512;

/// Largest supported modulus size in bits
pub const MAX_KEY_BITS: u32 = 4096;

/// Largest public exponent the PEM key encoder accepts (2^33 - 1)
pub const MAX_PUBLIC_EXPONENT: u64 = (1 << 33) - 1;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub modulus: RsaBigInt,
    pub public_exponent: RsaBigInt,
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub modulus: RsaBigInt,
    pub public_exponent: RsaBigInt,
    pub private_exponent: RsaBigInt,
    pub prime1: RsaBigInt,
    pub prime2: RsaBigInt,
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
    pub bit_length: u32,
}

impl PublicKey {
    pub fn new(modulus: RsaBigInt, public_exponent: RsaBigInt) -> Self {
        Self {
            modulus,
            public_exponent,
        }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.modulus.bits()
    }
}

impl PrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.modulus.bits()
    }

    /// The public half of this key
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.modulus.clone(), self.public_exponent.clone())
    }

    /// Verify n = p*q, p != q and e*d = 1 mod phi(n)
    pub fn check_consistency(&self) -> RsaResult<()> {
        if self.prime1 == self.prime2 {
            return Err(RsaError::EqualPrimes);
        }
        if &self.prime1 * &self.prime2 != self.modulus {
            return Err(RsaError::InconsistentKey("modulus is not prime1 * prime2"));
        }

        let phi = totient(&self.prime1, &self.prime2);
        if !((&self.public_exponent * &self.private_exponent) % &phi).is_one() {
            return Err(RsaError::InconsistentKey(
                "private exponent is not the inverse of the public exponent",
            ));
        }

        Ok(())
    }
}

impl KeyPair {
    /// Build a key pair from two primes and a public exponent.
    ///
    /// Fails with `EqualPrimes` when p == q and with `NoModularInverse` when
    /// e shares a factor with (p-1)(q-1).
    pub fn from_primes(p: RsaBigInt, q: RsaBigInt, e: RsaBigInt) -> RsaResult<Self> {
        if p == q {
            return Err(RsaError::EqualPrimes);
        }

        let modulus = &p * &q;
        let phi = totient(&p, &q);
        let d = mod_inverse(&e, &phi).ok_or(RsaError::NoModularInverse)?;

        let public_key = PublicKey::new(modulus.clone(), e.clone());
        let private_key = PrivateKey {
            modulus,
            public_exponent: e,
            private_exponent: d,
            prime1: p,
            prime2: q,
        };
        let bit_length = public_key.bit_length() as u32;

        Ok(Self {
            public_key,
            private_key,
            bit_length,
        })
    }

    /// Get the bit length of the key
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }
}

/// Parameters for key pair generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenConfig {
    pub key_bits: u32,
    pub public_exponent: u64,
    pub rounds: u32,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self::new(2048)
    }
}

impl KeyGenConfig {
    pub fn new(key_bits: u32) -> Self {
        Self {
            key_bits,
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            rounds: DEFAULT_MR_ROUNDS,
        }
    }

    pub fn with_public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn validate(&self) -> RsaResult<()> {
        if self.key_bits % 16 != 0 || !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&self.key_bits) {
            return Err(RsaError::InvalidKeySize {
                bits: self.key_bits,
                min: MIN_KEY_BITS,
                max: MAX_KEY_BITS,
            });
        }
        if self.public_exponent < 3
            || self.public_exponent % 2 == 0
            || self.public_exponent > MAX_PUBLIC_EXPONENT
        {
            return Err(RsaError::InvalidPublicExponent(self.public_exponent));
        }
        if self.rounds == 0 {
            return Err(RsaError::InvalidRoundCount);
        }
        Ok(())
    }
}

/// Generate an RSA key pair of `key_bits` bits with e = 65537
pub fn generate_keypair(key_bits: u32) -> RsaResult<KeyPair> {
    generate_keypair_with(&mut OsRng, &KeyGenConfig::new(key_bits))
}

/// Generate an RSA key pair from an explicit random source and configuration.
///
/// When the public exponent is not invertible modulo phi(n), both primes
/// are discarded and generation starts over.
pub fn generate_keypair_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    config: &KeyGenConfig,
) -> RsaResult<KeyPair> {
    config.validate()?;
    if config.rounds < DEFAULT_MR_ROUNDS {
        warn!(
            "using {} Miller-Rabin rounds, below the default of {}",
            config.rounds, DEFAULT_MR_ROUNDS
        );
    }

    let half_bits = config.key_bits / 2;
    let e = from_u64(config.public_exponent);

    loop {
        let p = generate_prime(rng, half_bits, config.rounds)?;
        let q = loop {
            let q = generate_prime(rng, half_bits, config.rounds)?;
            if q != p {
                break q;
            }
            debug!("second prime equals the first, drawing again");
        };

        match KeyPair::from_primes(p, q, e.clone()) {
            Ok(pair) => {
                info!("generated {}-bit RSA key pair", pair.bit_length);
                return Ok(pair);
            }
            Err(RsaError::NoModularInverse) => {
                warn!(
                    "e={} is not coprime with phi(n), regenerating both primes",
                    config.public_exponent
                );
            }
            Err(err) => return Err(err),
        }
    }
}
