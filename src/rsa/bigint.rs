// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian)
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Render as base-10 digits
pub fn to_decimal(n: &RsaBigInt) -> String {
    n.to_str_radix(10)
}

/// Parse a string made only of ASCII digits.
/// Returns None for an empty string or any non-digit character.
pub fn from_decimal(digits: &str) -> Option<RsaBigInt> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    RsaBigInt::parse_bytes(digits.as_bytes(), 10)
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = old_r.div_floor(&r);

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r, old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    let a = BigInt::from_biguint(Sign::Plus, a.clone());
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    let (gcd, x, _) = extended_gcd(&a, &m);

    if !gcd.is_one() {
        // Inverse doesn't exist
        return None;
    }

    // mod_floor keeps the result in [0, m)
    x.mod_floor(&m).to_biguint()
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Euler's totient of a two-prime modulus: (p-1)(q-1)
pub fn totient(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    (p - 1u32) * (q - 1u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow_small_values() {
        // 4^13 mod 497 = 445
        assert_eq!(mod_pow(&from_u64(4), &from_u64(13), &from_u64(497)), from_u64(445));
        assert_eq!(mod_pow(&from_u64(9), &from_u64(9), &from_u64(1)), from_u64(0));
    }

    #[test]
    fn test_mod_inverse_of_public_exponent() {
        let phi = totient(&from_u64(11), &from_u64(13));
        let d = mod_inverse(&from_u64(7), &phi).unwrap();
        assert_eq!(d, from_u64(103));
        assert_eq!((from_u64(7) * d) % phi, from_u64(1));
    }

    #[test]
    fn test_mod_inverse_negative_coefficient() {
        // 17 * 2753 = 46801 = 15 * 3120 + 1
        let inv = mod_inverse(&from_u64(17), &from_u64(3120)).unwrap();
        assert_eq!(inv, from_u64(2753));
    }

    #[test]
    fn test_mod_inverse_missing() {
        assert!(mod_inverse(&from_u64(6), &from_u64(9)).is_none());
        assert!(mod_inverse(&from_u64(3), &from_u64(0)).is_none());
    }

    #[test]
    fn test_extended_gcd_identity() {
        let a = BigInt::from(240);
        let b = BigInt::from(46);
        let (g, x, y) = extended_gcd(&a, &b);
        assert_eq!(g, BigInt::from(2));
        assert_eq!(&a * &x + &b * &y, g);
    }

    #[test]
    fn test_decimal_conversion() {
        let n = from_decimal("12345678901234567890").unwrap();
        assert_eq!(to_decimal(&n), "12345678901234567890");
        assert!(from_decimal("").is_none());
        assert!(from_decimal("12a4").is_none());
        assert!(from_decimal("1_000").is_none());
    }

    #[test]
    fn test_totient() {
        assert_eq!(totient(&from_u64(61), &from_u64(53)), from_u64(3120));
        assert_eq!(gcd(&from_u64(65537), &from_u64(3120)), from_u64(1));
    }
}
