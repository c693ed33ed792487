#[macro_use]
extern crate failure;
extern crate num;
extern crate num_traits;

use failure::Error;
use num::{One, Zero};
use num_traits::Num;
use num_traits::NumOps;

pub use num::bigint::BigInt;

#[derive(Debug, Fail)]
pub enum BigNumError {
    #[fail(display = "invalid decimal integer: {:?}", input)]
    InvalidDecimal { input: String },
}

pub trait BigNumTrait: Sized + Ord + std::fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn from_u32(u: u32) -> Self;
    fn from_dec_str(s: &str) -> Result<Self, Error>;
    fn to_dec_str(&self) -> String;
    fn mod_exp(&self, exponent: &Self, modulus: &Self) -> Self;
    fn power(&self, exponent: &Self) -> Self;
    fn remainder(&self, n: &Self) -> Self;
    fn invmod(&self, n: &Self) -> Option<Self>;
}

impl BigNumTrait for BigInt {
    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn from_u32(u: u32) -> Self {
        BigInt::from(u)
    }

    fn from_dec_str(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        BigInt::from_str_radix(trimmed, 10).map_err(|_| {
            BigNumError::InvalidDecimal {
                input: trimmed.to_owned(),
            }
            .into()
        })
    }

    fn to_dec_str(&self) -> String {
        self.to_str_radix(10)
    }

    // Panics if `modulus` is zero.
    fn mod_exp(&self, exponent: &Self, modulus: &Self) -> Self {
        let (zero, one): (BigInt, BigInt) = (Zero::zero(), One::one());
        let two = &one + &one;
        let mut result = one.clone();
        let mut base = self % modulus;
        let mut exponent = exponent.clone();

        while exponent > zero {
            // Accumulate current base if current exponent bit is 1
            if (&exponent % &two) == one {
                result = &(&result * &base) % modulus;
            }
            // Get next base by squaring
            base = &(&base * &base) % modulus;

            exponent = exponent >> 1usize;
        }

        result
    }

    // Same squaring as `mod_exp` without any reduction, so the result has
    // roughly `exponent * bits(self)` bits.
    fn power(&self, exponent: &Self) -> Self {
        let (zero, one): (BigInt, BigInt) = (Zero::zero(), One::one());
        let two = &one + &one;
        let mut result = one.clone();
        let mut base = self.clone();
        let mut exponent = exponent.clone();

        while exponent > zero {
            if (&exponent % &two) == one {
                result = &result * &base;
            }
            base = &base * &base;
            exponent = exponent >> 1usize;
        }

        result
    }

    // Truncating remainder, the sign follows `self`.
    fn remainder(&self, n: &Self) -> Self {
        self % n
    }

    //Returns x with self * x = 1 (mod n), or None if gcd(self, n) != 1. For n = 1 every residue
    //is 0, which we do not count as an inverse.
    fn invmod(&self, n: &Self) -> Option<Self> {
        let (zero, one): (BigInt, BigInt) = (Zero::zero(), One::one());
        if n == &one {
            return None;
        }

        // Bezout coefficients of the original self, l.0 being the current one
        let mut l: (BigInt, BigInt) = (one.clone(), zero.clone());
        let mut r = (self.clone(), n.clone());
        while r.0 > one && r.1 != zero {
            let q = &r.0 / &r.1;
            r = (r.1.clone(), &r.0 % &r.1);
            l = (l.1.clone(), &l.0 - &(&q * &l.1));
            //assert_eq!(l.0 * self % n, r.0 % n);
        }

        if r.0 != one {
            return None;
        }

        let mut x = l.0;
        if x < zero {
            x = &x + n;
        }
        Some(x)
    }
}

pub trait BigNumExt: Sized {
    fn floor_div(&self, k: &Self) -> (Self, Self);
}

impl<T: BigNumTrait> BigNumExt for T
where
    for<'a1, 'a2> &'a1 T: NumOps<&'a2 T, T>,
{
    fn floor_div(&self, k: &T) -> (T, T) {
        (self / k, self % k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn int(u: u32) -> BigInt {
        BigInt::from_u32(u)
    }

    fn naive_mod_exp(b: u64, e: u64, m: u64) -> u64 {
        let mut x = 1;
        for _ in 0..e {
            x = x * (b % m) % m;
        }
        x
    }

    fn gcd(a: u64, b: u64) -> u64 {
        if b == 0 {
            a
        } else {
            gcd(b, a % b)
        }
    }

    #[test]
    fn mod_exp_small_values() {
        assert_eq!(int(16), int(4).mod_exp(&int(2), &int(23)));
        assert_eq!(int(2), int(16).mod_exp(&int(3), &int(23)));
        assert_eq!(int(1), int(5).mod_exp(&int(0), &int(7)));
        assert_eq!(int(0), int(5).mod_exp(&int(3), &int(1)));
    }

    #[test]
    fn mod_exp_reduces_base_first() {
        assert_eq!(int(4).mod_exp(&int(5), &int(9)), int(13).mod_exp(&int(5), &int(9)));
    }

    #[test]
    fn mod_exp_beyond_machine_words() {
        // 2^127 - 1 is prime, so Fermat gives 3^(p-1) = 1 (mod p)
        let p = BigInt::from_dec_str("170141183460469231731687303715884105727").unwrap();
        let e = &p - &int(1);
        assert_eq!(int(1), int(3).mod_exp(&e, &p));
    }

    #[test]
    fn power_is_unreduced() {
        assert_eq!(int(1024), int(2).power(&int(10)));
        assert_eq!(int(1), int(7).power(&int(0)));
        assert_eq!(
            BigInt::from_dec_str("1267650600228229401496703205376").unwrap(),
            int(2).power(&int(100))
        );
    }

    #[test]
    fn invmod_small_values() {
        assert_eq!(Some(int(4)), int(3).invmod(&int(11)));
        assert_eq!(Some(int(6)), int(2).invmod(&int(11)));
        assert_eq!(Some(int(8)), int(7).invmod(&int(11)));
        assert_eq!(Some(int(1)), int(1).invmod(&int(11)));
        assert_eq!(Some(int(4)), int(25).invmod(&int(11)));
    }

    #[test]
    fn invmod_not_coprime() {
        assert_eq!(None, int(4).invmod(&int(8)));
        assert_eq!(None, int(0).invmod(&int(11)));
        assert_eq!(None, int(11).invmod(&int(11)));
        assert_eq!(None, int(6).invmod(&int(9)));
    }

    #[test]
    fn invmod_modulus_one() {
        assert_eq!(None, int(5).invmod(&int(1)));
    }

    #[test]
    fn dec_str_roundtrip_and_errors() {
        let n = BigInt::from_dec_str(" 123456789012345678901234567890\n").unwrap();
        assert_eq!("123456789012345678901234567890", n.to_dec_str());
        assert!(BigInt::from_dec_str("12a").is_err());
        assert!(BigInt::from_dec_str("").is_err());
    }

    #[test]
    fn remainder_truncates() {
        assert_eq!(int(3), int(25).remainder(&int(11)));
        assert_eq!(-int(3), (-int(25)).remainder(&int(11)));
    }

    proptest! {
        #[test]
        fn mod_exp_matches_repeated_multiplication(b in 0u64..1000, e in 0u64..64, m in 2u64..1000) {
            let expected = BigInt::from(naive_mod_exp(b, e, m));
            let actual = BigInt::from(b).mod_exp(&BigInt::from(e), &BigInt::from(m));
            prop_assert_eq!(expected, actual);
        }

        #[test]
        fn power_then_reduce_matches_mod_exp(b in 0u64..50, e in 0u64..40, m in 2u64..1000) {
            let (b, e, m) = (BigInt::from(b), BigInt::from(e), BigInt::from(m));
            prop_assert_eq!(b.power(&e).remainder(&m), b.mod_exp(&e, &m));
        }

        #[test]
        fn invmod_is_inverse(a in 0u64..100_000, m in 2u64..100_000) {
            let inverse = BigInt::from(a).invmod(&BigInt::from(m));
            if gcd(a, m) == 1 {
                let x = inverse.unwrap();
                prop_assert!(x >= int(0) && x < BigInt::from(m));
                prop_assert_eq!(int(1), (BigInt::from(a) * x) % BigInt::from(m));
            } else {
                prop_assert_eq!(None, inverse);
            }
        }
    }
}
