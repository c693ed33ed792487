#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate bignum;
extern crate num_traits;

use bignum::{BigNumExt, BigNumTrait};
use failure::Error;
use num_traits::NumOps;

#[derive(Debug, Fail)]
pub enum DsaError {
    #[fail(display = "invalid modulus {} = {}", name, value)]
    InvalidModulus { name: &'static str, value: String },

    #[fail(display = "{} has no inverse modulo {}", value, modulus)]
    NotInvertible { value: String, modulus: String },

    #[fail(display = "degenerate signature r = {}, s = {}", r, s)]
    DegenerateSignature { r: String, s: String },

    #[fail(display = "invalid domain parameters: {}", reason)]
    InvalidParameters { reason: String },
}

fn not_invertible<T: BigNumTrait>(value: &T, modulus: &T) -> DsaError {
    DsaError::NotInvertible {
        value: value.to_dec_str(),
        modulus: modulus.to_dec_str(),
    }
}

fn invalid_parameters(reason: String) -> Error {
    DsaError::InvalidParameters { reason }.into()
}

pub struct DsaParams<T> {
    pub p: T,
    pub q: T,
    pub g: T,
}

impl<T> DsaParams<T>
where
    T: BigNumTrait + BigNumExt,
    for<'a1, 'a2> &'a1 T: NumOps<&'a2 T, T>,
{
    /// Derives the subgroup generator g = h^((p-1)/q) mod p.
    ///
    /// Only the moduli are checked, and only so far as the arithmetic needs: p has to be at
    /// least 2 and q positive. Whether p and q are prime, or whether q divides p - 1, is left to
    /// `validate`.
    pub fn derive(p: T, q: T, h: &T) -> Result<Self, Error> {
        if p <= T::one() {
            return Err(DsaError::InvalidModulus {
                name: "p",
                value: p.to_dec_str(),
            }
            .into());
        }
        if q <= T::zero() {
            return Err(DsaError::InvalidModulus {
                name: "q",
                value: q.to_dec_str(),
            }
            .into());
        }

        let (exponent, _) = (&p - &T::one()).floor_div(&q);
        let g = h.mod_exp(&exponent, &p);
        debug!("g = {} (exponent (p-1)/q = {})", g.to_dec_str(), exponent.to_dec_str());
        Ok(DsaParams { p, q, g })
    }

    pub fn new_with_g(p: T, q: T, g: T) -> Self {
        DsaParams { p, q, g }
    }

    pub fn public_key(&self, x: &T) -> T {
        self.g.mod_exp(x, &self.p)
    }

    /// Strict checks on top of `derive`. Primality is not tested.
    pub fn validate(&self, h: &T) -> Result<(), Error> {
        let (zero, one) = (T::zero(), T::one());
        let p = &self.p;
        let q = &self.q;

        if q <= &one || q >= p {
            return Err(invalid_parameters(format!(
                "q = {} is not in (1, p)",
                q.to_dec_str()
            )));
        }
        let (_, rest) = (p - &one).floor_div(q);
        if rest != zero {
            return Err(invalid_parameters(format!(
                "q = {} does not divide p - 1",
                q.to_dec_str()
            )));
        }
        if h <= &one || h >= p {
            return Err(invalid_parameters(format!(
                "h = {} is not in (1, p)",
                h.to_dec_str()
            )));
        }
        if self.g <= one {
            return Err(invalid_parameters(format!(
                "h = {} yields the trivial generator g = {}",
                h.to_dec_str(),
                self.g.to_dec_str()
            )));
        }
        Ok(())
    }

    /// Checks that a secret exponent (the key x or a nonce k) lies in (0, q).
    pub fn validate_exponent(&self, name: &str, value: &T) -> Result<(), Error> {
        if value <= &T::zero() || value >= &self.q {
            return Err(invalid_parameters(format!(
                "{} = {} is not in (0, q)",
                name,
                value.to_dec_str()
            )));
        }
        Ok(())
    }
}

pub struct DsaPublic<'a, T: 'a> {
    pub params: &'a DsaParams<T>,
    pub y: T,
}

/// Everything the verifier computes for one message hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification<T> {
    pub w: T,
    pub u1: T,
    pub u2: T,
    pub v: T,
    pub valid: bool,
}

impl<'a, T> DsaPublic<'a, T>
where
    T: BigNumTrait + BigNumExt,
    for<'a1, 'a2> &'a1 T: NumOps<&'a2 T, T>,
{
    pub fn generate(private: &DsaPrivate<'a, T>) -> Self {
        let params = private.params;
        let y = params.public_key(&private.x);
        DsaPublic { params, y }
    }

    // The two powers are taken without reduction and only their product is reduced, first mod p
    // and then mod q. This means the cost grows with q, so keep q small.
    pub fn verify_signature(
        &self,
        hash: &T,
        &Signature { ref r, ref s }: &Signature<T>,
    ) -> Result<Verification<T>, Error> {
        let p = &self.params.p;
        let q = &self.params.q;
        let g = &self.params.g;

        let w = s.invmod(q).ok_or_else(|| not_invertible(s, q))?;
        let u1 = (hash * &w).remainder(q);
        let u2 = (r * &w).remainder(q);
        let t1 = g.power(&u1);
        let t2 = self.y.power(&u2);
        let v = (&t1 * &t2).remainder(p).remainder(q);
        let valid = &v == r;

        debug!(
            "verify hash = {}: w = {}, u1 = {}, u2 = {}, v = {}, valid = {}",
            hash.to_dec_str(),
            w.to_dec_str(),
            u1.to_dec_str(),
            u2.to_dec_str(),
            v.to_dec_str(),
            valid
        );
        Ok(Verification {
            w,
            u1,
            u2,
            v,
            valid,
        })
    }
}

pub struct DsaPrivate<'a, T: 'a> {
    pub params: &'a DsaParams<T>,
    pub x: T,
}

impl<'a, T> DsaPrivate<'a, T>
where
    T: BigNumTrait + BigNumExt,
    for<'a1, 'a2> &'a1 T: NumOps<&'a2 T, T>,
{
    /// Signs `hash` with the caller's nonce `k`. A signature with r < 1 or s < 1 is rejected,
    /// never retried: picking another nonce is up to the caller.
    pub fn sign(&self, hash: &T, k: &T) -> Result<Signature<T>, Error> {
        let one = T::one();
        let p = &self.params.p;
        let q = &self.params.q;
        let g = &self.params.g;

        let k_inv = k.invmod(q).ok_or_else(|| not_invertible(k, q))?;
        let r = g.mod_exp(k, p).remainder(q);
        let s = (&k_inv * &(hash + &(&r * &self.x))).remainder(q);
        debug!(
            "sign hash = {}: k^-1 = {}, r = {}, s = {}",
            hash.to_dec_str(),
            k_inv.to_dec_str(),
            r.to_dec_str(),
            s.to_dec_str()
        );

        if r < one || s < one {
            warn!("nonce k = {} produced a degenerate signature", k.to_dec_str());
            return Err(DsaError::DegenerateSignature {
                r: r.to_dec_str(),
                s: s.to_dec_str(),
            }
            .into());
        }
        Ok(Signature { r, s })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature<T> {
    pub r: T,
    pub s: T,
}
