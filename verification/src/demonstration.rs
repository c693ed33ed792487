use bignum::BigInt as BigNum;
use bignum::BigNumTrait;
use dsa::{DsaParams, DsaPrivate, DsaPublic, Signature, Verification};

use crate::errors::*;
use crate::input::Inputs;

/// Domain parameters and key pair, available before anything is signed.
pub struct Keys {
    pub params: DsaParams<BigNum>,
    pub x: BigNum,
    pub y: BigNum,
}

impl Keys {
    /// With `strict` set, the domain parameters, the key and the nonce are checked here.
    pub fn derive(inputs: &Inputs, strict: bool) -> Result<Self, Error> {
        let params = DsaParams::derive(inputs.p.clone(), inputs.q.clone(), &inputs.h)?;
        if strict {
            params.validate(&inputs.h)?;
            params.validate_exponent("x", &inputs.x)?;
            params.validate_exponent("k", &inputs.k)?;
        }

        let y = params.public_key(&inputs.x);
        info!("g = {}, y = {}", params.g.to_dec_str(), y.to_dec_str());
        Ok(Keys {
            params,
            x: inputs.x.clone(),
            y,
        })
    }

    pub fn g(&self) -> &BigNum {
        &self.params.g
    }
}

/// Outcome of signing `hash1` once and verifying the signature against both hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demonstration {
    pub g: BigNum,
    pub y: BigNum,
    pub signature: Signature<BigNum>,
    pub first: Verification<BigNum>,
    pub second: Verification<BigNum>,
}

impl Demonstration {
    pub fn run(inputs: &Inputs, strict: bool) -> Result<Self, Error> {
        let keys = Keys::derive(inputs, strict)?;
        Demonstration::sign_and_verify(&keys, inputs)
    }

    pub fn sign_and_verify(keys: &Keys, inputs: &Inputs) -> Result<Self, Error> {
        let private = DsaPrivate {
            params: &keys.params,
            x: keys.x.clone(),
        };
        let public = DsaPublic {
            params: &keys.params,
            y: keys.y.clone(),
        };

        let signature = private
            .sign(&inputs.hash1, &inputs.k)
            .map_err(signature_rejected)?;

        let first = public.verify_signature(&inputs.hash1, &signature)?;
        let second = public.verify_signature(&inputs.hash2, &signature)?;
        if first.valid == second.valid {
            warn!("both hashes gave v == r: {}", first.valid);
        }

        Ok(Demonstration {
            g: keys.g().clone(),
            y: public.y,
            signature,
            first,
            second,
        })
    }
}
