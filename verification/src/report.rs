use std::io::Write;

use bignum::BigInt as BigNum;
use bignum::BigNumTrait;
use dsa::Verification;

use crate::demonstration::{Demonstration, Keys};
use crate::errors::*;
use crate::input::Inputs;

const RULE: &str = "---------------------------------------------------";

pub fn print_banner<W: Write>(out: &mut W) -> Result<(), Error> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{: ^51}", "DSA Signature Verification")?;
    writeln!(out, "{}\n", RULE)?;
    Ok(())
}

/// Derives the keys, signs and verifies, writing each part of the report as soon as it is known.
/// On a rejected signature `g` and `y` have already been written when the error comes back.
pub fn write_run<W: Write>(out: &mut W, inputs: &Inputs, strict: bool) -> Result<(), Error> {
    let keys = Keys::derive(inputs, strict)?;
    write_keys(out, &keys)?;
    let demo = Demonstration::sign_and_verify(&keys, inputs)?;
    write_signature(out, &demo)
}

pub fn write_keys<W: Write>(out: &mut W, keys: &Keys) -> Result<(), Error> {
    writeln!(out, "\n----------------------Output----------------------\n")?;
    writeln!(out, "g: {}", keys.g().to_dec_str())?;
    writeln!(out, "y: {}", keys.y.to_dec_str())?;
    Ok(())
}

pub fn write_signature<W: Write>(out: &mut W, demo: &Demonstration) -> Result<(), Error> {
    writeln!(out, "r: {}", demo.signature.r.to_dec_str())?;
    writeln!(out, "s: {}", demo.signature.s.to_dec_str())?;
    write_verification(out, "H(M1)", &demo.first)?;
    write_verification(out, "H(M2)", &demo.second)?;
    Ok(())
}

fn write_verification<W: Write>(
    out: &mut W,
    label: &str,
    verification: &Verification<BigNum>,
) -> Result<(), Error> {
    writeln!(out, "\n{}:", label)?;
    writeln!(out, "w: {}", verification.w.to_dec_str())?;
    writeln!(out, "u1: {}", verification.u1.to_dec_str())?;
    writeln!(out, "u2: {}", verification.u2.to_dec_str())?;
    writeln!(out, "v: {}", verification.v.to_dec_str())?;
    writeln!(out, "v == r: {}", verification.valid)?;
    Ok(())
}
