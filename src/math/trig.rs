//! sin, cos and tan, correctly rounded.
//!
//! Arguments up to 2^19·π/2 are reduced Cody–Waite style with π/2 split into
//! 33 + 33 + 33 + 53 bits, each product `n·piece` exact, and the remainder
//! kept in double-double. Larger arguments go straight to the refiner, whose
//! reduction carries as many bits of π as the exponent of `x` demands.

use super::classify::{COS_TINY, Class, SIN_TINY, TAN_TINY, classify, grow_tiny, shrink_tiny};
use super::dd::{Dd, INV_FACT, two_prod, two_sum};
use super::refine::{RefineError, Refiner, settle};
use super::rounding::RoundingMode;
use super::tie::{Verdict, check};
use super::{mp, quiet_nan};

const INVPIO2: f64 = f64::from_bits(0x3fe4_5f30_6dc9_c883); // 2/π
const PIO2_1: f64 = f64::from_bits(0x3ff9_21fb_5440_0000); // first 33 bits of π/2
const PIO2_2: f64 = f64::from_bits(0x3dd0_b461_1a60_0000); // second 33 bits
const PIO2_3: f64 = f64::from_bits(0x3ba3_198a_2e00_0000); // third 33 bits
const PIO2_3T: f64 = f64::from_bits(0x397b_839a_2520_49c1); // π/2 - (PIO2_1 + PIO2_2 + PIO2_3)

/// 2^19·π/2, rounded down.
const FAST_REDUCE_MAX: f64 = 823_549.0;
const TWOM50: f64 = f64::from_bits(0x3cd0_0000_0000_0000);

const SIN_TERMS: usize = 15;
const COS_TERMS: usize = 16;

/// `(-1)^k / (2k+1)!`.
const SIN_C: [Dd; SIN_TERMS] = {
    let mut t = [Dd::ZERO; SIN_TERMS];
    let mut k = 0;
    while k < SIN_TERMS {
        let c = INV_FACT[2 * k + 1];
        t[k] = if k % 2 == 0 { c } else { c.neg() };
        k += 1;
    }
    t
};

/// `(-1)^k / (2k)!`.
const COS_C: [Dd; COS_TERMS] = {
    let mut t = [Dd::ZERO; COS_TERMS];
    let mut k = 0;
    while k < COS_TERMS {
        let c = INV_FACT[2 * k];
        t[k] = if k % 2 == 0 { c } else { c.neg() };
        k += 1;
    }
    t
};

const SINCOS_REL: f64 = f64::from_bits(0x3bb0_0000_0000_0000); // 2^-68
const TAN_REL: f64 = f64::from_bits(0x3bd0_0000_0000_0000); // 2^-66

/// `|x| = n·π/2 + r`, returning `(n mod 4, r)` with `|r| <= π/4` (plus a
/// rounding of `n`). `None` when the argument is out of range or `r` is
/// too small for the double-double remainder to stay accurate.
fn reduce(ax: f64) -> Option<(u32, Dd)> {
    if ax < 0.785 {
        return Some((0, Dd::from_f64(ax)));
    }
    if ax > FAST_REDUCE_MAX {
        return None;
    }
    let n = (ax * INVPIO2).round_ties_even();
    let r = two_sum(ax, -(n * PIO2_1))
        .sub(Dd::from_f64(n * PIO2_2))
        .sub(Dd::from_f64(n * PIO2_3))
        .sub(two_prod(n, PIO2_3T));
    if r.hi.abs() < TWOM50 {
        return None;
    }
    Some(((n as u32) & 3, r))
}

#[inline]
fn sin_kernel(r: Dd) -> Dd {
    r.mul(Dd::horner(r.mul(r), &SIN_C))
}

#[inline]
fn cos_kernel(r: Dd) -> Dd {
    Dd::horner(r.mul(r), &COS_C)
}

fn sin_fast(x: f64) -> Option<Dd> {
    let (n, r) = reduce(x.abs())?;
    let v = match n {
        0 => sin_kernel(r),
        1 => cos_kernel(r),
        2 => sin_kernel(r).neg(),
        _ => cos_kernel(r).neg(),
    };
    Some(if x < 0.0 { v.neg() } else { v })
}

fn cos_fast(x: f64) -> Option<Dd> {
    let (n, r) = reduce(x.abs())?;
    Some(match n {
        0 => cos_kernel(r),
        1 => sin_kernel(r).neg(),
        2 => cos_kernel(r).neg(),
        _ => sin_kernel(r),
    })
}

fn tan_fast(x: f64) -> Option<Dd> {
    let (n, r) = reduce(x.abs())?;
    let (s, c) = (sin_kernel(r), cos_kernel(r));
    let v = if n & 1 == 0 { s.div(c) } else { c.div(s).neg() };
    Some(if x < 0.0 { v.neg() } else { v })
}

fn accept(z: Option<Dd>, rel: f64, mode: RoundingMode) -> Option<f64> {
    match check(z?, rel, mode) {
        Verdict::Accept(v) => Some(v),
        Verdict::Refine => None,
    }
}

pub(crate) fn sin_eval(x: f64, mode: RoundingMode, refiner: &Refiner) -> Result<f64, RefineError> {
    match classify(x, SIN_TINY) {
        Class::Zero => return Ok(x),
        Class::Nan => return Ok(quiet_nan(x)),
        Class::Infinite => return Ok(f64::NAN),
        Class::Tiny(band) => return Ok(shrink_tiny(x, band)),
        Class::Normal => {}
    }
    if refiner.uses_fast_path() {
        if let Some(v) = accept(sin_fast(x), SINCOS_REL, mode) {
            return Ok(v);
        }
    }
    refiner.run("sin", mode, |bits| mp::sin(x, bits))
}

pub(crate) fn cos_eval(x: f64, mode: RoundingMode, refiner: &Refiner) -> Result<f64, RefineError> {
    match classify(x, COS_TINY) {
        Class::Zero => return Ok(1.0),
        Class::Nan => return Ok(quiet_nan(x)),
        Class::Infinite => return Ok(f64::NAN),
        Class::Tiny(_) => return Ok(mode.resolve(1.0, -f64::MIN_POSITIVE)),
        Class::Normal => {}
    }
    if refiner.uses_fast_path() {
        if let Some(v) = accept(cos_fast(x), SINCOS_REL, mode) {
            return Ok(v);
        }
    }
    refiner.run("cos", mode, |bits| mp::cos(x, bits))
}

pub(crate) fn tan_eval(x: f64, mode: RoundingMode, refiner: &Refiner) -> Result<f64, RefineError> {
    match classify(x, TAN_TINY) {
        Class::Zero => return Ok(x),
        Class::Nan => return Ok(quiet_nan(x)),
        Class::Infinite => return Ok(f64::NAN),
        Class::Tiny(band) => return Ok(grow_tiny(x, band)),
        Class::Normal => {}
    }
    if refiner.uses_fast_path() {
        if let Some(v) = accept(tan_fast(x), TAN_REL, mode) {
            return Ok(v);
        }
    }
    refiner.run("tan", mode, |bits| mp::tan(x, bits))
}

pub fn sin_with(x: f64, refiner: &Refiner) -> Result<f64, RefineError> {
    sin_eval(x, RoundingMode::current(), refiner)
}

pub fn cos_with(x: f64, refiner: &Refiner) -> Result<f64, RefineError> {
    cos_eval(x, RoundingMode::current(), refiner)
}

pub fn tan_with(x: f64, refiner: &Refiner) -> Result<f64, RefineError> {
    tan_eval(x, RoundingMode::current(), refiner)
}

/// Correctly rounded sine.
pub fn sin(x: f64) -> f64 {
    settle(sin_with(x, &Refiner::new()))
}

/// Correctly rounded cosine.
pub fn cos(x: f64) -> f64 {
    settle(cos_with(x, &Refiner::new()))
}

/// Correctly rounded tangent.
pub fn tan(x: f64) -> f64 {
    settle(tan_with(x, &Refiner::new()))
}
