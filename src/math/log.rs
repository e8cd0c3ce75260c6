//! ln(x), correctly rounded.
//!
//! x = 2^e · m with m in [sqrt(1/2), sqrt(2)), and
//! ln m = 2·atanh(s) = 2·(s + s³/3 + s⁵/5 + ...) for s = (m-1)/(m+1).

use super::classify::{Class, classify};
use super::dd::{Dd, INV_ODD, LN2, two_sum};
use super::refine::{RefineError, Refiner, settle};
use super::rounding::RoundingMode;
use super::tie::{Verdict, check};
use super::{mp, quiet_nan, split};

// |s| <= 0.1716, so s^44 / 45 is below 2^-112
const TERMS: usize = 22;
const FAST_REL: f64 = f64::from_bits(0x3bb0_0000_0000_0000); // 2^-68
const SQRT2_MANT: u64 = 0x0016_a09e_667f_3bcc;
const TWOM52: f64 = f64::from_bits(0x3cb0_0000_0000_0000);
const TWOM53: f64 = f64::from_bits(0x3ca0_0000_0000_0000);

/// ln(x) in double-double for finite `x > 0`, relative error below `2^-95`.
pub(super) fn ln_dd(x: f64) -> Dd {
    let (_, m, e) = split(x);
    let lz = i64::from(m.leading_zeros()) - 11;
    let m = m << lz;
    let e = e - lz;
    let (mant, ex) = if m > SQRT2_MANT {
        (m as f64 * TWOM53, e + 53)
    } else {
        (m as f64 * TWOM52, e + 52)
    };
    let s = Dd::from_f64(mant - 1.0).div(two_sum(mant, 1.0));
    let log_m = s.mul(Dd::horner(s.mul(s), &INV_ODD[..TERMS])).scale(2.0);
    if ex == 0 {
        log_m
    } else {
        LN2.mul_f64(ex as f64).add(log_m)
    }
}

pub(crate) fn eval(x: f64, mode: RoundingMode, refiner: &Refiner) -> Result<f64, RefineError> {
    match classify(x, 0) {
        Class::Zero => return Ok(f64::NEG_INFINITY),
        Class::Nan => return Ok(quiet_nan(x)),
        Class::Infinite if x > 0.0 => return Ok(x),
        Class::Infinite => return Ok(f64::NAN),
        Class::Tiny(_) | Class::Normal => {}
    }
    if x < 0.0 {
        return Ok(f64::NAN);
    }
    if x == 1.0 {
        return Ok(0.0);
    }

    if refiner.uses_fast_path() {
        if let Verdict::Accept(v) = check(ln_dd(x), FAST_REL, mode) {
            return Ok(v);
        }
    }
    refiner.run("ln", mode, |bits| mp::ln(x, bits))
}

/// ln(x) under an explicit refinement configuration.
pub fn ln_with(x: f64, refiner: &Refiner) -> Result<f64, RefineError> {
    eval(x, RoundingMode::current(), refiner)
}

/// Correctly rounded natural logarithm.
pub fn ln(x: f64) -> f64 {
    settle(ln_with(x, &Refiner::new()))
}
