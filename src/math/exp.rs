//! exp(x), correctly rounded.

use super::classify::{Class, EXP_TINY, classify};
use super::dd::{Dd, INV_FACT, LN2};
use super::refine::{RefineError, Refiner, settle};
use super::rounding::RoundingMode;
use super::tie::{Verdict, check};
use super::{mp, quiet_nan};

/// 709.782712893383973096: the largest x with exp(x) <= MAX.
const OVERFLOW_X: f64 = f64::from_bits(0x4086_2e42_fefa_39ef);
/// exp(x) < 2^-1075 below this.
const UNDERFLOW_X: f64 = -745.2;

const TERMS: usize = 22;
const FAST_REL: f64 = f64::from_bits(0x3bb0_0000_0000_0000); // 2^-68

#[inline]
pub(super) fn pow2(k: i32) -> f64 {
    f64::from_bits(((k + 1023) as u64) << 52)
}

/// Splits `exp(t) = e · 2^k` with `e` in `[0.7, 1.42]`, when `k` keeps the
/// result normal. The error of `e` is `2^-90` relative plus `|t.hi|·2^-104`.
pub(super) fn exp_dd(t: Dd) -> Option<(Dd, i32)> {
    let k = (t.hi * std::f64::consts::LOG2_E).round_ties_even();
    if !(-1021.0..=1023.0).contains(&k) {
        return None;
    }
    let r = t.sub(LN2.mul_f64(k));
    Some((Dd::horner(r, &INV_FACT[..TERMS]), k as i32))
}

pub(crate) fn eval(x: f64, mode: RoundingMode, refiner: &Refiner) -> Result<f64, RefineError> {
    match classify(x, EXP_TINY) {
        Class::Zero => return Ok(1.0),
        Class::Nan => return Ok(quiet_nan(x)),
        Class::Infinite => return Ok(if x > 0.0 { x } else { 0.0 }),
        Class::Tiny(_) => return Ok(1.0 + x),
        Class::Normal => {}
    }
    if x > OVERFLOW_X {
        return Ok(mode.overflow(false));
    }
    if x < UNDERFLOW_X {
        return Ok(mode.underflow(false));
    }

    if refiner.uses_fast_path() {
        if let Some((e, k)) = exp_dd(Dd::from_f64(x)) {
            if let Verdict::Accept(v) = check(e, FAST_REL, mode) {
                return Ok(v * pow2(k));
            }
        }
    }
    refiner.run("exp", mode, |bits| mp::exp(&mp::from_f64(x, bits), 0, bits))
}

/// exp(x) under an explicit refinement configuration.
pub fn exp_with(x: f64, refiner: &Refiner) -> Result<f64, RefineError> {
    eval(x, RoundingMode::current(), refiner)
}

/// Correctly rounded natural exponential.
pub fn exp(x: f64) -> f64 {
    settle(exp_with(x, &Refiner::new()))
}
