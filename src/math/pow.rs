//! pow(x, y), correctly rounded.
//!
//! After the C99 Annex F special cases, results that are dyadic rationals
//! (exact powers, exact square roots and their powers) are formed exactly and
//! rounded directly: those may sit on a rounding boundary, where no amount
//! of approximation certifies. Everything else is exp(y·ln|x|).

use num_bigint::BigUint;

use super::exp::{exp_dd, pow2};
use super::log::ln_dd;
use super::mp::{self, Approx};
use super::refine::{RefineError, Refiner, settle};
use super::rounding::RoundingMode;
use super::tie::{Verdict, check};
use super::{classify_integer, quiet_nan, split};

const FAST_REL: f64 = f64::from_bits(0x3bf0_0000_0000_0000); // 2^-64
/// |x^y| is certainly above the overflow threshold when y·ln|x| exceeds this.
const LOG_OVERFLOW: f64 = 710.0;
/// ... and certainly below half the smallest subnormal under this.
const LOG_UNDERFLOW: f64 = -746.0;

/// `|x|^y` as an exact value when it is a dyadic rational small enough to
/// build. `ax` is finite, positive and not 1; `y` is finite and nonzero.
fn exact(ax: f64, y: f64) -> Option<Approx> {
    let (_, m, e) = split(ax);
    let tz = m.trailing_zeros();
    let (mut mx, mut ex) = (m >> tz, e + i64::from(tz));
    let (yneg, my, ey) = split(y);
    let tz = my.trailing_zeros();
    let (my, mut ey) = (my >> tz, ey + i64::from(tz));

    // y = my/2^k: x must be a perfect 2^k-th power
    while ey < 0 {
        if ex & 1 != 0 {
            return None;
        }
        let r = mx.isqrt();
        if r * r != mx {
            return None;
        }
        mx = r;
        ex /= 2;
        ey += 1;
    }

    if mx == 1 {
        // a power of two; far out of range is left to the overflow checks
        if ey > 16 {
            return None;
        }
        let n = i128::from(my) << ey;
        let exp = i128::from(ex) * if yneg { -n } else { n };
        if exp.abs() > 2200 {
            return None;
        }
        return Some(Approx::exact(BigUint::from(1u32), exp as i64));
    }
    if yneg || ey > 6 {
        return None;
    }
    let n = my << ey;
    if n > 64 {
        return None;
    }
    Some(Approx::exact(BigUint::from(mx).pow(n as u32), ex * n as i64))
}

pub(crate) fn eval(x: f64, y: f64, mode: RoundingMode, refiner: &Refiner) -> Result<f64, RefineError> {
    if y == 0.0 || x == 1.0 {
        return Ok(1.0);
    }
    if x.is_nan() {
        return Ok(quiet_nan(x));
    }
    if y.is_nan() {
        return Ok(quiet_nan(y));
    }
    let ax = x.abs();
    if y.is_infinite() {
        if ax == 1.0 {
            return Ok(1.0);
        }
        return Ok(if (ax > 1.0) == (y > 0.0) { f64::INFINITY } else { 0.0 });
    }

    let (y_int, y_odd) = classify_integer(y);
    let neg = x.is_sign_negative() && y_odd;
    if x == 0.0 || x.is_infinite() {
        let big = (x == 0.0) != (y > 0.0);
        let mag = if big { f64::INFINITY } else { 0.0 };
        return Ok(if neg { -mag } else { mag });
    }
    if x < 0.0 && !y_int {
        return Ok(f64::NAN);
    }
    if ax == 1.0 {
        return Ok(if neg { -1.0 } else { 1.0 });
    }

    let signed = |a: Approx| if neg { a.negate() } else { a };
    if let Some(a) = exact(ax, y) {
        let a = signed(a);
        return Ok(mode.round_fixed(&a.v, a.frac, a.scale));
    }

    // t is NaN when y·ln|x| overflows; the direction comes from the signs
    let t = ln_dd(ax).mul_f64(y);
    if !(LOG_UNDERFLOW..=LOG_OVERFLOW).contains(&t.hi) {
        return Ok(if (ax > 1.0) == (y > 0.0) {
            mode.overflow(neg)
        } else {
            mode.underflow(neg)
        });
    }
    if refiner.uses_fast_path() {
        if let Some((e, k)) = exp_dd(t) {
            if let Verdict::Accept(v) = check(e, FAST_REL, mode) {
                let v = v * pow2(k);
                return Ok(if neg { -v } else { v });
            }
        }
    }
    refiner.run("pow", mode, |bits| signed(mp::pow(ax, y, bits)))
}

/// pow(x, y) under an explicit refinement configuration.
pub fn pow_with(x: f64, y: f64, refiner: &Refiner) -> Result<f64, RefineError> {
    eval(x, y, RoundingMode::current(), refiner)
}

/// Correctly rounded power function.
pub fn pow(x: f64, y: f64) -> f64 {
    settle(pow_with(x, y, &Refiner::new()))
}
