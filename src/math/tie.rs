//! Rounding-tie detection.
//!
//! An approximation is accepted only when every value inside its error
//! interval rounds to the same double. Anything else is refined; a false
//! refine costs time, a false accept would cost correctness.

use super::dd::Dd;
use super::mp::Approx;
use super::rounding::RoundingMode;

const TWOM100: f64 = f64::from_bits(0x39b0_0000_0000_0000);

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Verdict {
    Accept(f64),
    Refine,
}

/// Checks a double-double `z` within relative error `rel` of the exact
/// result. Only round-to-nearest is decided here; directed modes go to the
/// refiner.
#[inline]
pub(crate) fn check(z: Dd, rel: f64, mode: RoundingMode) -> Verdict {
    if mode != RoundingMode::Nearest || !z.hi.is_finite() || z.hi == 0.0 {
        return Verdict::Refine;
    }
    // inflated to cover the rounding of the bound and of lo ± err
    let err = z.hi.abs() * (rel * 1.0001 + TWOM100);
    let up = z.hi + (z.lo + err);
    let down = z.hi + (z.lo - err);
    if up.to_bits() == down.to_bits() {
        Verdict::Accept(up)
    } else {
        Verdict::Refine
    }
}

/// Rounds both ends of a multiprecision approximation in `mode`. `Ok` when
/// they agree; otherwise `Err` with the rounding of the midpoint as the best
/// available answer.
pub(crate) fn certify(a: &Approx, mode: RoundingMode) -> Result<f64, f64> {
    let best = mode.round_fixed(&a.v, a.frac, a.scale);
    if a.err == 0 {
        return Ok(best);
    }
    if a.err == u64::MAX {
        return Err(best);
    }
    let lo = mode.round_fixed(&(&a.v - a.err), a.frac, a.scale);
    let hi = mode.round_fixed(&(&a.v + a.err), a.frac, a.scale);
    if lo.to_bits() == hi.to_bits() {
        Ok(hi)
    } else {
        Err(best)
    }
}
