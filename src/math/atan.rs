//! atan(x), correctly rounded.
//!
//! The fast path keeps fdlibm's argument reduction around atan(1/2), atan(1),
//! atan(3/2) and π/2 but evaluates the reduced series in double-double, so
//! its result carries a relative error far below what rounding needs.

use super::classify::{ATAN_TINY, Class, classify, shrink_tiny};
use super::dd::{Dd, INV_ODD, two_prod, two_sum};
use super::refine::{RefineError, Refiner, settle};
use super::rounding::RoundingMode;
use super::tie::{Verdict, check};
use super::{PIO2_HI, PIO2_LO, hi_word, mp, quiet_nan};
use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const ATANHI: [f64; 4] = [
    4.636_476_090_008_060_935_15e-01,
    FRAC_PI_4,
    9.827_937_232_473_290_540_82e-01,
    FRAC_PI_2,
];

const ATANLO: [f64; 4] = [
    2.269_877_745_296_168_709_24e-17,
    3.061_616_997_868_383_017_93e-17,
    1.390_331_103_123_099_845_16e-17,
    6.123_233_995_736_766_035_87e-17,
];

const TERMS: usize = 34;

/// `(-1)^k / (2k+1)`.
const AT: [Dd; TERMS] = {
    let mut t = [Dd::ZERO; TERMS];
    let mut k = 0;
    while k < TERMS {
        t[k] = if k % 2 == 0 { INV_ODD[k] } else { INV_ODD[k].neg() };
        k += 1;
    }
    t
};

const FAST_REL: f64 = f64::from_bits(0x3bb0_0000_0000_0000); // 2^-68

/// atan(ax) for normal-range `ax > 0`.
fn fast(ax: f64) -> Dd {
    let ix = hi_word(ax);
    let (id, s) = if ix < 0x3fdc_0000 {
        (None, Dd::from_f64(ax))
    } else if ix < 0x3fe6_0000 {
        // |x| in [7/16, 11/16): atan(1/2) + atan((2x-1)/(2+x))
        (Some(0), Dd::from_f64(2.0 * ax - 1.0).div(two_sum(2.0, ax)))
    } else if ix < 0x3ff3_0000 {
        // [11/16, 19/16): atan(1) + atan((x-1)/(x+1))
        (Some(1), Dd::from_f64(ax - 1.0).div(two_sum(ax, 1.0)))
    } else if ix < 0x4003_8000 {
        // [19/16, 39/16): atan(3/2) + atan((x-1.5)/(1+1.5x))
        (Some(2), Dd::from_f64(ax - 1.5).div(two_prod(1.5, ax).add_f64(1.0)))
    } else if ix < 0x43b0_0000 {
        (Some(3), Dd::from_f64(-1.0).div(Dd::from_f64(ax)))
    } else {
        // |x| >= 2^60: -1/x is negligible beside π/2 to working accuracy
        (Some(3), Dd::from_f64(-1.0 / ax))
    };
    let p = s.mul(Dd::horner(s.mul(s), &AT));
    match id {
        None => p,
        Some(i) => Dd::new(ATANHI[i], ATANLO[i]).add(p),
    }
}

pub(crate) fn eval(x: f64, mode: RoundingMode, refiner: &Refiner) -> Result<f64, RefineError> {
    match classify(x, ATAN_TINY) {
        Class::Zero => return Ok(x),
        Class::Nan => return Ok(quiet_nan(x)),
        Class::Infinite => {
            return Ok(if x > 0.0 {
                mode.resolve(PIO2_HI, PIO2_LO)
            } else {
                mode.resolve(-PIO2_HI, -PIO2_LO)
            });
        }
        Class::Tiny(band) => return Ok(shrink_tiny(x, band)),
        Class::Normal => {}
    }

    if refiner.uses_fast_path() {
        if let Verdict::Accept(v) = check(fast(x.abs()), FAST_REL, mode) {
            return Ok(if x < 0.0 { -v } else { v });
        }
    }
    refiner.run("atan", mode, |bits| mp::atan(x, bits))
}

/// atan(x) under an explicit refinement configuration.
pub fn atan_with(x: f64, refiner: &Refiner) -> Result<f64, RefineError> {
    eval(x, RoundingMode::current(), refiner)
}

/// Correctly rounded arctangent.
pub fn atan(x: f64) -> f64 {
    settle(atan_with(x, &Refiner::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::refine::Exhaustion;

    const MP_ONLY: Refiner = Refiner::new().fast_path(false);

    #[test]
    fn test_specials() {
        assert_eq!(atan(0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(atan(-0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(atan(f64::INFINITY), FRAC_PI_2);
        assert_eq!(atan(f64::NEG_INFINITY), -FRAC_PI_2);
        assert!(atan(f64::NAN).is_nan());
        assert_eq!(atan(1.0), FRAC_PI_4);
        assert_eq!(atan(-1.0), -FRAC_PI_4);
        assert_eq!(atan(1e300), FRAC_PI_2);
        assert_eq!(atan(f64::MAX), FRAC_PI_2);
    }

    #[test]
    fn test_fast_path_agrees_with_refiner() {
        let mut inputs = vec![
            1.353860343122586362e-08_f64.next_up(),
            1e-7,
            0.1,
            0.4375,
            0.4375f64.next_down(),
            0.5,
            0.6875,
            0.6875f64.next_down(),
            1.1875,
            1.5,
            2.4375,
            2.4375f64.next_down(),
            3.0,
            10.0,
            1e10,
            1.1529215046068469e18,
            1e200,
        ];
        let mut x = 1e-8;
        while x < 1e9 {
            inputs.push(x);
            x *= 1.37;
        }
        for &x in &inputs {
            for x in [x, -x] {
                let fast = atan(x);
                let slow = atan_with(x, &MP_ONLY).unwrap();
                assert_eq!(fast.to_bits(), slow.to_bits(), "atan({x:e}): {fast:e} vs {slow:e}");
            }
        }
    }

    #[test]
    fn test_directed_modes() {
        // FRAC_PI_4 lies below π/4
        let r = |mode| eval(1.0, mode, &Refiner::new()).unwrap();
        assert_eq!(r(RoundingMode::Nearest), FRAC_PI_4);
        assert_eq!(r(RoundingMode::Down), FRAC_PI_4);
        assert_eq!(r(RoundingMode::TowardZero), FRAC_PI_4);
        assert_eq!(r(RoundingMode::Up), FRAC_PI_4.next_up());
        let inf = |mode| eval(f64::NEG_INFINITY, mode, &Refiner::new()).unwrap();
        assert_eq!(inf(RoundingMode::Up), -FRAC_PI_2);
        assert_eq!(inf(RoundingMode::Down), -FRAC_PI_2.next_up());
    }

    #[test]
    fn test_exhaustion() {
        let tight = Refiner::new().fast_path(false).max_level(4);
        let err = atan_with(0.3, &tight).unwrap_err();
        let want = atan(0.3);
        assert!((err.best_effort() - want).abs() <= f64::EPSILON * want);
        let lenient = tight.exhaustion(Exhaustion::BestEffort);
        assert_eq!(atan_with(0.3, &lenient).unwrap(), err.best_effort());
    }
}
