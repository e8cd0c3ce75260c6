//! Argument classification from the raw IEEE-754 pattern.
//!
//! Thresholds are compared against the combined `hi:lo` magnitude pattern as
//! an unsigned integer, never against the floating value.

use super::{hi_word, lo_word, magnitude_bits};

/// Where a tiny argument sits relative to the normal range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TinyBand {
    /// `|x| >= 2^-967`: a `2^-1022` nudge is far below half an ulp.
    Wide,
    /// `2^-1022 < |x| < 2^-967`: the nudge needs a `2^300` rescale.
    Scaled,
    /// Subnormal, or exactly `2^-1022`.
    Subnormal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Class {
    Zero,
    Nan,
    Infinite,
    Tiny(TinyBand),
    Normal,
}

/// `cbrt(6) * 2^-27`: atan(x) rounds like x at or below this.
pub(crate) const ATAN_TINY: u64 = 0x3e4d_12ed_0af1_a27f;
/// Largest double below `2^-26`.
pub(crate) const SIN_TINY: u64 = 0x3e4f_ffff_ffff_ffff;
/// Largest double below `2^-27`.
pub(crate) const COS_TINY: u64 = 0x3e3f_ffff_ffff_ffff;
pub(crate) const TAN_TINY: u64 = COS_TINY;
/// Largest double below `2^-54`.
pub(crate) const EXP_TINY: u64 = 0x3c8f_ffff_ffff_ffff;

const EXP_ALL_ONES: u32 = 0x7ff0_0000;
const TWOM967_HI: u32 = 0x0380_0000;
const TWOM1022_HI: u32 = 0x0010_0000;

const TWOM1022: f64 = f64::from_bits(0x0010_0000_0000_0000);
const TWO300: f64 = f64::from_bits(0x52b0_0000_0000_0000);
const TWOM300: f64 = f64::from_bits(0x2d30_0000_0000_0000);
const OHU: f64 = f64::from_bits(0x3fef_ffff_ffff_ffff); // 1 - 2^-53

/// Classifies `x` against an inclusive tiny-magnitude limit.
pub(crate) fn classify(x: f64, tiny_limit: u64) -> Class {
    let ix = hi_word(x) & 0x7fff_ffff;
    let lx = lo_word(x);
    if ix >= EXP_ALL_ONES {
        if ((ix - EXP_ALL_ONES) | lx) != 0 {
            return Class::Nan;
        }
        return Class::Infinite;
    }
    if (ix | lx) == 0 {
        return Class::Zero;
    }
    if magnitude_bits(x) <= tiny_limit {
        let band = if ix >= TWOM967_HI {
            TinyBand::Wide
        } else if ix < TWOM1022_HI || ((ix - TWOM1022_HI) | lx) == 0 {
            TinyBand::Subnormal
        } else {
            TinyBand::Scaled
        };
        return Class::Tiny(band);
    }
    Class::Normal
}

/// `x - tiny·sign(x)` rounded in the current mode: the result of a function
/// whose value at a tiny `x` is slightly smaller in magnitude than `x`.
#[inline]
pub(crate) fn shrink_tiny(x: f64, band: TinyBand) -> f64 {
    let z = TWOM1022.copysign(x);
    match band {
        TinyBand::Wide => x - z,
        TinyBand::Subnormal => x * OHU,
        TinyBand::Scaled => (x * TWO300 - z) * TWOM300,
    }
}

/// Counterpart of [`shrink_tiny`] for functions slightly larger than `x`.
#[inline]
pub(crate) fn grow_tiny(x: f64, band: TinyBand) -> f64 {
    let z = TWOM1022.copysign(x);
    match band {
        TinyBand::Wide => x + z,
        TinyBand::Subnormal | TinyBand::Scaled => (x * TWO300 + z) * TWOM300,
    }
}
