//! Correctly rounded elementary functions and the helpers they share.
//!
//! Every function runs the same three phases. The bit classifier settles
//! zeros, NaNs, infinities and tiny arguments from the raw pattern. Under
//! round-to-nearest a double-double approximation with an explicit relative
//! error bound is offered to the tie detector. Whatever it cannot certify goes
//! to the fixed-point refiner, which raises the working precision until the
//! rounding of the exact result is decided in the caller's rounding mode.

#![allow(clippy::excessive_precision)]
#![allow(clippy::unusual_byte_groupings)]

mod arch;
mod atan;
pub(crate) mod classify;
pub(crate) mod dd;
mod exp;
mod log;
pub(crate) mod mp;
mod pow;
pub mod refine;
pub mod rounding;
pub(crate) mod tie;
mod trig;

pub use atan::{atan, atan_with};
pub use exp::{exp, exp_with};
pub use log::{ln, ln_with};
pub use pow::{pow, pow_with};
pub use refine::{Exhaustion, RefineError, Refiner};
pub use rounding::RoundingMode;
pub use trig::{cos, cos_with, sin, sin_with, tan, tan_with};

pub(crate) const PIO2_HI: f64 = f64::from_bits(0x3ff9_21fb_5444_2d18);
pub(crate) const PIO2_LO: f64 = f64::from_bits(0x3c91_a626_3314_5c07);

const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
const MANT_MASK: u64 = 0x000f_ffff_ffff_ffff;
const IMPLICIT_BIT: u64 = 0x0010_0000_0000_0000;
const QUIET_BIT: u64 = 0x0008_0000_0000_0000;

// ========= bit helpers =========

#[inline(always)]
pub(crate) fn hi_word(x: f64) -> u32 {
    (x.to_bits() >> 32) as u32
}
#[inline(always)]
pub(crate) fn lo_word(x: f64) -> u32 {
    (x.to_bits() & 0xffff_ffffu64) as u32
}

/// `|x|` as the unsigned `hi:lo` pattern, ordered like the magnitude.
#[inline(always)]
pub(crate) fn magnitude_bits(x: f64) -> u64 {
    x.to_bits() & !SIGN_MASK
}

/// NaN result for a NaN argument: same payload and sign, quiet bit set.
#[inline(always)]
pub(crate) fn quiet_nan(x: f64) -> f64 {
    f64::from_bits(x.to_bits() | QUIET_BIT)
}

/// Splits a finite `x` into `(negative, m, e)` with `|x| = m · 2^e` exactly.
#[inline]
pub(crate) fn split(x: f64) -> (bool, u64, i64) {
    let u = x.to_bits();
    let neg = u & SIGN_MASK != 0;
    let biased = ((u >> 52) & 0x7ff) as i64;
    let frac = u & MANT_MASK;
    if biased == 0 {
        (neg, frac, -1074)
    } else {
        (neg, frac | IMPLICIT_BIT, biased - 1075)
    }
}

/// Whether a finite `y` is an integer, and whether that integer is odd.
pub(crate) fn classify_integer(y: f64) -> (bool, bool) {
    let (_, m, e) = split(y);
    if m == 0 {
        return (true, false);
    }
    if e >= 1 {
        return (true, false);
    }
    if e == 0 {
        return (true, m & 1 == 1);
    }
    if e < -52 {
        return (false, false);
    }
    let shift = (-e) as u32;
    if m & ((1u64 << shift) - 1) != 0 {
        return (false, false);
    }
    (true, (m >> shift) & 1 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        let x = f64::from_bits(0x3e4d_12ed_0af1_a27f);
        assert_eq!(hi_word(x), 0x3e4d_12ed);
        assert_eq!(lo_word(x), 0x0af1_a27f);
        assert_eq!(magnitude_bits(-x), x.to_bits());
    }

    #[test]
    fn test_split() {
        for &x in &[1.0, -1.5, 0.1, 1e300, f64::MIN_POSITIVE, f64::from_bits(3), -0.0] {
            let (neg, m, e) = split(x);
            assert_eq!(neg, x.is_sign_negative());
            assert!(m < (1 << 53));
            let back = if m < IMPLICIT_BIT {
                f64::from_bits(m)
            } else {
                f64::from_bits((((e + 1075) as u64) << 52) | (m & MANT_MASK))
            };
            assert_eq!(back.to_bits(), x.abs().to_bits(), "split({x:e})");
        }
    }

    #[test]
    fn test_classify_integer() {
        assert_eq!(classify_integer(0.0), (true, false));
        assert_eq!(classify_integer(3.0), (true, true));
        assert_eq!(classify_integer(-4.0), (true, false));
        assert_eq!(classify_integer(0.5), (false, false));
        assert_eq!(classify_integer(2f64.powi(53) + 2.0), (true, false));
        assert_eq!(classify_integer(2f64.powi(52) + 1.0), (true, true));
        assert_eq!(classify_integer(1e-300), (false, false));
    }

    #[test]
    fn test_quiet_nan() {
        let snan = f64::from_bits(0x7ff0_0000_0000_0001);
        let q = quiet_nan(snan);
        assert!(q.is_nan());
        assert_eq!(q.to_bits(), 0x7ff8_0000_0000_0001);
        assert_eq!(quiet_nan(-f64::NAN).to_bits() >> 63, 1);
    }
}
