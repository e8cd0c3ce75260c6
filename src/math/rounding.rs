//! Rounding-mode context and mode-aware rounding of exact values.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::arch;

/// IEEE-754 rounding-direction attribute of the calling thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    #[default]
    Nearest,
    Down,
    Up,
    TowardZero,
}

impl RoundingMode {
    /// Samples the floating-point control register. Functions call this once
    /// and use the result for the whole evaluation.
    #[inline]
    pub fn current() -> Self {
        arch::rounding_mode()
    }

    /// Whether rounding a magnitude with sign `neg` moves it away from zero.
    #[inline]
    fn away_from_zero(self, neg: bool) -> bool {
        matches!((self, neg), (RoundingMode::Up, false) | (RoundingMode::Down, true))
    }

    /// Result of an overflowing computation with sign `neg`.
    pub(crate) fn overflow(self, neg: bool) -> f64 {
        let mag = if self == RoundingMode::Nearest || self.away_from_zero(neg) {
            f64::INFINITY
        } else {
            f64::MAX
        };
        if neg { -mag } else { mag }
    }

    /// Result of a nonzero computation too small for the smallest subnormal.
    pub(crate) fn underflow(self, neg: bool) -> f64 {
        let mag = if self.away_from_zero(neg) {
            f64::from_bits(1)
        } else {
            0.0
        };
        if neg { -mag } else { mag }
    }

    /// Rounds `hi + lo` where `hi` is a finite nonzero double and `lo` is
    /// smaller than half an ulp of `hi`; only the sign of `lo` matters.
    pub(crate) fn resolve(self, hi: f64, lo: f64) -> f64 {
        if lo == 0.0 {
            return hi;
        }
        match self {
            RoundingMode::Nearest => hi,
            RoundingMode::Up if lo > 0.0 => hi.next_up(),
            RoundingMode::Down if lo < 0.0 => hi.next_down(),
            RoundingMode::TowardZero if (lo < 0.0) != (hi < 0.0) => {
                if hi > 0.0 {
                    hi.next_down()
                } else {
                    hi.next_up()
                }
            }
            _ => hi,
        }
    }

    /// Rounds the exact value `v · 2^(scale - frac)` to a double, including
    /// gradual underflow and overflow.
    pub(crate) fn round_fixed(self, v: &BigInt, frac: u64, scale: i64) -> f64 {
        let neg = v.is_negative();
        let mag = v.magnitude();
        if mag.is_zero() {
            return 0.0;
        }
        let unit = scale - frac as i64;
        let top = unit + mag.bits() as i64 - 1;
        if top > 1023 {
            return self.overflow(neg);
        }
        // weight of the last kept bit
        let keep = (top - 52).max(-1074);
        let drop = keep - unit;
        let q = if drop <= 0 {
            (mag << (-drop) as u64).to_u64().unwrap_or(0)
        } else {
            let d = drop as u64;
            let q = (mag >> d).to_u64().unwrap_or(0);
            let rem = mag - (BigUint::from(q) << d);
            if rem.is_zero() {
                q
            } else {
                let half = BigUint::one() << (d - 1);
                let up = match self {
                    RoundingMode::Nearest => rem > half || (rem == half && q & 1 == 1),
                    _ => self.away_from_zero(neg),
                };
                if up { q + 1 } else { q }
            }
        };
        let bits = (((keep + 1074) as u64) << 52) + q;
        if bits >= 0x7ff0_0000_0000_0000 {
            return self.overflow(neg);
        }
        let r = f64::from_bits(bits);
        if neg { -r } else { r }
    }
}
