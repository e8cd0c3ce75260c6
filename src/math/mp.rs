//! Fixed-point multiprecision evaluation for the refinement loop.
//!
//! A number at `f` fractional bits is the integer `v` standing for `v · 2^-f`.
//! Every evaluation reports its accumulated truncation error as a count of
//! units in the last place, so the tie detector can bracket the exact value.
//! Counts saturate at `u64::MAX`, which the detector treats as "unknown".

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::split;

/// `v · 2^(scale - frac)`, off from the exact value by at most `err` units
/// of `2^(scale - frac)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Approx {
    pub(crate) v: BigInt,
    pub(crate) frac: u64,
    pub(crate) scale: i64,
    pub(crate) err: u64,
}

impl Approx {
    fn fixed(v: BigInt, frac: u64, err: u64) -> Self {
        Approx { v, frac, scale: 0, err }
    }

    /// The exact value `mag · 2^exp`.
    pub(crate) fn exact(mag: BigUint, exp: i64) -> Self {
        Approx { v: BigInt::from(mag), frac: 0, scale: exp, err: 0 }
    }

    pub(crate) fn negate(mut self) -> Self {
        self.v = -self.v;
        self
    }
}

// m(1) <= sqrt(2) < m(1) + 1 at 52 fraction bits
const SQRT2_MANT: u64 = 0x0016_a09e_667f_3bcc;

#[inline]
fn unit(f: u64) -> BigUint {
    BigUint::one() << f
}

/// Truncating fixed-point product.
#[inline]
fn mul_fixed(a: &BigUint, b: &BigUint, f: u64) -> BigUint {
    (a * b) >> f
}

#[inline]
fn signed(neg: bool, mag: BigUint) -> BigInt {
    BigInt::from_biguint(if neg { Sign::Minus } else { Sign::Plus }, mag)
}

/// Shift right rounding toward zero (`>>` on `BigInt` floors).
#[inline]
fn shr_trunc(v: &BigInt, n: u64) -> BigInt {
    signed(v.is_negative(), v.magnitude() >> n)
}

/// `x` at `f` fractional bits; exact whenever `x` has no bits below `2^-f`.
pub(crate) fn from_f64(x: f64, f: u64) -> BigInt {
    let (neg, m, e) = split(x);
    let shift = e + f as i64;
    let mag = BigUint::from(m);
    let mag = if shift >= 0 {
        mag << shift as u64
    } else {
        mag >> (-shift) as u64
    };
    signed(neg, mag)
}

/// Nearby double, for choosing reductions only.
fn to_f64_approx(v: &BigInt, f: u64) -> f64 {
    let drop = v.bits().saturating_sub(63);
    let top = (v.magnitude() >> drop).to_u64().unwrap_or(0) as f64;
    let r = top * 2f64.powi(drop as i32 - f as i32);
    if v.is_negative() { -r } else { r }
}

fn saturating_err(e: &BigUint) -> u64 {
    e.to_u64().unwrap_or(u64::MAX)
}

/// `sum_k (±1)^k s^(2k+1) / (2k+1)` for `0 <= s < 1/2`, with `q = s²`.
/// Returns the sum and the number of terms taken.
fn odd_series(s: &BigUint, q: &BigUint, f: u64, alternating: bool) -> (BigUint, u64) {
    let mut p = s.clone();
    let mut pos = s.clone();
    let mut neg = BigUint::zero();
    let mut k: u32 = 1;
    loop {
        p = mul_fixed(&p, q, f);
        if p.is_zero() {
            break;
        }
        let t = &p / (2 * k + 1);
        if alternating && k & 1 == 1 {
            neg += t;
        } else {
            pos += t;
        }
        k += 1;
    }
    (pos - neg, u64::from(k))
}

/// `atan(1/n)`, or `atanh(1/n)` when not `alternating`, within
/// `3·terms + 3` ulps.
fn arctan_recip(n: u32, f: u64, alternating: bool) -> (BigUint, u64) {
    let n2 = n * n;
    let mut p = unit(f) / n;
    let mut pos = p.clone();
    let mut neg = BigUint::zero();
    let mut k: u32 = 1;
    loop {
        p /= n2;
        if p.is_zero() {
            break;
        }
        let t = &p / (2 * k + 1);
        if alternating && k & 1 == 1 {
            neg += t;
        } else {
            pos += t;
        }
        k += 1;
    }
    (pos - neg, u64::from(k))
}

/// π within 2 ulps (Machin).
pub(crate) fn pi(f: u64) -> BigUint {
    let g = f + 32;
    let (a, _) = arctan_recip(5, g, true);
    let (b, _) = arctan_recip(239, g, true);
    ((a << 4u32) - (b << 2u32)) >> 32u32
}

/// ln 2 = 2·atanh(1/3) within 2 ulps.
pub(crate) fn ln2(f: u64) -> BigUint {
    let (s, _) = arctan_recip(3, f + 32, false);
    (s << 1u32) >> 32u32
}

/// `exp(t)` for `t` at `f` bits known within `et` ulps, `|t| < 1100`.
pub(crate) fn exp(t: &BigInt, et: u64, f: u64) -> Approx {
    let k = (to_f64_approx(t, f) * std::f64::consts::LOG2_E).round_ties_even() as i64;
    let kl = shr_trunc(&(BigInt::from(ln2(f + 16)) * k), 16);
    let r = t - kl;
    let er = et.saturating_add(2);

    let ra = r.magnitude();
    let mut term = unit(f);
    let mut pos = term.clone();
    let mut neg = BigUint::zero();
    let mut n: u32 = 1;
    loop {
        term = mul_fixed(&term, ra, f) / n;
        if term.is_zero() {
            break;
        }
        if r.is_negative() && n & 1 == 1 {
            neg += &term;
        } else {
            pos += &term;
        }
        n += 1;
    }
    let err = er
        .saturating_mul(4)
        .saturating_add(6 * u64::from(n))
        .saturating_add(16);
    Approx { v: BigInt::from(pos) - BigInt::from(neg), frac: f, scale: k, err }
}

/// `ln x` for finite `x > 0`, `x != 1`.
pub(crate) fn ln(x: f64, f: u64) -> Approx {
    let (_, m, e) = split(x);
    let lz = i64::from(m.leading_zeros()) - 11;
    let m = m << lz;
    let e = e - lz;
    // x = (m · 2^-52) · 2^(e + 52), halved into [sqrt(1/2), sqrt(2))
    let (mant, ex) = if m > SQRT2_MANT {
        (BigInt::from(m) << (f - 53), e + 53)
    } else {
        (BigInt::from(m) << (f - 52), e + 52)
    };
    let one = BigInt::from(unit(f));
    let num = &mant - &one;
    let den = &mant + &one;
    let s = (num << f) / den;

    let sa = s.magnitude();
    let (sum, terms) = odd_series(sa, &mul_fixed(sa, sa, f), f, false);
    let log_m = signed(s.is_negative(), sum << 1u32);
    let eln2 = shr_trunc(&(BigInt::from(ln2(f + 16)) * ex), 16);
    Approx::fixed(eln2 + log_m, f, 8 * terms + 16)
}

/// `atan x` for finite `|x| >= 2^-60`.
pub(crate) fn atan(x: f64, f: u64) -> Approx {
    let (neg, m, e) = split(x);
    let one = unit(f);
    let invert = x.abs() > 1.0;
    let (t, et) = if invert {
        let den = BigUint::from(m) << (e + f as i64) as u64;
        ((&one << f) / den, 1)
    } else {
        (from_f64(x.abs(), f).into_parts().1, 0)
    };

    // atan t = atan c + atan((t - c)/(1 + t·c)), c in {0, 1/4, 1/2, 1}
    let (base, base_err, s, es) = if t < (&one >> 3u32) {
        (BigInt::zero(), 0, BigInt::from(t), et)
    } else {
        let (c_num, c_shift, base, base_err) = if t < (&one * 3u32 >> 3u32) {
            let (b, terms) = arctan_recip(4, f, true);
            (BigInt::from(&t << 2u32) - BigInt::from(one.clone()), 2u32, b, 3 * terms + 3)
        } else if t < (&one * 3u32 >> 2u32) {
            let (b, terms) = arctan_recip(2, f, true);
            (BigInt::from(&t << 1u32) - BigInt::from(one.clone()), 1u32, b, 3 * terms + 3)
        } else {
            (BigInt::from(t.clone()) - BigInt::from(one.clone()), 0u32, pi(f) >> 2u32, 2)
        };
        let den = BigInt::from((&one << c_shift) + &t);
        let s = (c_num << f) / den;
        (BigInt::from(base), base_err, s, 5 * et + 1)
    };

    let sa = s.magnitude();
    let (sum, terms) = odd_series(sa, &mul_fixed(sa, sa, f), f, true);
    let mut r = base + signed(s.is_negative(), sum);
    let mut err = 3 * terms + 2 * es + base_err + 4;
    if invert {
        r = BigInt::from(pi(f) >> 1u32) - r;
        err += 2;
    }
    Approx::fixed(if neg { -r } else { r }, f, err)
}

/// `|x| mod π/2` as `(quadrant, r)` with `|r| <= π/4`, `r` within 2 ulps.
fn reduce_pio2(ax: f64, f: u64) -> (u32, BigInt) {
    if ax < 0.78 {
        return (0, from_f64(ax, f));
    }
    let (_, m, e) = split(ax);
    // one guard word plus the bits q·(π/2) can magnify
    let extra = 64 + (e + 53).max(0) as u64;
    let p = f + extra;
    let xp = BigUint::from(m) << (e + p as i64) as u64;
    let half_pi = pi(p) >> 1u32;
    let (mut q, rem) = xp.div_rem(&half_pi);
    let mut r = BigInt::from(rem);
    if r > BigInt::from(&half_pi >> 1u32) {
        r -= BigInt::from(half_pi);
        q += 1u32;
    }
    let quadrant = (q % 4u32).to_u32().unwrap_or(0);
    (quadrant, shr_trunc(&r, extra))
}

/// `(sin r, cos r, err_sin, err_cos)` for `|r| <= π/4` known within `er` ulps.
fn sin_cos_series(r: &BigInt, er: u64, f: u64) -> (BigInt, BigInt, u64, u64) {
    let ra = r.magnitude();
    let r2 = mul_fixed(ra, ra, f);

    let mut term = ra.clone();
    let mut pos = ra.clone();
    let mut neg = BigUint::zero();
    let mut k: u32 = 1;
    loop {
        term = mul_fixed(&term, &r2, f) / ((2 * k) * (2 * k + 1));
        if term.is_zero() {
            break;
        }
        if k & 1 == 1 {
            neg += &term;
        } else {
            pos += &term;
        }
        k += 1;
    }
    let s = signed(r.is_negative(), pos - neg);
    let es = 3 * u64::from(k) + 2 * er + 4;

    let mut term = unit(f);
    let mut pos = term.clone();
    let mut neg = BigUint::zero();
    let mut k: u32 = 1;
    loop {
        term = mul_fixed(&term, &r2, f) / ((2 * k - 1) * (2 * k));
        if term.is_zero() {
            break;
        }
        if k & 1 == 1 {
            neg += &term;
        } else {
            pos += &term;
        }
        k += 1;
    }
    let c = BigInt::from(pos) - BigInt::from(neg);
    let ec = 3 * u64::from(k) + 2 * er + 4;
    (s, c, es, ec)
}

pub(crate) fn sin(x: f64, f: u64) -> Approx {
    let (quadrant, r) = reduce_pio2(x.abs(), f);
    let (s, c, es, ec) = sin_cos_series(&r, 2, f);
    let (v, err) = match quadrant {
        0 => (s, es),
        1 => (c, ec),
        2 => (-s, es),
        _ => (-c, ec),
    };
    Approx::fixed(if x < 0.0 { -v } else { v }, f, err)
}

pub(crate) fn cos(x: f64, f: u64) -> Approx {
    let (quadrant, r) = reduce_pio2(x.abs(), f);
    let (s, c, es, ec) = sin_cos_series(&r, 2, f);
    let (v, err) = match quadrant {
        0 => (c, ec),
        1 => (-s, es),
        2 => (-c, ec),
        _ => (s, es),
    };
    Approx::fixed(v, f, err)
}

pub(crate) fn tan(x: f64, f: u64) -> Approx {
    // the quotient loses up to |tan| bits near a pole; carry four extra words
    let g = f + 128;
    let (quadrant, r) = reduce_pio2(x.abs(), g);
    let (s, c, es, ec) = sin_cos_series(&r, 2, g);
    let (num, den, en, ed) = if quadrant & 1 == 0 {
        (s, c, es, ec)
    } else {
        (-c, s, ec, es)
    };
    let den_mag = den.magnitude();
    if *den_mag <= BigUint::from(ed) {
        return Approx::fixed(BigInt::zero(), g, u64::MAX);
    }
    let t = (&num << g) / &den;
    // |n/d - n'/d'| <= (en + |t|·ed) / (|d'| - ed), plus one for the division
    let spread = (BigUint::from(en) + ((t.magnitude() + 1u32) * ed >> g) + 1u32) << g;
    let err = spread / (den_mag - BigUint::from(ed)) + 2u32;
    Approx::fixed(if x < 0.0 { -t } else { t }, g, saturating_err(&err))
}

/// `|x|^y` for finite positive `ax != 1` and finite `y` with
/// `|y · ln ax| < 750`.
pub(crate) fn pow(ax: f64, y: f64, f: u64) -> Approx {
    let g = f + 64;
    let l = ln(ax, g);
    let (yneg, ym, ye) = split(y);
    let prod = l.v * BigInt::from(ym);
    let perr = BigUint::from(l.err) * ym;
    let (t, terr) = if ye >= 0 {
        (prod << ye as u64, perr << ye as u64)
    } else {
        let sh = (-ye) as u64;
        (shr_trunc(&prod, sh), (perr >> sh) + 1u32)
    };
    let t = if yneg { -t } else { t };
    let et = saturating_err(&((terr >> 64u32) + 2u32));
    exp(&shr_trunc(&t, 64), et, f)
}
