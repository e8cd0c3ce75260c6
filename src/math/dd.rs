//! Double-double arithmetic for the fast approximations.
//!
//! Everything is `const fn` so the coefficient tables below are computed at
//! compile time instead of being transcribed. Products use Dekker's split
//! (no FMA), which is exact as long as operands stay below `2^996`.

const SPLIT: f64 = 134_217_729.0; // 2^27 + 1

/// Unevaluated sum `hi + lo` with `|lo| <= ulp(hi) / 2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Dd {
    pub(crate) hi: f64,
    pub(crate) lo: f64,
}

#[inline(always)]
pub(crate) const fn two_sum(a: f64, b: f64) -> Dd {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    Dd { hi: s, lo: err }
}

/// Requires `|a| >= |b|` or `a == 0`.
#[inline(always)]
pub(crate) const fn fast_two_sum(a: f64, b: f64) -> Dd {
    let s = a + b;
    let z = s - a;
    Dd { hi: s, lo: b - z }
}

#[inline(always)]
const fn split(a: f64) -> (f64, f64) {
    let t = a * SPLIT;
    let hi = t - (t - a);
    (hi, a - hi)
}

#[inline(always)]
pub(crate) const fn two_prod(a: f64, b: f64) -> Dd {
    let p = a * b;
    let (ah, al) = split(a);
    let (bh, bl) = split(b);
    let err = ((ah * bh - p) + ah * bl + al * bh) + al * bl;
    Dd { hi: p, lo: err }
}

impl Dd {
    pub(crate) const ZERO: Dd = Dd { hi: 0.0, lo: 0.0 };
    pub(crate) const ONE: Dd = Dd { hi: 1.0, lo: 0.0 };

    #[inline(always)]
    pub(crate) const fn new(hi: f64, lo: f64) -> Self {
        Dd { hi, lo }
    }

    #[inline(always)]
    pub(crate) const fn from_f64(x: f64) -> Self {
        Dd { hi: x, lo: 0.0 }
    }

    #[inline(always)]
    pub(crate) const fn neg(self) -> Self {
        Dd { hi: -self.hi, lo: -self.lo }
    }

    /// Multiplies by a power of two.
    #[inline(always)]
    pub(crate) const fn scale(self, p: f64) -> Self {
        Dd { hi: self.hi * p, lo: self.lo * p }
    }

    #[inline]
    pub(crate) const fn add(self, o: Dd) -> Dd {
        let s = two_sum(self.hi, o.hi);
        let t = two_sum(self.lo, o.lo);
        let u = fast_two_sum(s.hi, s.lo + t.hi);
        fast_two_sum(u.hi, u.lo + t.lo)
    }

    #[inline]
    pub(crate) const fn sub(self, o: Dd) -> Dd {
        self.add(o.neg())
    }

    #[inline]
    pub(crate) const fn add_f64(self, b: f64) -> Dd {
        let s = two_sum(self.hi, b);
        fast_two_sum(s.hi, s.lo + self.lo)
    }

    #[inline]
    pub(crate) const fn mul(self, o: Dd) -> Dd {
        let p = two_prod(self.hi, o.hi);
        fast_two_sum(p.hi, p.lo + (self.hi * o.lo + self.lo * o.hi))
    }

    #[inline]
    pub(crate) const fn mul_f64(self, b: f64) -> Dd {
        let p = two_prod(self.hi, b);
        fast_two_sum(p.hi, p.lo + self.lo * b)
    }

    #[inline]
    pub(crate) const fn div(self, o: Dd) -> Dd {
        let q1 = self.hi / o.hi;
        let r = self.sub(o.mul_f64(q1));
        let q2 = r.hi / o.hi;
        let r = r.sub(o.mul_f64(q2));
        let q3 = r.hi / o.hi;
        fast_two_sum(q1, q2).add_f64(q3)
    }

    #[inline]
    pub(crate) const fn div_f64(self, b: f64) -> Dd {
        self.div(Dd::from_f64(b))
    }

    /// Horner evaluation of `sum c[i] * t^i` for `i` in `0..n`.
    #[inline]
    pub(crate) fn horner(t: Dd, c: &[Dd]) -> Dd {
        let mut acc = Dd::ZERO;
        for &ci in c.iter().rev() {
            acc = acc.mul(t).add(ci);
        }
        acc
    }
}

pub(crate) const INV_FACT_LEN: usize = 32;

/// `1/n!`.
pub(crate) const INV_FACT: [Dd; INV_FACT_LEN] = {
    let mut t = [Dd::ZERO; INV_FACT_LEN];
    t[0] = Dd::ONE;
    let mut n = 1;
    while n < INV_FACT_LEN {
        t[n] = t[n - 1].div_f64(n as f64);
        n += 1;
    }
    t
};

pub(crate) const INV_ODD_LEN: usize = 48;

/// `1/(2k+1)`.
pub(crate) const INV_ODD: [Dd; INV_ODD_LEN] = {
    let mut t = [Dd::ZERO; INV_ODD_LEN];
    let mut k = 0;
    while k < INV_ODD_LEN {
        t[k] = Dd::ONE.div_f64((2 * k + 1) as f64);
        k += 1;
    }
    t
};

/// `ln 2 = 2·atanh(1/3)`.
pub(crate) const LN2: Dd = {
    let mut p = Dd::ONE.div_f64(3.0);
    let mut sum = Dd::ZERO;
    let mut k = 0;
    while k < 36 {
        sum = sum.add(p.mul(INV_ODD[k]));
        p = p.div_f64(9.0);
        k += 1;
    }
    sum.scale(2.0)
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_prod_exact() {
        let a = 1.0 + f64::EPSILON;
        let p = two_prod(a, a);
        assert_eq!(p.hi, 1.0 + 2.0 * f64::EPSILON);
        assert_eq!(p.lo, f64::EPSILON * f64::EPSILON);
    }

    #[test]
    fn test_tables() {
        assert_eq!(LN2.hi, std::f64::consts::LN_2);
        assert!(LN2.lo.abs() <= f64::EPSILON * LN2.hi);
        assert_eq!(INV_FACT[3].hi, 1.0 / 6.0);
        assert_eq!(INV_FACT[10].hi, 1.0 / 3_628_800.0);
        assert_eq!(INV_ODD[1].hi, 1.0 / 3.0);
        let third = INV_ODD[1].mul_f64(3.0);
        assert_eq!(third.hi, 1.0);
        assert!(third.lo.abs() < 1e-31);
    }

    #[test]
    fn test_div() {
        let q = Dd::ONE.div(Dd::from_f64(7.0));
        let back = q.mul_f64(7.0).sub(Dd::ONE);
        assert!(back.hi.abs() < 1e-31, "{back:?}");
    }

    #[test]
    fn test_horner() {
        // e ~= sum 1/n!
        let e = Dd::horner(Dd::ONE, &INV_FACT);
        assert_eq!(e.hi, std::f64::consts::E);
    }
}
