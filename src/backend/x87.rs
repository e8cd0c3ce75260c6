//! `fsin`, `fcos` and `fptan` on the x87 stack.
//!
//! The instructions reduce their operand internally against a 66-bit π and
//! leave it untouched (C2 set) at `|x| >= 2^63`; those arguments and
//! non-finite ones go to the library.

use core::arch::asm;

use super::{Backend, Library, TrigBackend};

/// 2^63.
const X87_LIMIT: f64 = f64::from_bits(0x43e0_0000_0000_0000);

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFpu;

#[inline(always)]
fn in_range(x: f64) -> bool {
    x.abs() < X87_LIMIT
}

macro_rules! x87_unary {
    ($name:ident, $($insn:literal),+) => {
        #[inline]
        fn $name(x: f64) -> f64 {
            let mut v = x;
            // Safety: loads `v`, runs the instruction sequence and stores the
            // result back through the same pointer. The sequence leaves the
            // register stack as it found it; every x87 register is clobbered.
            unsafe {
                asm!(
                    "fld qword ptr [{p}]",
                    $($insn,)+
                    "fstp qword ptr [{p}]",
                    p = in(reg) core::ptr::addr_of_mut!(v),
                    out("st(0)") _, out("st(1)") _, out("st(2)") _, out("st(3)") _,
                    out("st(4)") _, out("st(5)") _, out("st(6)") _, out("st(7)") _,
                    options(nostack),
                );
            }
            v
        }
    };
}

x87_unary!(fsin, "fsin");
x87_unary!(fcos, "fcos");
// fptan pushes 1.0 above the tangent
x87_unary!(fptan, "fptan", "fstp st(0)");

impl TrigBackend for NativeFpu {
    const NAME: &'static str = "x87";

    fn sin(x: f64) -> f64 {
        if in_range(x) { fsin(x) } else { Library::sin(x) }
    }
    fn cos(x: f64) -> f64 {
        if in_range(x) { fcos(x) } else { Library::cos(x) }
    }
    fn tan(x: f64) -> f64 {
        if in_range(x) { fptan(x) } else { Library::tan(x) }
    }
}

impl Backend for NativeFpu {
    #[inline]
    fn pow(x: f64, y: f64) -> f64 {
        Library::pow(x, y)
    }
    #[inline]
    fn exp(x: f64) -> f64 {
        Library::exp(x)
    }
    #[inline]
    fn ln(x: f64) -> f64 {
        Library::ln(x)
    }
    #[inline]
    fn atan(x: f64) -> f64 {
        Library::atan(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_zero_and_specials() {
        assert_eq!(NativeFpu::sin(-0.0).to_bits(), (-0.0f64).to_bits());
        assert!(NativeFpu::sin(f64::INFINITY).is_nan());
        assert!(NativeFpu::cos(f64::NEG_INFINITY).is_nan());
        assert!(NativeFpu::tan(f64::NAN).is_nan());
    }

    #[test]
    fn test_huge_arguments_use_library() {
        for &x in &[1e19, -1e22, f64::MAX] {
            assert_eq!(NativeFpu::sin(x), x.sin());
            assert_eq!(NativeFpu::cos(x), x.cos());
            assert_eq!(NativeFpu::tan(x), x.tan());
        }
    }

    #[test]
    fn test_close_to_library_in_range() {
        let mut x = -100.0;
        while x < 100.0 {
            assert!((NativeFpu::sin(x) - x.sin()).abs() <= 4.0 * f64::EPSILON, "sin({x})");
            assert!((NativeFpu::cos(x) - x.cos()).abs() <= 4.0 * f64::EPSILON, "cos({x})");
            x += 0.173;
        }
        assert!((NativeFpu::tan(0.5) - 0.5f64.tan()).abs() <= 4.0 * f64::EPSILON);
    }
}
