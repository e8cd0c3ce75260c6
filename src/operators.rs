//! The exported C-ABI operator surface.
//!
//! Arithmetic, rounding and the functions outside the correctly rounded set
//! are plain IEEE operations or library calls. `pow`, `exp`, `ln`, `sin`,
//! `cos`, `tan` and `atan` bind to the build's [`Active`] backend.

use crate::backend::{Active, Backend, TrigBackend};

#[unsafe(no_mangle)]
pub extern "C" fn constant_e() -> f64 {
    std::f64::consts::E
}

#[unsafe(no_mangle)]
pub extern "C" fn constant_pi() -> f64 {
    std::f64::consts::PI
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_add(x: f64, y: f64) -> f64 {
    x + y
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_subtract(x: f64, y: f64) -> f64 {
    x - y
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_multiply(x: f64, y: f64) -> f64 {
    x * y
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_divide(x: f64, y: f64) -> f64 {
    x / y
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_pow(x: f64, y: f64) -> f64 {
    Active::pow(x, y)
}

/// C `fmod`: the sign of `x`, magnitude below `|y|`.
#[unsafe(no_mangle)]
pub extern "C" fn operator_remainder(x: f64, y: f64) -> f64 {
    x % y
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_abs(x: f64) -> f64 {
    x.abs()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_exp(x: f64) -> f64 {
    Active::exp(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_ln(x: f64) -> f64 {
    Active::ln(x)
}

/// Base-10 logarithm.
#[unsafe(no_mangle)]
pub extern "C" fn operator_log(x: f64) -> f64 {
    x.log10()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_sin(x: f64) -> f64 {
    Active::sin(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_cos(x: f64) -> f64 {
    Active::cos(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_tan(x: f64) -> f64 {
    Active::tan(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_asin(x: f64) -> f64 {
    x.asin()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_acos(x: f64) -> f64 {
    x.acos()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_atan(x: f64) -> f64 {
    Active::atan(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_sinh(x: f64) -> f64 {
    x.sinh()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_cosh(x: f64) -> f64 {
    x.cosh()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_tanh(x: f64) -> f64 {
    x.tanh()
}

/// Rounds half away from zero.
#[unsafe(no_mangle)]
pub extern "C" fn operator_round(x: f64) -> f64 {
    x.round()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_floor(x: f64) -> f64 {
    x.floor()
}

#[unsafe(no_mangle)]
pub extern "C" fn operator_ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(constant_e().to_bits(), 0x4005_bf0a_8b14_5769);
        assert_eq!(constant_pi().to_bits(), 0x4009_21fb_5444_2d18);
    }

    #[test]
    fn test_arithmetic_is_ieee() {
        assert_eq!(operator_add(0.1, 0.2), 0.30000000000000004);
        assert_eq!(operator_subtract(-0.0, 0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(operator_multiply(1e308, 10.0), f64::INFINITY);
        assert_eq!(operator_divide(1.0, -0.0), f64::NEG_INFINITY);
        assert!(operator_divide(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_remainder_keeps_sign_of_dividend() {
        assert_eq!(operator_remainder(5.5, 2.0), 1.5);
        assert_eq!(operator_remainder(-5.5, 2.0), -1.5);
        assert_eq!(operator_remainder(5.5, -2.0), 1.5);
        assert_eq!(operator_remainder(-4.0, 2.0).to_bits(), (-0.0f64).to_bits());
        assert!(operator_remainder(1.0, 0.0).is_nan());
        assert!(operator_remainder(f64::INFINITY, 1.0).is_nan());
        assert_eq!(operator_remainder(3.0, f64::INFINITY), 3.0);
    }

    #[test]
    fn test_rounding_operators() {
        assert_eq!(operator_round(2.5), 3.0);
        assert_eq!(operator_round(-2.5), -3.0);
        assert_eq!(operator_round(0.49999999999999994), 0.0);
        assert_eq!(operator_round(-0.4).to_bits(), (-0.0f64).to_bits());
        assert_eq!(operator_floor(-1.5), -2.0);
        assert_eq!(operator_ceil(-1.5), -1.0);
        assert_eq!(operator_ceil(-0.5).to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn test_library_operators() {
        assert_eq!(operator_abs(-3.0), 3.0);
        assert_eq!(operator_sqrt(2.0), std::f64::consts::SQRT_2);
        assert!(operator_sqrt(-1.0).is_nan());
        assert_eq!(operator_log(1000.0), 3.0);
        assert!(operator_asin(1.5).is_nan());
        assert_eq!(operator_acos(1.0), 0.0);
        assert_eq!(operator_sinh(0.0), 0.0);
        assert_eq!(operator_cosh(0.0), 1.0);
        assert_eq!(operator_tanh(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_atan_contract() {
        assert_eq!(operator_atan(0.0).to_bits(), 0);
        assert_eq!(operator_atan(-0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(operator_atan(f64::INFINITY), std::f64::consts::FRAC_PI_2);
        assert_eq!(operator_atan(f64::NEG_INFINITY), -std::f64::consts::FRAC_PI_2);
        assert!(operator_atan(f64::NAN).is_nan());
    }
}
