use super::{Backend, TrigBackend};
use crate::math;

/// The correctly rounded core in [`crate::math`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectlyRounded;

impl TrigBackend for CorrectlyRounded {
    const NAME: &'static str = "libmcr";

    #[inline]
    fn sin(x: f64) -> f64 {
        math::sin(x)
    }
    #[inline]
    fn cos(x: f64) -> f64 {
        math::cos(x)
    }
    #[inline]
    fn tan(x: f64) -> f64 {
        math::tan(x)
    }
}

impl Backend for CorrectlyRounded {
    #[inline]
    fn pow(x: f64, y: f64) -> f64 {
        math::pow(x, y)
    }
    #[inline]
    fn exp(x: f64) -> f64 {
        math::exp(x)
    }
    #[inline]
    fn ln(x: f64) -> f64 {
        math::ln(x)
    }
    #[inline]
    fn atan(x: f64) -> f64 {
        math::atan(x)
    }
}
