use super::{Backend, TrigBackend};

/// The platform math library.
#[derive(Debug, Clone, Copy, Default)]
pub struct Library;

impl TrigBackend for Library {
    const NAME: &'static str = "library";

    #[inline]
    fn sin(x: f64) -> f64 {
        x.sin()
    }
    #[inline]
    fn cos(x: f64) -> f64 {
        x.cos()
    }
    #[inline]
    fn tan(x: f64) -> f64 {
        x.tan()
    }
}

impl Backend for Library {
    #[inline]
    fn pow(x: f64, y: f64) -> f64 {
        x.powf(y)
    }
    #[inline]
    fn exp(x: f64) -> f64 {
        x.exp()
    }
    #[inline]
    fn ln(x: f64) -> f64 {
        x.ln()
    }
    #[inline]
    fn atan(x: f64) -> f64 {
        x.atan()
    }
}
