//! Build-time backend selection for the exported operators.
//!
//! A backend is a type carrying associated functions only, so the operators
//! bind statically to exactly one of them. Cargo features pick [`Active`]:
//! `libmcr` selects [`CorrectlyRounded`]; otherwise `x87` selects
//! [`NativeFpu`] on x86 targets; otherwise [`Library`] is used.

mod correct;
mod library;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x87;

pub use correct::CorrectlyRounded;
pub use library::Library;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use x87::NativeFpu;

/// The trigonometric functions a backend may implement natively.
pub trait TrigBackend {
    /// Short name for diagnostics.
    const NAME: &'static str;

    fn sin(x: f64) -> f64;
    fn cos(x: f64) -> f64;
    fn tan(x: f64) -> f64;
}

/// The full set of backend-dependent operators.
pub trait Backend: TrigBackend {
    fn pow(x: f64, y: f64) -> f64;
    fn exp(x: f64) -> f64;
    fn ln(x: f64) -> f64;
    fn atan(x: f64) -> f64;
}

#[cfg(feature = "libmcr")]
pub type Active = CorrectlyRounded;

#[cfg(all(
    not(feature = "libmcr"),
    feature = "x87",
    any(target_arch = "x86", target_arch = "x86_64")
))]
pub type Active = NativeFpu;

#[cfg(not(any(
    feature = "libmcr",
    all(feature = "x87", any(target_arch = "x86", target_arch = "x86_64"))
)))]
pub type Active = Library;
