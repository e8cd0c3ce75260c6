//! Double-precision operators exported through a C ABI.
//!
//! [`operators`] is the loadable surface, [`extension`] describes the build,
//! [`backend`] binds the backend-dependent operators at compile time and
//! [`math`] is the correctly rounded core behind the `libmcr` backend.

pub mod backend;
pub mod extension;
pub mod math;
pub mod operators;

pub use backend::{Active, Backend, TrigBackend};
pub use math::{Exhaustion, RefineError, Refiner, RoundingMode};
