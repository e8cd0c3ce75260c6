//! Precision escalation for results the fast path cannot certify.
//!
//! A precision level `nw` evaluates with `32·nw` fractional bits. The loop
//! starts at level 8 and steps by 2 until the tie detector certifies the
//! rounding or the cap is passed.

use log::{error, trace, warn};
use thiserror::Error;

use super::mp::Approx;
use super::rounding::RoundingMode;
use super::tie;

pub const DEFAULT_START_LEVEL: u32 = 8;
pub const DEFAULT_STEP: u32 = 2;
pub const DEFAULT_MAX_LEVEL: u32 = 64;
/// Fractional bits per precision level.
pub const BITS_PER_LEVEL: u64 = 32;

/// What to do when the cap is reached without a certified rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Exhaustion {
    /// Report [`RefineError::Exhausted`]; the plain functions panic with it.
    #[default]
    Abort,
    /// Log a warning and return the best uncertified rounding.
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RefineError {
    #[error("{function}: rounding not certified up to precision level {level} (best effort {best:e})")]
    Exhausted {
        function: &'static str,
        level: u32,
        best: f64,
    },
}

impl RefineError {
    /// Rounding of the last approximation tried.
    pub fn best_effort(&self) -> f64 {
        match self {
            RefineError::Exhausted { best, .. } => *best,
        }
    }
}

/// Refinement configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Refiner {
    start: u32,
    step: u32,
    max_level: u32,
    exhaustion: Exhaustion,
    fast_path: bool,
}

impl Default for Refiner {
    fn default() -> Self {
        Self::new()
    }
}

impl Refiner {
    pub const fn new() -> Self {
        Refiner {
            start: DEFAULT_START_LEVEL,
            step: DEFAULT_STEP,
            max_level: DEFAULT_MAX_LEVEL,
            exhaustion: Exhaustion::Abort,
            fast_path: true,
        }
    }

    pub const fn start_level(mut self, level: u32) -> Self {
        self.start = if level == 0 { 1 } else { level };
        self
    }

    pub const fn step(mut self, step: u32) -> Self {
        self.step = if step == 0 { 1 } else { step };
        self
    }

    /// Highest level tried. A cap below the start level allows a single
    /// uncertified evaluation, which is how tests reach the exhaustion path.
    pub const fn max_level(mut self, level: u32) -> Self {
        self.max_level = level;
        self
    }

    pub const fn exhaustion(mut self, policy: Exhaustion) -> Self {
        self.exhaustion = policy;
        self
    }

    /// Disabling the fast path sends every normal argument to the refiner.
    pub const fn fast_path(mut self, enabled: bool) -> Self {
        self.fast_path = enabled;
        self
    }

    pub const fn uses_fast_path(&self) -> bool {
        self.fast_path
    }

    pub const fn policy(&self) -> Exhaustion {
        self.exhaustion
    }

    /// Evaluates `eval(frac_bits)` at increasing precision until certified.
    pub(crate) fn run<F>(
        &self,
        function: &'static str,
        mode: RoundingMode,
        mut eval: F,
    ) -> Result<f64, RefineError>
    where
        F: FnMut(u64) -> Approx,
    {
        let mut level = self.start;
        let mut best = None;
        while level <= self.max_level {
            let approx = eval(u64::from(level) * BITS_PER_LEVEL);
            match tie::certify(&approx, mode) {
                Ok(v) => {
                    trace!("{function}: certified at level {level}");
                    return Ok(v);
                }
                Err(b) => {
                    trace!("{function}: level {level} inconclusive (err {} ulps)", approx.err);
                    best = Some(b);
                }
            }
            level = level.saturating_add(self.step);
        }
        let best = match best {
            Some(b) => b,
            None => {
                let approx = eval(u64::from(self.start) * BITS_PER_LEVEL);
                tie::certify(&approx, mode).unwrap_or_else(|b| b)
            }
        };
        let err = RefineError::Exhausted {
            function,
            level: self.max_level,
            best,
        };
        match self.exhaustion {
            Exhaustion::BestEffort => {
                warn!("{err}");
                Ok(best)
            }
            Exhaustion::Abort => Err(err),
        }
    }
}

/// Unwraps a refinement outcome under the fatal policy.
#[inline]
pub(crate) fn settle(outcome: Result<f64, RefineError>) -> f64 {
    match outcome {
        Ok(v) => v,
        Err(e) => {
            error!("{e}");
            panic!("{e}");
        }
    }
}
