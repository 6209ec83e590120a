//! Error threshold selection.
//!
//! Each decomposition round classifies its focus targets against a single
//! cutoff: the requested percentile of that round's absolute errors. The
//! [`ThresholdSelector`] owns the percentile parameter across rounds and
//! applies one of two policies:
//!
//! - [`ThresholdPolicy::Static`]: the cutoff is computed on the first round at
//!   the configured percentile and reused verbatim afterwards.
//! - [`ThresholdPolicy::Adaptive`]: before every round (the first included)
//!   the percentile grows by the configured step, capped at 100, and the
//!   cutoff is recomputed on that round's errors.
//!
//! # Example
//!
//! ```
//! use autotrend::threshold::{ThresholdPolicy, ThresholdSelector};
//!
//! let mut selector = ThresholdSelector::new(ThresholdPolicy::Adaptive, 40.0_f64, 10.0);
//! let cutoff = selector.select(&[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
//! // first round already uses P50
//! assert_eq!(selector.current_percentile(), 50.0);
//! assert!((cutoff - 2.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::kernels::percentile::percentile;
use crate::traits::SeriesElement;

/// How the error cutoff evolves across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdPolicy {
    /// One cutoff, computed on the first round, for the whole run.
    #[default]
    Static,
    /// Cutoff recomputed every round at a growing percentile.
    Adaptive,
}

impl ThresholdPolicy {
    /// Maps the `update_threshold` flag onto a policy.
    #[must_use]
    pub const fn from_update_flag(update_threshold: bool) -> Self {
        if update_threshold {
            Self::Adaptive
        } else {
            Self::Static
        }
    }
}

/// Stateful per-run threshold selector.
#[derive(Debug, Clone)]
pub struct ThresholdSelector<T> {
    policy: ThresholdPolicy,
    percentile: T,
    step: T,
    cached: Option<T>,
}

impl<T: SeriesElement> ThresholdSelector<T> {
    /// Creates a selector starting at `error_percentile`.
    ///
    /// `percentile_step` only has an effect under [`ThresholdPolicy::Adaptive`].
    #[must_use]
    pub const fn new(policy: ThresholdPolicy, error_percentile: T, percentile_step: T) -> Self {
        Self {
            policy,
            percentile: error_percentile,
            step: percentile_step,
            cached: None,
        }
    }

    /// Returns the policy.
    #[must_use]
    pub const fn policy(&self) -> ThresholdPolicy {
        self.policy
    }

    /// Percentile behind the most recent cutoff (or the starting percentile
    /// before the first call to [`select`](Self::select)).
    #[must_use]
    pub const fn current_percentile(&self) -> T {
        self.percentile
    }

    /// Returns the cutoff for the current round's `errors`.
    ///
    /// # Errors
    ///
    /// Returns an error if a fresh percentile has to be computed over an
    /// empty sample, or the percentile parameter is NaN.
    pub fn select(&mut self, errors: &[T]) -> Result<T> {
        match (self.policy, self.cached) {
            (ThresholdPolicy::Static, Some(cutoff)) => Ok(cutoff),
            (ThresholdPolicy::Static, None) => {
                let cutoff = percentile(errors, self.percentile)?;
                self.cached = Some(cutoff);
                Ok(cutoff)
            }
            (ThresholdPolicy::Adaptive, _) => {
                self.percentile = (self.percentile + self.step).min(T::hundred());
                let cutoff = percentile(errors, self.percentile)?;
                self.cached = Some(cutoff);
                Ok(cutoff)
            }
        }
    }
}
