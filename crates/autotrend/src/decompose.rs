//! Local Linear Trend (LLT) decomposition.
//!
//! The decomposition repeatedly fits a short linear model and uses it to
//! explain as much of the still-unexplained sequence as it can:
//!
//! 1. The *focus targets* start as every index `>= window_size`.
//! 2. Each round fits a line on the `window_size` observations right before
//!    the first contiguous range of focus targets.
//! 3. Every focus target `t` is predicted as
//!    `sequence[t - window_size] + basis_trend`, where the basis trend is the
//!    net change the line predicts over one window span.
//! 4. Targets whose absolute error is at most the round's percentile cutoff
//!    are claimed by the round; the rest become the next round's focus set.
//!
//! The loop stops when the focus set is empty or `max_models` rounds ran.
//! Indices `0..window_size` form the first training window. They are owned
//! by round 1 before any fitting happens and receive the first model's
//! fitted values once that round runs.
//!
//! # Example
//!
//! ```
//! use autotrend::decompose::Llt;
//! use autotrend::result::RunState;
//!
//! let ramp: Vec<f64> = (0..20).map(f64::from).collect();
//! let result = Llt::new()
//!     .window_size(5)
//!     .max_models(3)
//!     .error_percentile(50.0)
//!     .decompose(&ramp)
//!     .unwrap();
//!
//! assert_eq!(result.num_iterations(), 1);
//! assert_eq!(result.state(), RunState::StoppedEmpty);
//! assert!(result.trend_marks().iter().all(|m| *m == Some(1)));
//! ```

use crate::error::{Error, Result};
use crate::kernels::ranges::{covered_len, extract_ranges};
use crate::kernels::regression::{fit_window, LinearModel, TrendPredictor};
use crate::result::{IterationLog, LltResult, RunState, TrendMark};
use crate::threshold::{ThresholdPolicy, ThresholdSelector};
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum focus-set size for computing a round's errors with rayon.
///
/// Only consulted with the `parallel` feature; results are identical either way.
pub const PARALLEL_ERROR_THRESHOLD: usize = 4096;

/// Emits a per-round event at `info` when verbose, `debug` otherwise.
macro_rules! report {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

/// Configuration for a local linear trend decomposition.
///
/// Provides a fluent API for configuring the decomposition with sensible
/// defaults.
///
/// # Default Parameters
///
/// - `max_models`: 10
/// - `window_size`: 5
/// - `error_percentile`: 40.0
/// - `percentile_step`: 0.0
/// - `update_threshold`: false (static threshold policy)
/// - `verbose`: false
/// - `retain_sequence`: false
///
/// # Example
///
/// ```
/// use autotrend::decompose::Llt;
///
/// let config = Llt::new()
///     .window_size(10)
///     .max_models(5)
///     .error_percentile(60.0)
///     .percentile_step(5.0)
///     .update_threshold(true);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.get_window_size(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Llt {
    max_models: usize,
    window_size: usize,
    error_percentile: f64,
    percentile_step: f64,
    update_threshold: bool,
    verbose: bool,
    retain_sequence: bool,
}

impl Default for Llt {
    fn default() -> Self {
        Self {
            max_models: 10,
            window_size: 5,
            error_percentile: 40.0,
            percentile_step: 0.0,
            update_threshold: false,
            verbose: false,
            retain_sequence: false,
        }
    }
}

impl Llt {
    /// Creates a configuration with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upper bound on decomposition rounds.
    ///
    /// Default: 10
    #[must_use]
    pub const fn max_models(mut self, max_models: usize) -> Self {
        self.max_models = max_models;
        self
    }

    /// Sets the training window length (also the forward-projection span).
    ///
    /// Default: 5
    #[must_use]
    pub const fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Sets the initial (or static) error percentile, in `[0, 100]`.
    ///
    /// Default: 40.0
    #[must_use]
    pub const fn error_percentile(mut self, error_percentile: f64) -> Self {
        self.error_percentile = error_percentile;
        self
    }

    /// Sets the per-round percentile increment of the adaptive policy.
    ///
    /// Default: 0.0
    #[must_use]
    pub const fn percentile_step(mut self, percentile_step: f64) -> Self {
        self.percentile_step = percentile_step;
        self
    }

    /// Selects the adaptive (`true`) or static (`false`) threshold policy.
    ///
    /// Default: false
    #[must_use]
    pub const fn update_threshold(mut self, update_threshold: bool) -> Self {
        self.update_threshold = update_threshold;
        self
    }

    /// Reports each round at `info` level instead of `debug`.
    ///
    /// Default: false
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Keeps a copy of the input sequence in the result.
    ///
    /// Default: false
    #[must_use]
    pub const fn retain_sequence(mut self, retain_sequence: bool) -> Self {
        self.retain_sequence = retain_sequence;
        self
    }

    /// Returns the maximum number of rounds.
    #[must_use]
    pub const fn get_max_models(&self) -> usize {
        self.max_models
    }

    /// Returns the window size.
    #[must_use]
    pub const fn get_window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the initial error percentile.
    #[must_use]
    pub const fn get_error_percentile(&self) -> f64 {
        self.error_percentile
    }

    /// Returns the adaptive percentile step.
    #[must_use]
    pub const fn get_percentile_step(&self) -> f64 {
        self.percentile_step
    }

    /// Returns the threshold policy selected by `update_threshold`.
    #[must_use]
    pub const fn threshold_policy(&self) -> ThresholdPolicy {
        ThresholdPolicy::from_update_flag(self.update_threshold)
    }

    /// Returns whether rounds are reported at `info` level.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Returns whether the result keeps a copy of the input.
    #[must_use]
    pub const fn retains_sequence(&self) -> bool {
        self.retain_sequence
    }

    /// Checks every parameter against its accepted domain.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if:
    /// - `max_models` is 0
    /// - `window_size` is below 2
    /// - `error_percentile` is outside `[0, 100]` or NaN
    /// - the adaptive policy is selected and `percentile_step` is negative
    ///   or not finite
    ///
    /// The static policy never reads `percentile_step`, so it is not checked
    /// there.
    pub fn validate(&self) -> Result<()> {
        if self.max_models == 0 {
            return Err(Error::InvalidConfiguration {
                parameter: "max_models",
                reason: "must be at least 1",
            });
        }
        if self.window_size < 2 {
            return Err(Error::InvalidConfiguration {
                parameter: "window_size",
                reason: "must be at least 2",
            });
        }
        if !(0.0..=100.0).contains(&self.error_percentile) {
            return Err(Error::InvalidConfiguration {
                parameter: "error_percentile",
                reason: "must be within [0, 100]",
            });
        }
        if self.update_threshold
            && (!self.percentile_step.is_finite() || self.percentile_step < 0.0)
        {
            return Err(Error::InvalidConfiguration {
                parameter: "percentile_step",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Decomposes `data` with this configuration.
    ///
    /// A sequence of at most `window_size` values is not an error: the
    /// result has no models, no log entries and no predictions. Its indices
    /// still carry the round-1 ownership of the initial window.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration is invalid (`Error::InvalidConfiguration`)
    /// - a parameter is not representable in `T` (`Error::NumericConversion`)
    pub fn decompose<T: SeriesElement>(&self, data: &[T]) -> Result<LltResult<T>> {
        decompose_llt(data, self)
    }
}

/// Decomposes `data` into local linear trends.
///
/// # Errors
///
/// Returns an error if:
/// - the configuration is invalid (`Error::InvalidConfiguration`)
/// - a parameter is not representable in `T` (`Error::NumericConversion`)
pub fn decompose_llt<T: SeriesElement>(data: &[T], config: &Llt) -> Result<LltResult<T>> {
    config.validate()?;

    let _span = tracing::debug_span!(
        "decompose_llt",
        len = data.len(),
        window_size = config.window_size,
        max_models = config.max_models,
        policy = ?config.threshold_policy()
    )
    .entered();

    IterationController::new(data, config)?.run()
}

/// Mutable state of one decomposition run.
struct IterationController<'a, T> {
    data: &'a [T],
    window_size: usize,
    max_models: usize,
    verbose: bool,
    retain_sequence: bool,
    focus_targets: Vec<usize>,
    marks: Vec<TrendMark<T>>,
    models: Vec<LinearModel<T>>,
    logs: Vec<IterationLog<T>>,
    selector: ThresholdSelector<T>,
    state: RunState,
}

impl<'a, T: SeriesElement> IterationController<'a, T> {
    fn new(data: &'a [T], config: &Llt) -> Result<Self> {
        let selector = ThresholdSelector::new(
            config.threshold_policy(),
            T::from_f64(config.error_percentile)?,
            T::from_f64(config.percentile_step)?,
        );

        Ok(Self {
            data,
            window_size: config.window_size,
            max_models: config.max_models,
            verbose: config.verbose,
            retain_sequence: config.retain_sequence,
            focus_targets: (config.window_size..data.len()).collect(),
            marks: seed_marks(data.len(), config.window_size),
            models: Vec::with_capacity(config.max_models.min(data.len())),
            logs: Vec::with_capacity(config.max_models.min(data.len())),
            selector,
            state: RunState::Running,
        })
    }

    fn run(mut self) -> Result<LltResult<T>> {
        while self.step()? == RunState::Running {}

        let sequence = self.retain_sequence.then(|| self.data.to_vec());
        Ok(LltResult::new(
            self.marks,
            self.models,
            self.logs,
            self.state,
            self.window_size,
            sequence,
        ))
    }

    /// Performs one transition of the run state machine.
    fn step(&mut self) -> Result<RunState> {
        if self.models.len() >= self.max_models {
            self.state = RunState::StoppedExhausted;
            report!(
                self.verbose,
                rounds = self.models.len(),
                unexplained = self.focus_targets.len(),
                "model budget exhausted"
            );
        } else if self.focus_targets.is_empty() {
            self.state = RunState::StoppedEmpty;
            report!(
                self.verbose,
                rounds = self.models.len(),
                "no focused error regions left, stopping early"
            );
        } else {
            self.run_round()?;
        }
        Ok(self.state)
    }

    fn run_round(&mut self) -> Result<()> {
        let iteration = self.models.len() + 1;
        let ws = self.window_size;

        let focus_ranges = extract_ranges(&self.focus_targets);
        debug_assert_eq!(covered_len(&focus_ranges), self.focus_targets.len());
        report!(
            self.verbose,
            iteration,
            max_models = self.max_models,
            focus_targets = self.focus_targets.len(),
            focus_ranges = focus_ranges.len(),
            "round started"
        );
        tracing::trace!(targets = ?self.focus_targets, ranges = ?focus_ranges);

        // `focus_targets` is non-empty here, so is `focus_ranges`.
        let train_end = focus_ranges[0].start;
        let train_start = train_end.checked_sub(ws).ok_or(Error::InvalidWindow {
            required: ws,
            actual: train_end,
        })?;
        let model = fit_window(&self.data[train_start..train_end], ws)?;
        let predictor = TrendPredictor::new(&model, ws)?;

        let (predictions, errors) = self.project_targets(&predictor);
        let threshold = self.selector.select(&errors)?;

        let mut high_error_flags = Vec::with_capacity(errors.len());
        let mut remaining = Vec::new();
        for ((&t, &predicted), &error) in self.focus_targets.iter().zip(&predictions).zip(&errors) {
            // NaN errors never compare, so they stay unexplained
            let low = error <= threshold;
            high_error_flags.push(!low);
            if low {
                claim(&mut self.marks[t], iteration, predicted);
            } else {
                remaining.push(t);
            }
        }

        if iteration == 1 {
            for (offset, mark) in self.marks.iter_mut().take(ws).enumerate() {
                backfill(mark, model.predict_at(offset)?);
            }
        }

        let percentile = self.selector.current_percentile();
        report!(
            self.verbose,
            iteration,
            slope = ?model.slope(),
            threshold = ?threshold,
            percentile = ?percentile,
            claimed = predictions.len() - remaining.len(),
            remaining = remaining.len(),
            "round finished"
        );

        let focus_targets = std::mem::replace(&mut self.focus_targets, remaining);
        self.logs.push(IterationLog {
            iteration,
            focus_targets,
            focus_ranges,
            predictions,
            errors,
            high_error_flags,
            threshold,
            percentile,
        });
        self.models.push(model);
        Ok(())
    }

    /// Predictions and absolute errors for every focus target, in order.
    fn project_targets(&self, predictor: &TrendPredictor<T>) -> (Vec<T>, Vec<T>) {
        let ws = self.window_size;
        let data = self.data;
        let project = |&t: &usize| {
            let predicted = predictor.project(data[t - ws]);
            (predicted, (predicted - data[t]).abs())
        };

        #[cfg(feature = "parallel")]
        if self.focus_targets.len() >= PARALLEL_ERROR_THRESHOLD {
            return self.focus_targets.par_iter().map(project).unzip();
        }

        self.focus_targets.iter().map(project).unzip()
    }
}

/// Marks with the initial training window owned by round 1.
fn seed_marks<T: SeriesElement>(len: usize, window_size: usize) -> Vec<TrendMark<T>> {
    let mut marks = vec![TrendMark::Unassigned; len];
    for mark in marks.iter_mut().take(window_size) {
        *mark = TrendMark::Assigned {
            iteration: 1,
            prediction: None,
        };
    }
    marks
}

/// Writes a mark only into an unassigned slot.
fn claim<T: SeriesElement>(slot: &mut TrendMark<T>, iteration: usize, prediction: T) {
    if !slot.is_assigned() {
        *slot = TrendMark::Assigned {
            iteration,
            prediction: Some(prediction),
        };
    }
}

/// Fills the prediction of a seeded slot that has none yet.
fn backfill<T: SeriesElement>(slot: &mut TrendMark<T>, fitted: T) {
    if let TrendMark::Assigned {
        prediction: prediction @ None,
        ..
    } = slot
    {
        *prediction = Some(fitted);
    }
}
