//! Output types of a decomposition run.
//!
//! An [`LltResult`] is a write-once artifact: it is assembled by the iteration
//! loop and only exposes read access afterwards.

use std::ops::Range;

use crate::kernels::ranges::FocusRange;
use crate::kernels::regression::LinearModel;
use crate::traits::SeriesElement;

/// Ownership of one sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrendMark<T> {
    /// No fitted trend explained this index.
    #[default]
    Unassigned,
    /// The index was first explained in round `iteration` (1-based).
    ///
    /// The initial training window is owned by round 1 from the start;
    /// its `prediction` stays `None` until the first model is fitted.
    Assigned {
        /// Round that claimed the index.
        iteration: usize,
        /// Trend-projected value (fitted value for the initial window).
        prediction: Option<T>,
    },
}

impl<T: SeriesElement> TrendMark<T> {
    /// Round that claimed the index, if any.
    #[must_use]
    pub const fn iteration(&self) -> Option<usize> {
        match self {
            Self::Assigned { iteration, .. } => Some(*iteration),
            Self::Unassigned => None,
        }
    }

    /// Predicted value, if any.
    #[must_use]
    pub const fn prediction(&self) -> Option<T> {
        match self {
            Self::Assigned { prediction, .. } => *prediction,
            Self::Unassigned => None,
        }
    }

    /// Returns true if a round claimed the index.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }
}

/// Where the iteration loop is, or why it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Focus set non-empty and rounds remaining.
    Running,
    /// The focus set emptied before `max_models` rounds ran.
    StoppedEmpty,
    /// Exactly `max_models` rounds ran.
    StoppedExhausted,
}

/// Audit record of one executed round.
///
/// `predictions`, `errors` and `high_error_flags` are parallel to
/// `focus_targets`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationLog<T> {
    /// Round number (1-based).
    pub iteration: usize,
    /// Indices examined this round, ascending.
    pub focus_targets: Vec<usize>,
    /// Maximal contiguous ranges over `focus_targets`.
    pub focus_ranges: Vec<FocusRange>,
    /// Trend-projected value per focus target.
    pub predictions: Vec<T>,
    /// Absolute prediction error per focus target.
    pub errors: Vec<T>,
    /// `true` where the error exceeded the threshold.
    pub high_error_flags: Vec<bool>,
    /// Error cutoff applied this round.
    pub threshold: T,
    /// Percentile that produced `threshold`.
    pub percentile: T,
}

impl<T> IterationLog<T> {
    /// Number of targets left unexplained after this round.
    #[must_use]
    pub fn high_error_count(&self) -> usize {
        self.high_error_flags.iter().filter(|&&f| f).count()
    }

    /// Number of targets this round claimed.
    #[must_use]
    pub fn low_error_count(&self) -> usize {
        self.high_error_flags.len() - self.high_error_count()
    }
}

/// A maximal run of consecutive indices owned by the same round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendSegment {
    /// Covered indices, `[start, end)`.
    pub range: Range<usize>,
    /// Owning round (1-based).
    pub iteration: usize,
}

/// Result of a local linear trend decomposition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LltResult<T> {
    marks: Vec<TrendMark<T>>,
    models: Vec<LinearModel<T>>,
    process_logs: Vec<IterationLog<T>>,
    state: RunState,
    window_size: usize,
    sequence: Option<Vec<T>>,
}

impl<T: SeriesElement> LltResult<T> {
    pub(crate) const fn new(
        marks: Vec<TrendMark<T>>,
        models: Vec<LinearModel<T>>,
        process_logs: Vec<IterationLog<T>>,
        state: RunState,
        window_size: usize,
        sequence: Option<Vec<T>>,
    ) -> Self {
        Self {
            marks,
            models,
            process_logs,
            state,
            window_size,
            sequence,
        }
    }

    /// Per-index ownership, one slot per sequence index.
    #[must_use]
    pub fn marks(&self) -> &[TrendMark<T>] {
        &self.marks
    }

    /// Round that claimed each index, `None` where unassigned.
    #[must_use]
    pub fn trend_marks(&self) -> Vec<Option<usize>> {
        self.marks.iter().map(TrendMark::iteration).collect()
    }

    /// Predicted value of each index, `None` where no prediction was made.
    #[must_use]
    pub fn prediction_marks(&self) -> Vec<Option<T>> {
        self.marks.iter().map(TrendMark::prediction).collect()
    }

    /// Fitted models, one per executed round.
    #[must_use]
    pub fn models(&self) -> &[LinearModel<T>] {
        &self.models
    }

    /// Slope of each fitted model.
    #[must_use]
    pub fn slopes(&self) -> Vec<T> {
        self.models.iter().map(LinearModel::slope).collect()
    }

    /// Audit log, one entry per executed round.
    #[must_use]
    pub fn process_logs(&self) -> &[IterationLog<T>] {
        &self.process_logs
    }

    /// Terminal state of the run.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Number of rounds that fitted a model.
    #[must_use]
    pub fn num_iterations(&self) -> usize {
        self.models.len()
    }

    /// Window size the run used.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Copy of the input, when the run was configured to retain it.
    #[must_use]
    pub fn sequence(&self) -> Option<&[T]> {
        self.sequence.as_deref()
    }

    /// Length of the decomposed sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns true if the decomposed sequence was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Indices that no round explained.
    #[must_use]
    pub fn unassigned(&self) -> Vec<usize> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, mark)| !mark.is_assigned())
            .map(|(i, _)| i)
            .collect()
    }

    /// Maximal runs of consecutive indices owned by the same round.
    ///
    /// Unassigned indices separate segments and are not reported.
    #[must_use]
    pub fn trend_segments(&self) -> Vec<TrendSegment> {
        let mut segments: Vec<TrendSegment> = Vec::new();
        for (i, mark) in self.marks.iter().enumerate() {
            let Some(iteration) = mark.iteration() else {
                continue;
            };
            match segments.last_mut() {
                Some(last) if last.iteration == iteration && last.range.end == i => {
                    last.range.end = i + 1;
                }
                _ => segments.push(TrendSegment {
                    range: i..i + 1,
                    iteration,
                }),
            }
        }
        segments
    }
}
