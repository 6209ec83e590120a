//! Batch decomposition of many independent sequences.
//!
//! Each sequence is decomposed by its own run, so runs share nothing and can
//! execute on Rayon's thread pool when the `parallel` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! autotrend = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! Without the feature every entry point falls back to a sequential loop with
//! identical results.
//!
//! # Example
//!
//! ```
//! use autotrend::batch::decompose_batch;
//! use autotrend::decompose::Llt;
//!
//! let series = vec![
//!     (0..30).map(f64::from).collect::<Vec<_>>(),
//!     (0..30).map(|i| f64::from(30 - i)).collect::<Vec<_>>(),
//! ];
//!
//! let results = decompose_batch(&series, &Llt::new()).unwrap();
//! assert_eq!(results.len(), 2);
//! assert!(results[1].slopes()[0] < 0.0);
//! ```

use crate::decompose::{decompose_llt, Llt};
use crate::error::Result;
use crate::result::LltResult;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Batch processor for decomposing many sequences.
///
/// Small batches are processed sequentially to avoid thread-pool overhead.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Minimum number of sequences before work is spread over threads.
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a new batch processor with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_parallel_threshold: 8,
        }
    }

    /// Sets the minimum number of sequences required to use parallel processing.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Applies `run` to every sequence, in parallel for large batches.
    ///
    /// Results keep the order of `series`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `run`.
    #[cfg(feature = "parallel")]
    pub fn process<T, F, R>(&self, series: &[Vec<T>], run: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        if series.len() < self.min_parallel_threshold {
            series.iter().map(|s| run(s)).collect()
        } else {
            series.par_iter().map(|s| run(s)).collect()
        }
    }

    /// Sequential version when the parallel feature is disabled.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `run`.
    #[cfg(not(feature = "parallel"))]
    pub fn process<T, F, R>(&self, series: &[Vec<T>], run: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R>,
    {
        series.iter().map(|s| run(s)).collect()
    }

    /// Decomposes every sequence with the same configuration.
    ///
    /// The configuration is validated once, before any sequence is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any run fails.
    pub fn decompose_all<T: SeriesElement>(
        &self,
        series: &[Vec<T>],
        config: &Llt,
    ) -> Result<Vec<LltResult<T>>> {
        config.validate()?;
        self.process(series, |s| decompose_llt(s, config))
    }
}

/// Decomposes every sequence with a default [`BatchProcessor`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any run fails.
pub fn decompose_batch<T: SeriesElement>(
    series: &[Vec<T>],
    config: &Llt,
) -> Result<Vec<LltResult<T>>> {
    BatchProcessor::new().decompose_all(series, config)
}
