//! Commonly used types and traits for convenient importing.
//!
//! # Usage
//!
//! ```
//! use autotrend::prelude::*;
//!
//! let data: Vec<f64> = (0..40).map(|i| f64::from(i % 10)).collect();
//! let result = Llt::new().window_size(4).decompose(&data).unwrap();
//!
//! for segment in result.trend_segments() {
//!     assert!(segment.iteration >= 1);
//! }
//! ```
//!
//! # Contents
//!
//! - [`Error`], [`Result`]: error handling
//! - [`SeriesElement`]: numeric element trait
//! - [`Llt`], [`decompose_llt`]: configuration and entry point
//! - [`LltResult`], [`TrendMark`], [`IterationLog`], [`TrendSegment`],
//!   [`RunState`]: output types
//! - [`LinearModel`], [`ThresholdPolicy`]: model and policy types

pub use crate::error::{Error, Result};

pub use crate::traits::SeriesElement;

pub use crate::decompose::{decompose_llt, Llt};

pub use crate::result::{IterationLog, LltResult, RunState, TrendMark, TrendSegment};

pub use crate::kernels::regression::LinearModel;
pub use crate::threshold::ThresholdPolicy;

pub use crate::batch::{decompose_batch, BatchProcessor};
