//! autotrend: Local Linear Trend (LLT) decomposition
//!
//! This crate extracts piecewise-linear local trends from a one-dimensional
//! sequence. It iteratively fits short least-squares lines on "focus"
//! windows, projects each fitted trend one window span forward, and keeps the
//! points a trend explains well. Points it explains poorly are handed to the
//! next round.
//!
//! # Features
//!
//! - **Deterministic**: closed-form regression and a pinned
//!   linear-interpolation percentile; identical inputs give bit-identical runs
//! - **Auditable**: every round records its focus ranges, predictions, errors
//!   and threshold
//! - **Generics**: works with both `f32` and `f64` data types
//! - **Explicit ownership**: per-index [`TrendMark`]s instead of NaN sentinels
//!
//! # Quick Start
//!
//! ```
//! use autotrend::prelude::*;
//!
//! // a ramp that turns into a plateau
//! let data: Vec<f64> = (0..40).map(|i| f64::from(i.min(20))).collect();
//!
//! let result = Llt::new()
//!     .window_size(5)
//!     .max_models(4)
//!     .error_percentile(60.0)
//!     .decompose(&data)
//!     .unwrap();
//!
//! assert!(result.num_iterations() <= 4);
//! assert_eq!(result.trend_marks().len(), data.len());
//! assert_eq!(result.models().len(), result.process_logs().len());
//! ```
//!
//! # Error Handling
//!
//! Invalid configurations fail before any fitting:
//!
//! ```
//! use autotrend::prelude::*;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0];
//! let result = Llt::new().window_size(1).decompose(&data);
//! assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
//! ```
//!
//! A sequence too short to target any index is a valid, empty result:
//!
//! ```
//! use autotrend::prelude::*;
//!
//! let data = vec![1.0_f64, 2.0, 3.0];
//! let result = Llt::new().decompose(&data).unwrap();
//! assert_eq!(result.state(), RunState::StoppedEmpty);
//! assert!(result.models().is_empty());
//! ```
//!
//! # Logging
//!
//! Runs emit [`tracing`] events (a `decompose_llt` span, one event per round).
//! Install any subscriber to see them; [`Llt::verbose`] raises round events
//! from `debug` to `info`.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod decompose;
pub mod error;
pub mod kernels;
pub mod prelude;
pub mod result;
pub mod threshold;
pub mod traits;

// Re-export commonly used types at crate root
pub use decompose::{decompose_llt, Llt};
pub use error::{Error, Result};
pub use kernels::{extract_ranges, fit_window, percentile, FocusRange, LinearModel};
pub use result::{IterationLog, LltResult, RunState, TrendMark, TrendSegment};
pub use threshold::{ThresholdPolicy, ThresholdSelector};
pub use traits::SeriesElement;
