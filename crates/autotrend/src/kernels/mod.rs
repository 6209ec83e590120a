//! Numeric kernels of the decomposition.
//!
//! Each kernel is a pure function (or a small immutable value) that the
//! iteration loop in [`crate::decompose`] drives once per round.
//!
//! # Kernels
//!
//! - [`ranges`]: sorted indices to maximal contiguous half-open ranges
//! - [`regression`]: closed-form least-squares fit of one window and
//!   trend projection from an anchor value
//! - [`percentile`]: linear-interpolation percentile of an error sample

pub mod percentile;
pub mod ranges;
pub mod regression;

pub use percentile::percentile;
pub use ranges::{covered_len, extract_ranges, FocusRange};
pub use regression::{fit_window, LinearModel, TrendPredictor};
