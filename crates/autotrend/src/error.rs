//! Error types for autotrend.
//!
//! This module defines the error types used throughout the autotrend library
//! for handling the failure conditions of a decomposition run.
//!
//! A sequence that is too short to target any index is *not* an error: the
//! run completes with zero models and an empty process log.

use thiserror::Error;

/// The main error type for autotrend operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration parameter is out of its accepted domain.
    ///
    /// Returned before the first fit, so a failing call never performs any
    /// regression work.
    #[error("invalid configuration for `{parameter}`: {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Description of the accepted domain.
        reason: &'static str,
    },

    /// A sample that must hold at least one value is empty.
    ///
    /// Raised by the percentile kernel; the decomposition loop never asks for
    /// the percentile of an empty error sample.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// A training window has fewer observations than the window size.
    ///
    /// The decomposition loop never produces such a window when its range
    /// bookkeeping is correct; this surfaces direct misuse of the regressor.
    #[error("invalid window: required {required} observations, got {actual}")]
    InvalidWindow {
        /// The number of observations required.
        required: usize,
        /// The number of observations available.
        actual: usize,
    },

    /// Failed to convert a numeric value to the target type.
    ///
    /// This error occurs when using `NumCast::from()` to convert values
    /// (e.g., converting a `usize` window size to a generic `Float` type) and
    /// the conversion fails.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the autotrend Error type.
pub type Result<T> = std::result::Result<T, Error>;
