//! Numeric element trait for decomposition inputs.
//!
//! [`SeriesElement`] abstracts over `f32` and `f64` so the whole pipeline
//! (regression, percentile, decomposition) is written once.
//!
//! # Example
//!
//! ```
//! use autotrend::traits::SeriesElement;
//!
//! fn mean<T: SeriesElement>(data: &[T]) -> autotrend::Result<T> {
//!     let n = T::from_usize(data.len())?;
//!     Ok(data.iter().fold(T::zero(), |acc, &x| acc + x) / n)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0];
//! assert!((mean(&data).unwrap() - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements of a decomposed sequence.
///
/// The trait requires:
/// - `Float`: Standard floating-point operations (NaN handling, infinity, arithmetic)
/// - `NumCast`: Safe conversion between numeric types
/// - `Copy`: Values can be copied
/// - `Default`: A default value exists (typically zero)
/// - `Send + Sync`: Sequences can be decomposed from worker threads
pub trait SeriesElement:
    Float + NumCast + Copy + Default + std::fmt::Debug + Send + Sync + 'static
{
    /// Creates a series element from a `usize` value.
    ///
    /// Used for converting window offsets and sample counts.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 100 as this type.
    ///
    /// Percentiles are expressed on the 0-100 scale.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        // Safe unwrap: 100 is always representable in Float types
        <Self as NumCast>::from(100).unwrap()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + std::fmt::Debug + Send + Sync + 'static> SeriesElement
    for T
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_usize() {
        assert_eq!(f64::from_usize(5).unwrap(), 5.0);
        assert_eq!(f32::from_usize(5).unwrap(), 5.0);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(<f64 as SeriesElement>::from_f64(2.5).unwrap(), 2.5);
        assert_eq!(<f32 as SeriesElement>::from_f64(2.5).unwrap(), 2.5_f32);
    }

    #[test]
    fn test_hundred() {
        assert_eq!(f64::hundred(), 100.0);
        assert_eq!(f32::hundred(), 100.0);
    }
}
