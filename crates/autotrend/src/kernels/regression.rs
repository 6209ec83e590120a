//! Single-window least-squares fitting and trend projection.
//!
//! # Mathematical Conventions
//!
//! - **x-coordinates**: the observations of a window are placed at
//!   `x = 0, 1, ..., window_size - 1`.
//! - **Closed form**: with `n = window_size`,
//!   `Σx = n(n-1)/2` and `Σx² = n(n-1)(2n-1)/6`, so
//!   `slope = (n·Σxy - Σx·Σy) / (n·Σx² - (Σx)²)` and
//!   `intercept = (Σy - slope·Σx) / n`.
//! - **Degeneracy**: the denominator `n·Σx² - (Σx)²` equals `n²(n²-1)/12`,
//!   strictly positive for `n >= 2`, so every window of at least two points
//!   yields a unique line. The sums are formed in `T`, never in `usize`, so
//!   large windows cannot overflow.
//!
//! # Trend projection
//!
//! A [`TrendPredictor`] does not evaluate the fitted line at the target
//! position. It measures the net change the line predicts over one window
//! span (the *basis trend*) and adds it to the observed value exactly one
//! window before the target:
//!
//! ```
//! use autotrend::kernels::regression::{fit_window, TrendPredictor};
//!
//! let window = [1.0_f64, 3.0, 5.0, 7.0, 9.0];
//! let model = fit_window(&window, 5).unwrap();
//! assert!((model.slope() - 2.0).abs() < 1e-10);
//!
//! let predictor = TrendPredictor::new(&model, 5).unwrap();
//! // basis trend = slope * window_size = 10
//! assert!((predictor.project(4.0) - 14.0).abs() < 1e-10);
//! ```

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// A fitted line `y = slope * x + intercept` over window offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearModel<T> {
    slope: T,
    intercept: T,
}

impl<T: SeriesElement> LinearModel<T> {
    /// Creates a model from its coefficients.
    #[must_use]
    pub const fn new(slope: T, intercept: T) -> Self {
        Self { slope, intercept }
    }

    /// Returns the slope.
    #[must_use]
    pub const fn slope(&self) -> T {
        self.slope
    }

    /// Returns the intercept (the fitted value at offset 0).
    #[must_use]
    pub const fn intercept(&self) -> T {
        self.intercept
    }

    /// Evaluates the line at `x`.
    #[inline]
    #[must_use]
    pub fn predict(&self, x: T) -> T {
        self.slope * x + self.intercept
    }

    /// Evaluates the line at an integer window offset.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `offset` is not representable in `T`.
    #[inline]
    pub fn predict_at(&self, offset: usize) -> Result<T> {
        Ok(self.predict(T::from_usize(offset)?))
    }
}

/// Fits an ordinary-least-squares line to the first `window_size` values of
/// `window`, placed at `x = 0..window_size`.
///
/// # Errors
///
/// Returns an error if:
/// - `window_size < 2` (`Error::InvalidConfiguration`)
/// - `window` holds fewer than `window_size` values (`Error::InvalidWindow`)
/// - the window size is not representable in `T` (`Error::NumericConversion`)
pub fn fit_window<T: SeriesElement>(window: &[T], window_size: usize) -> Result<LinearModel<T>> {
    if window_size < 2 {
        return Err(Error::InvalidConfiguration {
            parameter: "window_size",
            reason: "must be at least 2",
        });
    }
    if window.len() < window_size {
        return Err(Error::InvalidWindow {
            required: window_size,
            actual: window.len(),
        });
    }

    let n = T::from_usize(window_size)?;
    let two = T::from_usize(2)?;
    let twelve = T::from_usize(12)?;
    let sum_x = n * (n - T::one()) / two;

    let mut sum_y = T::zero();
    let mut sum_xy = T::zero();
    for (x_idx, &y) in window[..window_size].iter().enumerate() {
        let x = T::from_usize(x_idx)?;
        sum_y = sum_y + y;
        sum_xy = sum_xy + x * y;
    }

    let n2 = n * n;
    let denom = n2 * (n2 - T::one()) / twelve;
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(LinearModel::new(slope, intercept))
}

/// Projects trend-consistent values one window span ahead of an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPredictor<T> {
    basis_trend: T,
}

impl<T: SeriesElement> TrendPredictor<T> {
    /// Builds a predictor from `model(window_size) - model(0)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `window_size` is not representable in `T`.
    pub fn new(model: &LinearModel<T>, window_size: usize) -> Result<Self> {
        let basis_trend = model.predict_at(window_size)? - model.predict_at(0)?;
        Ok(Self { basis_trend })
    }

    /// Net change the fitted line predicts over one window span.
    #[must_use]
    pub const fn basis_trend(&self) -> T {
        self.basis_trend
    }

    /// Predicted value at `t`, given the observation at `t - window_size`.
    #[inline]
    #[must_use]
    pub fn project(&self, anchor: T) -> T {
        anchor + self.basis_trend
    }
}
