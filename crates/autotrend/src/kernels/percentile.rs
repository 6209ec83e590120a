//! Linear-interpolation percentile.
//!
//! The interpolation rule is pinned because libraries disagree on defaults.
//! For a sample of `n` values sorted ascending as `v[0..n]` and a percentile
//! `p` in `[0, 100]`:
//!
//! - `rank = p / 100 * (n - 1)`
//! - `lo = floor(rank)`, `hi = ceil(rank)`, `frac = rank - lo`
//! - `percentile = v[lo] + (v[hi] - v[lo]) * frac`
//!
//! This is the "linear" method (type 7 in Hyndman & Fan), the default of most
//! numerical environments.
//!
//! # NaN Handling
//!
//! A NaN anywhere in the sample makes the result NaN, as no ordering over the
//! sample exists.

use num_traits::ToPrimitive;

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// Computes the `p`-th percentile of `values` with linear interpolation.
///
/// `p` is clamped to `[0, 100]`. The input is not modified.
///
/// # Errors
///
/// Returns an error if:
/// - `values` is empty (`Error::EmptyInput`)
/// - `p` is NaN (`Error::InvalidConfiguration`)
/// - the interpolation weight is not representable in `T` (`Error::NumericConversion`)
///
/// # Example
///
/// ```
/// use autotrend::kernels::percentile::percentile;
///
/// let errors = [4.0_f64, 1.0, 3.0, 2.0];
/// assert!((percentile(&errors, 50.0).unwrap() - 2.5).abs() < 1e-10);
/// assert!((percentile(&errors, 100.0).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn percentile<T: SeriesElement>(values: &[T], p: T) -> Result<T> {
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    if p.is_nan() {
        return Err(Error::InvalidConfiguration {
            parameter: "percentile",
            reason: "must be a number in [0, 100]",
        });
    }
    if values.iter().any(|&v| v.is_nan()) {
        return Ok(T::nan());
    }

    let mut sorted = values.to_vec();
    // No NaN remains, so the comparison is total.
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // The rank is computed in f64: `n - 1` is not exact in f32 beyond 2^24.
    let last_idx = sorted.len() - 1;
    let p = p
        .to_f64()
        .ok_or(Error::NumericConversion {
            context: "percentile to f64",
        })?
        .clamp(0.0, 100.0);
    let last = last_idx.to_f64().ok_or(Error::NumericConversion {
        context: "sample length to f64",
    })?;
    let rank = p / 100.0 * last;

    let lo = rank.floor();
    let lo_idx = lo
        .to_usize()
        .ok_or(Error::NumericConversion {
            context: "percentile rank to index",
        })?
        .min(last_idx);
    let hi_idx = (lo_idx + 1).min(last_idx);
    let frac = rank - lo;

    let lo_val = sorted[lo_idx];
    if frac == 0.0 || hi_idx == lo_idx {
        return Ok(lo_val);
    }
    Ok(lo_val + (sorted[hi_idx] - lo_val) * T::from_f64(frac)?)
}
