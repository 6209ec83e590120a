//! Contiguous range extraction over sorted index sets.
//!
//! Converts a strictly increasing list of sequence indices into the maximal
//! half-open intervals it covers:
//!
//! ```
//! use autotrend::kernels::ranges::extract_ranges;
//!
//! assert_eq!(extract_ranges(&[1, 2, 3, 7, 8]), vec![1..4, 7..9]);
//! assert!(extract_ranges(&[]).is_empty());
//! ```

use std::ops::Range;

/// A maximal contiguous interval `[start, end)` of focus targets.
pub type FocusRange = Range<usize>;

/// Merges consecutive indices into maximal half-open ranges.
///
/// The input must be strictly increasing (sorted, no duplicates). Output
/// order follows input order, and the union of the returned ranges equals
/// the input set exactly. No two returned ranges are adjacent.
#[must_use]
pub fn extract_ranges(indices: &[usize]) -> Vec<FocusRange> {
    let Some((&first, rest)) = indices.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut prev = first;

    for &idx in rest {
        debug_assert!(idx > prev, "indices must be strictly increasing");
        if idx == prev + 1 {
            prev = idx;
        } else {
            ranges.push(start..prev + 1);
            start = idx;
            prev = idx;
        }
    }

    ranges.push(start..prev + 1);
    ranges
}

/// Total number of indices covered by `ranges`.
#[must_use]
pub fn covered_len(ranges: &[FocusRange]) -> usize {
    ranges.iter().map(|r| r.end - r.start).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ranges_basic() {
        assert_eq!(extract_ranges(&[1, 2, 3, 7, 8]), vec![1..4, 7..9]);
    }

    #[test]
    fn test_extract_ranges_empty() {
        assert!(extract_ranges(&[]).is_empty());
    }

    #[test]
    fn test_extract_ranges_single() {
        assert_eq!(extract_ranges(&[4]), vec![4..5]);
    }

    #[test]
    fn test_extract_ranges_all_isolated() {
        assert_eq!(extract_ranges(&[0, 2, 4]), vec![0..1, 2..3, 4..5]);
    }

    #[test]
    fn test_extract_ranges_one_run() {
        let indices: Vec<usize> = (5..20).collect();
        assert_eq!(extract_ranges(&indices), vec![5..20]);
    }

    #[test]
    fn test_covered_len() {
        let ranges = extract_ranges(&[1, 2, 3, 7, 8, 11]);
        assert_eq!(covered_len(&ranges), 6);
        assert_eq!(covered_len(&[]), 0);
    }
}
