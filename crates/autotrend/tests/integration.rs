//! Integration tests for the public API.
//!
//! These tests run complete decompositions through the public entry points
//! and check the end-to-end scenarios and run-level invariants.

#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

mod common;

use autotrend::prelude::*;
use common::{approx_eq, linear_ramp, piecewise_linear, ramp_with_outlier, EPSILON};

// ==================== End-to-End Scenarios ====================

#[test]
fn test_linear_ramp_explained_in_one_round() {
    let data = linear_ramp(20);
    let result = Llt::new()
        .window_size(5)
        .max_models(3)
        .error_percentile(50.0)
        .decompose(&data)
        .unwrap();

    assert_eq!(result.state(), RunState::StoppedEmpty);
    assert_eq!(result.num_iterations(), 1);
    assert!(approx_eq(result.models()[0].slope(), 1.0, EPSILON));

    let log = &result.process_logs()[0];
    assert!(log.errors.iter().all(|&e| approx_eq(e, 0.0, EPSILON)));
    assert!(approx_eq(log.threshold, 0.0, EPSILON));

    let marks = result.trend_marks();
    assert!(marks[5..20].iter().all(|&m| m == Some(1)));
}

#[test]
fn test_outlier_exhausts_budget() {
    let data = ramp_with_outlier();
    let result = Llt::new()
        .window_size(5)
        .max_models(2)
        .error_percentile(60.0)
        .decompose(&data)
        .unwrap();

    assert_eq!(result.state(), RunState::StoppedExhausted);
    assert_eq!(result.num_iterations(), 2);

    // the spike and the index anchored on it are flagged in round 1
    let first = &result.process_logs()[0];
    let flagged: Vec<usize> = first
        .focus_targets
        .iter()
        .zip(&first.high_error_flags)
        .filter(|(_, &high)| high)
        .map(|(&t, _)| t)
        .collect();
    assert_eq!(flagged, vec![12, 17]);

    // and re-attempted in round 2
    let second = &result.process_logs()[1];
    assert_eq!(second.focus_targets, vec![12, 17]);
    assert_eq!(second.focus_ranges, vec![12..13, 17..18]);

    assert_eq!(result.unassigned(), vec![12, 17]);
    assert_eq!(result.trend_marks()[12], None);
}

#[test]
fn test_outlier_second_round_trains_before_spike() {
    let data = ramp_with_outlier();
    let result = Llt::new()
        .window_size(5)
        .max_models(2)
        .error_percentile(60.0)
        .decompose(&data)
        .unwrap();

    // round 2 trains on [7, 12): y = x + 7
    let model = result.models()[1];
    assert!(approx_eq(model.slope(), 1.0, EPSILON));
    assert!(approx_eq(model.intercept(), 7.0, EPSILON));
}

#[test]
fn test_piecewise_static_policy() {
    let data = piecewise_linear();
    let result = Llt::new()
        .window_size(5)
        .max_models(5)
        .error_percentile(50.0)
        .decompose(&data)
        .unwrap();

    assert_eq!(result.state(), RunState::StoppedEmpty);
    assert_eq!(result.num_iterations(), 3);
    assert!(approx_eq(result.slopes()[0], 0.5, EPSILON));
    assert!(approx_eq(result.slopes()[1], 0.0, EPSILON));
    assert!(result.unassigned().is_empty());

    let marks = result.trend_marks();
    assert!(marks[..40].iter().all(|&m| m == Some(1)));

    let first = &result.process_logs()[0].threshold;
    for log in result.process_logs() {
        assert_eq!(log.threshold, *first);
        assert_eq!(log.percentile, 50.0);
    }
}

#[test]
fn test_piecewise_adaptive_policy() {
    let data = piecewise_linear();
    let result = Llt::new()
        .window_size(5)
        .max_models(5)
        .error_percentile(40.0)
        .percentile_step(10.0)
        .update_threshold(true)
        .decompose(&data)
        .unwrap();

    assert_eq!(result.state(), RunState::StoppedEmpty);
    assert_eq!(result.num_iterations(), 3);
    assert!(approx_eq(result.slopes()[2], -0.8, EPSILON));

    let percentiles: Vec<f64> = result.process_logs().iter().map(|l| l.percentile).collect();
    assert_eq!(percentiles, vec![50.0, 60.0, 70.0]);
}

#[test]
fn test_trend_segments_cover_assigned_indices() {
    let data = piecewise_linear();
    let result = Llt::new().window_size(5).max_models(5).decompose(&data).unwrap();

    let segments = result.trend_segments();
    let covered: usize = segments.iter().map(|s| s.range.len()).sum();
    assert_eq!(covered, data.len() - result.unassigned().len());

    for pair in segments.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.range.end <= b.range.start);
        assert!(a.range.end < b.range.start || a.iteration != b.iteration);
    }
}

// ==================== Run-Level Invariants ====================

#[test]
fn test_models_match_logs() {
    let data = piecewise_linear();
    for max_models in 1..=6 {
        let result = Llt::new().max_models(max_models).decompose(&data).unwrap();
        assert_eq!(result.models().len(), result.process_logs().len());
        assert!(result.num_iterations() <= max_models);
        for (k, log) in result.process_logs().iter().enumerate() {
            assert_eq!(log.iteration, k + 1);
        }
    }
}

#[test]
fn test_focus_set_carried_or_claimed() {
    let data = ramp_with_outlier();
    let result = Llt::new()
        .window_size(4)
        .max_models(4)
        .error_percentile(30.0)
        .decompose(&data)
        .unwrap();

    let logs = result.process_logs();
    for pair in logs.windows(2) {
        let carried: Vec<usize> = pair[0]
            .focus_targets
            .iter()
            .zip(&pair[0].high_error_flags)
            .filter(|(_, &high)| high)
            .map(|(&t, _)| t)
            .collect();
        assert_eq!(carried, pair[1].focus_targets);
    }

    let marks = result.trend_marks();
    for log in logs {
        for (&t, &high) in log.focus_targets.iter().zip(&log.high_error_flags) {
            if !high {
                assert_eq!(marks[t], Some(log.iteration));
            }
        }
    }
}

#[test]
fn test_predictions_recorded_for_claimed_indices() {
    let data = ramp_with_outlier();
    let result = Llt::new()
        .window_size(5)
        .max_models(2)
        .error_percentile(60.0)
        .decompose(&data)
        .unwrap();

    let log = &result.process_logs()[0];
    let predictions = result.prediction_marks();
    for ((&t, &p), &high) in log
        .focus_targets
        .iter()
        .zip(&log.predictions)
        .zip(&log.high_error_flags)
    {
        if high {
            assert_eq!(predictions[t], None);
        } else {
            assert_eq!(predictions[t], Some(p));
        }
    }
}

#[test]
fn test_decomposition_is_idempotent() {
    let data = piecewise_linear();
    let config = Llt::new()
        .window_size(6)
        .max_models(5)
        .error_percentile(35.0)
        .percentile_step(5.0)
        .update_threshold(true);

    let first = config.decompose(&data).unwrap();
    let second = config.decompose(&data).unwrap();

    let bits = |r: &LltResult<f64>| -> Vec<Option<u64>> {
        r.prediction_marks()
            .iter()
            .map(|p| p.map(f64::to_bits))
            .collect()
    };
    assert_eq!(first.trend_marks(), second.trend_marks());
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first.models(), second.models());
    assert_eq!(first.process_logs(), second.process_logs());
}

#[test]
fn test_free_function_matches_method() {
    let data = ramp_with_outlier();
    let config = Llt::new().max_models(3);
    assert_eq!(
        decompose_llt(&data, &config).unwrap(),
        config.decompose(&data).unwrap()
    );
}

#[test]
fn test_retained_sequence_round_trips() {
    let data = piecewise_linear();
    let result = Llt::new().retain_sequence(true).decompose(&data).unwrap();
    assert_eq!(result.sequence(), Some(&data[..]));
}

#[test]
fn test_f32_matches_f64_marks() {
    let data = piecewise_linear();
    let data_f32: Vec<f32> = data.iter().map(|&x| x as f32).collect();
    let config = Llt::new().window_size(5).max_models(3).error_percentile(50.0);

    let r64 = config.decompose(&data).unwrap();
    let r32 = config.decompose(&data_f32).unwrap();
    assert_eq!(r64.num_iterations(), r32.num_iterations());
    assert!((r32.slopes()[0] - 0.5).abs() < 1e-5);
}
