//! Serialization tests, compiled only with the `serde` feature.
//!
//! Run with: `cargo test -p autotrend --features serde`

#![cfg(feature = "serde")]

mod common;

use autotrend::prelude::*;
use common::{approx_eq, piecewise_linear};

#[test]
fn test_config_round_trip() {
    let config = Llt::new()
        .window_size(7)
        .max_models(3)
        .error_percentile(45.0)
        .percentile_step(2.5)
        .update_threshold(true);
    let json = serde_json::to_string(&config).unwrap();
    let back: Llt = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_result_round_trip() {
    let data = piecewise_linear();
    let result = Llt::new()
        .window_size(5)
        .max_models(5)
        .error_percentile(50.0)
        .decompose(&data)
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: LltResult<f64> = serde_json::from_str(&json).unwrap();

    assert_eq!(back.state(), result.state());
    assert_eq!(back.trend_marks(), result.trend_marks());
    assert_eq!(back.window_size(), result.window_size());
    assert_eq!(back.process_logs().len(), result.process_logs().len());
    for (a, b) in back.slopes().iter().zip(result.slopes()) {
        assert!(approx_eq(*a, b, 1e-12));
    }
}

#[test]
fn test_marks_serialize_by_variant() {
    let mark: TrendMark<f64> = TrendMark::Assigned {
        iteration: 2,
        prediction: Some(1.5),
    };
    let value = serde_json::to_value(mark).unwrap();
    assert_eq!(value["Assigned"]["iteration"], 2);

    let unassigned = serde_json::to_value(TrendMark::<f64>::Unassigned).unwrap();
    assert_eq!(unassigned, serde_json::json!("Unassigned"));
}
