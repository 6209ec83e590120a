//! Quick Start
//!
//! Decomposes a synthetic ramp / plateau / decline sequence and prints the
//! extracted trends. Round events are logged through `tracing`.
//!
//! Run with: `cargo run --example quick_start`
//! Set `RUST_LOG=autotrend=trace` to also see every round's focus targets.

#![allow(clippy::cast_precision_loss)]

use autotrend::prelude::*;
use tracing_subscriber::EnvFilter;

/// Rises for 25 steps, holds for 15, then falls, with a small ripple.
fn synthetic_sequence() -> Vec<f64> {
    (0..60)
        .map(|i| {
            let x = i as f64;
            let base = if i <= 24 {
                0.5 * x
            } else if i <= 39 {
                12.0
            } else {
                12.0 - 0.8 * (x - 39.0)
            };
            base + (x * 1.3).sin() * 0.05
        })
        .collect()
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data = synthetic_sequence();
    let config = Llt::new()
        .window_size(5)
        .max_models(5)
        .error_percentile(40.0)
        .percentile_step(10.0)
        .update_threshold(true)
        .verbose(true);

    let result = config.decompose(&data)?;

    println!("=== LLT Decomposition ===");
    println!("Observations: {}", result.len());
    println!("Rounds:       {}", result.num_iterations());
    println!("Stop reason:  {:?}", result.state());
    println!();

    println!("Models:");
    for (k, model) in result.models().iter().enumerate() {
        let log = &result.process_logs()[k];
        println!(
            "  round {}: slope {:+.4}, intercept {:.4}, P{:.0} cutoff {:.4}, claimed {}/{}",
            k + 1,
            model.slope(),
            model.intercept(),
            log.percentile,
            log.threshold,
            log.low_error_count(),
            log.focus_targets.len(),
        );
    }
    println!();

    println!("Trend segments:");
    for segment in result.trend_segments() {
        println!(
            "  [{:>2}, {:>2}) -> round {}",
            segment.range.start, segment.range.end, segment.iteration
        );
    }

    let unassigned = result.unassigned();
    if !unassigned.is_empty() {
        println!();
        println!("Unexplained indices: {unassigned:?}");
    }

    Ok(())
}
