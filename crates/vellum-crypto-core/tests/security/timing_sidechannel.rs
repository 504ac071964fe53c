//! Timing side-channel validation for `constant_time_compare`.
//!
//! Compares timing of two same-length mismatches: one differing at the first
//! code unit, one differing at the last. A short-circuiting comparison would
//! return measurably sooner for the first class. Welch's t-statistic must
//! stay below 4.5.
//!
//! Statistical: scheduler noise can produce false positives on a busy
//! machine, so this runs only with `--ignored`.

use std::time::Instant;

use vellum_crypto_core::constant_time_compare;

/// Number of timing samples per class.
const SAMPLES: usize = 10_000;

/// Welch's t-test threshold. |t| < 4.5 means no detectable timing difference.
const T_THRESHOLD: f64 = 4.5;

#[inline(never)]
fn black_box_compare(a: &str, b: &str) -> bool {
    std::hint::black_box(constant_time_compare(
        std::hint::black_box(a),
        std::hint::black_box(b),
    ))
}

/// `t = (mean_a - mean_b) / sqrt(var_a/n_a + var_b/n_b)`
#[allow(clippy::cast_precision_loss)]
fn welch_t_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return f64::NAN;
    }

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    let mean_a: f64 = a.iter().sum::<f64>() / n_a;
    let mean_b: f64 = b.iter().sum::<f64>() / n_b;

    let var_a: f64 = a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / (n_a - 1.0);
    let var_b: f64 = b.iter().map(|x| (x - mean_b).powi(2)).sum::<f64>() / (n_b - 1.0);

    let denominator = (var_a / n_a + var_b / n_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (mean_a - mean_b) / denominator
}

#[test]
#[ignore = "statistical timing test; run with --ignored on a quiet machine"]
fn constant_time_compare_no_early_exit_leak() {
    let secret = "ocean mountain telescope ".repeat(40);
    let mut first = secret.clone().into_bytes();
    first[0] = b'X';
    let mut last = secret.clone().into_bytes();
    let end = last.len() - 1;
    last[end] = b'X';
    let differs_first = String::from_utf8(first).unwrap();
    let differs_last = String::from_utf8(last).unwrap();

    for _ in 0..100 {
        black_box_compare(&secret, &differs_first);
        black_box_compare(&secret, &differs_last);
    }

    let mut times_a = Vec::with_capacity(SAMPLES);
    let mut times_b = Vec::with_capacity(SAMPLES);

    for _ in 0..SAMPLES {
        let start = Instant::now();
        let _ = black_box_compare(&secret, &differs_first);
        let elapsed_a = start.elapsed().as_nanos();

        let start = Instant::now();
        let _ = black_box_compare(&secret, &differs_last);
        let elapsed_b = start.elapsed().as_nanos();

        #[allow(clippy::cast_precision_loss)]
        {
            times_a.push(elapsed_a as f64);
            times_b.push(elapsed_b as f64);
        }
    }

    let abs_t = welch_t_statistic(&times_a, &times_b).abs();
    eprintln!("constant_time_compare: |t| = {abs_t:.2} (threshold: {T_THRESHOLD})");
    assert!(
        abs_t < T_THRESHOLD,
        "timing leak: |t| = {abs_t:.2} exceeds {T_THRESHOLD}"
    );
}

#[test]
fn welch_t_test_identical_distributions() {
    let a = vec![1.0; 100];
    let b = vec![1.0; 100];
    assert!(welch_t_statistic(&a, &b).abs() < 0.001);
}

#[test]
fn welch_t_test_different_distributions() {
    let a: Vec<f64> = (0..1000).map(|i| 100.0 + f64::from(i % 3)).collect();
    let b: Vec<f64> = (0..1000).map(|i| 200.0 + f64::from(i % 3)).collect();
    assert!(welch_t_statistic(&a, &b).abs() > 100.0);
}
