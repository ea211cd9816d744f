//! Shared utilities for integration tests.

use accrual_detector::Detector;

/// Register a heartbeat at 0 and then one after each gap. Returns the last arrival.
pub fn with_gaps(detector: &Detector, gaps: &[i64]) -> i64 {
    let mut time = 0;
    detector.register_heartbeat(Some(time));
    for gap in gaps {
        time += gap;
        detector.register_heartbeat(Some(time));
    }
    time
}

/// `count` gaps drawn uniformly from `range`, reproducible from `seed`.
#[allow(dead_code)]
pub fn random_gaps(seed: u64, count: usize, range: std::ops::Range<i64>) -> Vec<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count).map(|_| rng.i64(range.clone())).collect()
}
