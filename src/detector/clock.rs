//! Wall-clock time in milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
///
/// A clock set before the epoch reads as 0.
pub fn now_millis() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    i64::try_from(elapsed).unwrap_or(i64::MAX)
}

/// `to - from` as a float, exact for any pair of `i64` timestamps.
pub fn elapsed_millis(from: i64, to: i64) -> f64 {
    (i128::from(to) - i128::from(from)) as f64
}
