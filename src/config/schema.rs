//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default maximum number of inter-arrival samples retained.
pub const DEFAULT_WINDOW_SIZE: u64 = 1000;

/// Default multiplier applied to elapsed time.
pub const DEFAULT_FACTOR: f64 = 0.9;

/// Default probability cutoff for the boolean verdict.
pub const DEFAULT_FAILURE_THRESHOLD: f64 = 0.5;

/// Root of a settings file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Template for every detector.
    pub detector: DetectorConfig,

    /// Peer monitoring settings.
    pub monitor: MonitorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Parameters of a single failure detector.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Max size of the inter-arrival sample window (rounded up to a power of two).
    pub window_size: u64,

    /// Scaling factor applied to elapsed time before comparison against history.
    pub factor: f64,

    /// Cutoff used by `check_failure`, conventionally in [0, 1].
    pub failure_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            factor: DEFAULT_FACTOR,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }
}

/// Peer monitor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Interval between suspicion sweeps in milliseconds.
    pub sweep_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sweep_interval_ms: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
