//! The accrual failure detector.
//!
//! # Responsibilities
//! - Record inter-arrival gaps between heartbeats of one peer
//! - Estimate the probability that the peer has failed at a given time
//! - Turn that estimate into a verdict against the configured threshold
//!
//! # Design Decisions
//! - The estimate is the fraction of stored gaps no larger than the scaled
//!   elapsed time, so it rises monotonically with silence
//! - The first heartbeat only anchors `last_arrival`; it stores no gap
//! - Registration takes the lock exclusively, queries take it shared

use std::fmt;

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;
use serde::Serialize;

use crate::config::schema::{DEFAULT_FACTOR, DEFAULT_FAILURE_THRESHOLD, DEFAULT_WINDOW_SIZE};
use crate::config::{apply_options, ConfigOption, DetectorConfig, ResolvedConfig};
use crate::detector::clock;
use crate::detector::history::SampleRing;
use crate::error::ConfigError;

/// Lifecycle of a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No heartbeat seen yet; every query answers 0.
    Uninitialized,
    /// At least one heartbeat seen; queries consult history.
    Active,
}

/// Mutable state guarded by the detector's lock.
#[derive(Debug)]
struct State {
    history: SampleRing,
    /// Kept off the write counter's cache line.
    initialized: CachePadded<bool>,
    last_arrival: i64,
}

/// A failure detector for a single monitored peer.
///
/// ```
/// use accrual_detector::Detector;
///
/// let detector = Detector::default();
/// for t in [0, 1000, 2000, 3000] {
///     detector.register_heartbeat(Some(t));
/// }
/// assert_eq!(detector.failure_probability(Some(3500)), 0.0);
/// assert_eq!(detector.failure_probability(Some(5000)), 1.0);
/// ```
#[derive(Debug)]
pub struct Detector {
    state: RwLock<State>,
    factor: f64,
    threshold: f64,
}

impl Detector {
    /// Create a detector from the default configuration with `options` applied in order.
    ///
    /// The first option that fails aborts construction.
    pub fn new<I>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let mut config = DetectorConfig::default();
        apply_options(&mut config, options)?;
        Self::from_config(config)
    }

    /// Create a detector from an explicit configuration.
    pub fn from_config(config: DetectorConfig) -> Result<Self, ConfigError> {
        Self::from_resolved(config.resolve()?)
    }

    /// Create a detector from an already resolved configuration.
    ///
    /// Fails with `WindowTooLarge` when the sample buffer cannot be allocated.
    pub fn from_resolved(config: ResolvedConfig) -> Result<Self, ConfigError> {
        let history = SampleRing::try_with_capacity(config.capacity)?;
        Ok(Self::assemble(history, config))
    }

    fn assemble(history: SampleRing, config: ResolvedConfig) -> Self {
        tracing::debug!(
            capacity = config.capacity,
            factor = config.factor,
            threshold = config.threshold,
            "Detector created"
        );

        Self {
            state: RwLock::new(State {
                history,
                initialized: CachePadded::new(false),
                last_arrival: 0,
            }),
            factor: config.factor,
            threshold: config.threshold,
        }
    }

    /// Register a heartbeat received at `now` (milliseconds), defaulting to the wall clock.
    ///
    /// Timestamps are expected to be non-decreasing. An earlier timestamp is
    /// still accepted and stored as a negative gap.
    pub fn register_heartbeat(&self, now: Option<i64>) {
        let now = now.unwrap_or_else(clock::now_millis);
        let mut state = self.state.write();

        if !*state.initialized {
            *state.initialized = true;
            state.last_arrival = now;
            tracing::trace!(at = now, "First heartbeat");
            return;
        }

        let gap = clock::elapsed_millis(state.last_arrival, now);
        state.history.push(gap);
        state.last_arrival = now;
        tracing::trace!(at = now, gap, "Heartbeat registered");
    }

    /// Register a heartbeat at the current wall-clock time.
    pub fn heartbeat(&self) {
        self.register_heartbeat(None);
    }

    /// Suspicion level in [0, 1] that the peer has failed by `now` (milliseconds),
    /// defaulting to the wall clock.
    pub fn failure_probability(&self, now: Option<i64>) -> f64 {
        let state = self.state.read();
        if !*state.initialized {
            return 0.0;
        }

        let now = now.unwrap_or_else(clock::now_millis);
        let scaled = clock::elapsed_millis(state.last_arrival, now) * self.factor;
        let total = state.history.len();
        let count = state.history.count_at_most(scaled);

        count as f64 / total.max(1) as f64
    }

    /// Suspicion level at the current wall-clock time.
    pub fn probability_now(&self) -> f64 {
        self.failure_probability(None)
    }

    /// True when `failure_probability(now)` is at or above the threshold.
    pub fn check_failure(&self, now: Option<i64>) -> bool {
        self.failure_probability(now) >= self.threshold
    }

    /// Number of ring slots.
    pub fn capacity(&self) -> usize {
        self.state.read().history.capacity()
    }

    /// Number of gaps currently used by the estimate.
    pub fn sample_count(&self) -> usize {
        self.state.read().history.len()
    }

    pub fn is_initialized(&self) -> bool {
        *self.state.read().initialized
    }

    pub fn phase(&self) -> Phase {
        if self.is_initialized() {
            Phase::Active
        } else {
            Phase::Uninitialized
        }
    }

    /// Arrival time of the most recent heartbeat, if any.
    pub fn last_arrival(&self) -> Option<i64> {
        let state = self.state.read();
        (*state.initialized).then_some(state.last_arrival)
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Point-in-time summary for diagnostics.
    pub fn snapshot(&self) -> DetectorSnapshot {
        let state = self.state.read();
        DetectorSnapshot {
            phase: if *state.initialized {
                Phase::Active
            } else {
                Phase::Uninitialized
            },
            capacity: state.history.capacity(),
            sample_count: state.history.len(),
            heartbeats: state.history.written() + u64::from(*state.initialized),
            last_arrival: (*state.initialized).then_some(state.last_arrival),
            factor: self.factor,
            threshold: self.threshold,
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        let capacity = (DEFAULT_WINDOW_SIZE as usize).next_power_of_two();
        Self::assemble(
            SampleRing::with_capacity(capacity),
            ResolvedConfig {
                capacity,
                factor: DEFAULT_FACTOR,
                threshold: DEFAULT_FAILURE_THRESHOLD,
            },
        )
    }
}

/// Diagnostic view of a detector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorSnapshot {
    pub phase: Phase,
    pub capacity: usize,
    pub sample_count: usize,
    /// Heartbeats registered so far, including the anchoring first one.
    pub heartbeats: u64,
    pub last_arrival: Option<i64>,
    pub factor: f64,
    pub threshold: f64,
}

impl fmt::Display for DetectorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
