//! Accrual failure detection.
//!
//! # Data Flow
//! ```text
//! Heartbeat source:
//!     register_heartbeat(t)
//!     → gap = t - last_arrival (skipped on the very first heartbeat)
//!     → history.rs ring (oldest gap overwritten once full)
//!
//! Suspicion consumer:
//!     failure_probability(t)
//!     → scaled = (t - last_arrival) * factor
//!     → fraction of stored gaps <= scaled (empirical CDF)
//!     check_failure(t) = failure_probability(t) >= threshold
//! ```
//!
//! # Design Decisions
//! - Non-parametric: no distribution is fitted to the gaps
//! - One reader-writer lock per detector; queries only take it shared
//! - Timestamps are caller-supplied milliseconds, clock.rs fills in when absent
//! - Out-of-order timestamps are accepted and stored as negative gaps

pub mod accrual;
pub mod clock;
pub mod history;

pub use accrual::{Detector, DetectorSnapshot, Phase};
pub use history::SampleRing;
