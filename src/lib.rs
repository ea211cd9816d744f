//! Adaptive accrual failure detection.
//!
//! Instead of a binary alive/dead verdict, a [`Detector`] turns the history of
//! heartbeat inter-arrival gaps of one peer into a continuous failure
//! probability: the fraction of recent gaps that were no longer than the
//! (scaled) silence observed so far.
//!
//! # Architecture Overview
//!
//! ```text
//!   heartbeat source ──register_heartbeat(t)──▶ ┌──────────────────────┐
//!                                               │       Detector       │
//!                                               │  RwLock<State>       │
//!                                               │   ├ SampleRing (2^k) │
//!   suspicion consumer ◀─failure_probability(t)─│   ├ last_arrival     │
//!                      ◀─check_failure(t)───────│   └ initialized      │
//!                                               └──────────────────────┘
//!
//!   PeerMonitor<K>      one Detector per peer (dashmap)
//!   SuspicionSweeper<K> periodic evaluation, Suspected/Recovered events
//! ```
//!
//! # Example
//!
//! ```
//! use accrual_detector::{config, Detector};
//!
//! let detector = Detector::new(vec![config::window_size(8), config::failure_threshold(0.5)])?;
//! let mut t = 0;
//! detector.register_heartbeat(Some(t));
//! for gap in [1010, 1023, 1012, 1032, 1016, 1020, 990, 1028] {
//!     t += gap;
//!     detector.register_heartbeat(Some(t));
//! }
//!
//! assert_eq!(detector.failure_probability(Some(t + 1100)), 0.125);
//! assert!(!detector.check_failure(Some(t + 1100)));
//! assert!(detector.check_failure(Some(t + 2100)));
//! # Ok::<(), accrual_detector::ConfigError>(())
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod lifecycle;
pub mod monitor;
pub mod observability;

pub use config::{ConfigOption, DetectorConfig, Settings};
pub use detector::{Detector, DetectorSnapshot, Phase};
pub use error::ConfigError;
pub use lifecycle::Shutdown;
pub use monitor::{PeerMonitor, SuspicionEvent, SuspicionSweeper};
