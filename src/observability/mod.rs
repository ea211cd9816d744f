//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Detector / PeerMonitor / SuspicionSweeper produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and gauges per peer)
//!
//! Consumers:
//!     → whatever subscriber the host installs (or init_logging)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a recorder is the host's job
//! - Metric updates are no-ops until a recorder exists
//! - Per-heartbeat events are trace level so they cost nothing by default

pub mod logging;
pub mod metrics;
