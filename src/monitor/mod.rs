//! Multi-peer monitoring.
//!
//! # Data Flow
//! ```text
//! Heartbeat from peer P:
//!     → registry.rs (detector for P, created on first sight)
//!     → Detector::register_heartbeat
//!
//! Periodic timer (sweeper.rs):
//!     → evaluate every tracked peer
//!     → emit Suspected / Recovered on verdict changes
//! ```
//!
//! # Design Decisions
//! - One detector per peer, all built from the same resolved template
//! - The registry only tracks peers; removing them is the caller's decision
//! - Sweeps report transitions, they never act on them

pub mod registry;
pub mod sweeper;

pub use registry::PeerMonitor;
pub use sweeper::{SuspicionEvent, SuspicionSweeper};
