//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! DetectorConfig::default()
//!     → options.rs (functional options, applied in order)
//!     → validation.rs (resolve window size to a power-of-two capacity)
//!     → ResolvedConfig (consumed once by Detector construction)
//!
//! config file (TOML)
//!     → loader.rs (parse & deserialize into Settings)
//!     → validation.rs (detector section resolved up front)
//!     → Settings shared with PeerMonitor / SuspicionSweeper
//! ```
//!
//! # Design Decisions
//! - A detector never retains its config; it copies out what it needs
//! - All fields have defaults to allow minimal configs
//! - The first failing option aborts construction

pub mod loader;
pub mod options;
pub mod schema;
pub mod validation;

pub use options::{apply_options, custom, factor, failure_threshold, window_size, ConfigOption};
pub use schema::{DetectorConfig, MonitorConfig, ObservabilityConfig, Settings};
pub use validation::ResolvedConfig;
