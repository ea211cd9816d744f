//! Error definitions.
//!
//! Configuration and sample buffer allocation are the only things in this
//! crate that can fail. Heartbeat registration and probability queries on an
//! existing detector are total over their inputs.

use thiserror::Error;

/// Errors raised while building or loading a detector configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The window size cannot be backed by a power-of-two sample buffer.
    #[error("window size {requested} is too large for a power-of-two sample buffer")]
    WindowTooLarge { requested: u64 },

    /// A configuration option rejected its value.
    #[error("option rejected: {0}")]
    Rejected(String),

    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for the settings schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
