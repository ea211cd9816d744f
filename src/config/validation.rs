//! Configuration resolution.
//!
//! # Responsibilities
//! - Round the window size up to a power-of-two capacity (minimum 1)
//! - Reject windows whose capacity is not addressable or whose buffer
//!   would exceed `isize::MAX` bytes
//!
//! # Design Decisions
//! - Factor and threshold pass through untouched; no bounds are enforced
//! - Resolution is a pure function: DetectorConfig → Result<ResolvedConfig, ConfigError>

use std::mem::size_of;

use crate::config::schema::DetectorConfig;
use crate::error::ConfigError;

/// Largest capacity whose `f64` buffer fits in a single allocation.
pub const MAX_CAPACITY: usize = isize::MAX as usize / size_of::<f64>();

/// A detector configuration with its buffer capacity settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    /// Ring capacity, always a power of two.
    pub capacity: usize,
    pub factor: f64,
    pub threshold: f64,
}

impl DetectorConfig {
    /// Resolve into the values a detector is built from.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let capacity = usize::try_from(self.window_size)
            .ok()
            .and_then(usize::checked_next_power_of_two)
            .filter(|&capacity| capacity <= MAX_CAPACITY)
            .ok_or(ConfigError::WindowTooLarge {
                requested: self.window_size,
            })?;

        Ok(ResolvedConfig {
            capacity,
            factor: self.factor,
            threshold: self.failure_threshold,
        })
    }
}
