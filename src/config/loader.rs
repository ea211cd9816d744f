//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::Settings;
use crate::error::ConfigError;

/// Load settings from a TOML file.
///
/// The detector section is resolved before returning so a window size that
/// cannot be turned into a buffer fails here rather than on the first peer.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parse settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content)?;
    settings.detector.resolve()?;

    tracing::debug!(
        window_size = settings.detector.window_size,
        factor = settings.detector.factor,
        failure_threshold = settings.detector.failure_threshold,
        sweep_interval_ms = settings.monitor.sweep_interval_ms,
        "Settings loaded"
    );
    Ok(settings)
}
