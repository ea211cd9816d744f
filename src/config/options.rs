//! Functional options for detector construction.
//!
//! # Responsibilities
//! - Mutate a `DetectorConfig` one field at a time
//! - Let callers plug in their own validating options
//!
//! # Design Decisions
//! - Options run in order against a copy of the defaults
//! - The built-in options accept any value; bounds are the caller's concern
//! - The first failing option short-circuits the rest

use crate::config::schema::DetectorConfig;
use crate::error::ConfigError;

/// A single validating mutation of a `DetectorConfig`.
pub type ConfigOption = Box<dyn FnOnce(&mut DetectorConfig) -> Result<(), ConfigError> + Send>;

/// Max number of inter-arrival samples retained.
pub fn window_size(size: u64) -> ConfigOption {
    Box::new(move |config: &mut DetectorConfig| {
        config.window_size = size;
        Ok(())
    })
}

/// Multiplier applied to elapsed time before comparison against history.
pub fn factor(factor: f64) -> ConfigOption {
    Box::new(move |config: &mut DetectorConfig| {
        config.factor = factor;
        Ok(())
    })
}

/// Cutoff used by the boolean verdict.
pub fn failure_threshold(threshold: f64) -> ConfigOption {
    Box::new(move |config: &mut DetectorConfig| {
        config.failure_threshold = threshold;
        Ok(())
    })
}

/// Wrap a caller-defined closure as an option.
pub fn custom<F>(option: F) -> ConfigOption
where
    F: FnOnce(&mut DetectorConfig) -> Result<(), ConfigError> + Send + 'static,
{
    Box::new(option)
}

/// Apply `options` in order, stopping at the first error.
pub fn apply_options<I>(config: &mut DetectorConfig, options: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = ConfigOption>,
{
    for option in options {
        option(config)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_apply_in_order() {
        let mut config = DetectorConfig::default();
        apply_options(
            &mut config,
            vec![window_size(16), factor(1.5), window_size(32), failure_threshold(0.8)],
        )
        .unwrap();

        assert_eq!(config.window_size, 32);
        assert_eq!(config.factor, 1.5);
        assert_eq!(config.failure_threshold, 0.8);
    }

    #[test]
    fn test_first_failure_stops_application() {
        let reject = custom(|_config| Err(ConfigError::Rejected("nope".into())));

        let mut config = DetectorConfig::default();
        let result = apply_options(&mut config, vec![factor(2.0), reject, window_size(8)]);

        assert!(matches!(result, Err(ConfigError::Rejected(ref msg)) if msg == "nope"));
        assert_eq!(config.factor, 2.0);
        // The option after the failure never ran.
        assert_eq!(config.window_size, 1000);
    }

    #[test]
    fn test_custom_closure_validates_and_mutates() {
        let bounded_factor = |value: f64| {
            custom(move |config| {
                if value <= 0.0 {
                    return Err(ConfigError::Rejected(format!("factor {value} must be positive")));
                }
                config.factor = value;
                Ok(())
            })
        };

        let mut config = DetectorConfig::default();
        apply_options(&mut config, vec![bounded_factor(1.25)]).unwrap();
        assert_eq!(config.factor, 1.25);

        let result = apply_options(&mut config, vec![bounded_factor(-1.0)]);
        assert!(matches!(result, Err(ConfigError::Rejected(_))));
        assert_eq!(config.factor, 1.25);
    }
}
