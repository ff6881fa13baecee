use std::path::Path;
use tracing::debug;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{AnalysisConfig, Sampling, StrategyLeg, StrategyLegs};

/// Loads the analysis configuration from a TOML file.
///
/// Every setting has a sensible default, so a missing path (or an absent
/// file) falls back to `AnalysisConfig::default()` rather than failing the
/// session.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    let Some(path) = path else {
        debug!("no config file given, using defaults");
        return Ok(AnalysisConfig::default());
    };

    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    // Attempt to deserialize the entire configuration into our typed struct.
    let config = builder.try_deserialize::<AnalysisConfig>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::OrderSide;

    #[test]
    fn missing_path_falls_back_to_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.strategy.entry.side, OrderSide::Buy);
        assert_eq!(config.strategy.exit.side, OrderSide::Sell);
        assert!(config.sampling.scatter_max_rows > 0);
    }
}
