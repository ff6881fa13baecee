use crate::error::ConfigError;
use core_types::OrderSide;
use serde::Deserialize;

/// The root configuration structure for an analysis session.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub sampling: Sampling,
    #[serde(default)]
    pub strategy: StrategyLegs,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling.scatter_max_rows == 0 {
            return Err(ConfigError::ValidationError(
                "sampling.scatter_max_rows must be at least 1".to_string(),
            ));
        }
        if self.strategy.entry.classifications.is_empty()
            || self.strategy.exit.classifications.is_empty()
        {
            return Err(ConfigError::ValidationError(
                "both strategy legs need at least one classification".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sampling: Sampling::default(),
            strategy: StrategyLegs::default(),
        }
    }
}

/// Parameters for the bounded scatter-display sample.
#[derive(Debug, Clone, Deserialize)]
pub struct Sampling {
    /// Upper bound on the number of rows handed to the scatter display.
    #[serde(default = "default_scatter_max_rows")]
    pub scatter_max_rows: usize,
    /// Seed for the sample draw; a fixed seed reproduces the same sample.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            scatter_max_rows: default_scatter_max_rows(),
            seed: default_seed(),
        }
    }
}

fn default_scatter_max_rows() -> usize {
    1000
}

fn default_seed() -> u64 {
    42
}

/// The two legs of the strategy simulation.
///
/// The defaults mirror the buy-the-dip playbook the dashboard ships with:
/// enter on BUY rows during "Neutral", exit on SELL rows during the greed
/// phases.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyLegs {
    pub entry: StrategyLeg,
    pub exit: StrategyLeg,
}

impl Default for StrategyLegs {
    fn default() -> Self {
        Self {
            entry: StrategyLeg {
                side: OrderSide::Buy,
                classifications: vec!["Neutral".to_string()],
            },
            exit: StrategyLeg {
                side: OrderSide::Sell,
                classifications: vec!["Greed".to_string(), "Extreme Greed".to_string()],
            },
        }
    }
}

/// One side-plus-classification-set sub-filter.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyLeg {
    pub side: OrderSide,
    pub classifications: Vec<String>,
}
