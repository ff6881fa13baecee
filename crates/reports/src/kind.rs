use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight report types the presentation layer can request, identified
/// by their stable external identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Overview,
    PnlByClassification,
    BuySell,
    OrderType,
    ValueIndex,
    Direction,
    Price,
    StrategyRecommendations,
}

impl ReportKind {
    pub const ALL: [ReportKind; 8] = [
        ReportKind::Overview,
        ReportKind::PnlByClassification,
        ReportKind::BuySell,
        ReportKind::OrderType,
        ReportKind::ValueIndex,
        ReportKind::Direction,
        ReportKind::Price,
        ReportKind::StrategyRecommendations,
    ];

    /// The stable identifier used by external collaborators.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Overview => "overview",
            ReportKind::PnlByClassification => "pnl-by-classification",
            ReportKind::BuySell => "buy-sell",
            ReportKind::OrderType => "order-type",
            ReportKind::ValueIndex => "value-index",
            ReportKind::Direction => "direction",
            ReportKind::Price => "price",
            ReportKind::StrategyRecommendations => "strategy-recommendations",
        }
    }

    /// Human-readable title for the rendered report.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Overview => "Data Overview",
            ReportKind::PnlByClassification => "PnL Analysis by Classification",
            ReportKind::BuySell => "Buy vs Sell Analysis",
            ReportKind::OrderType => "Order Type Analysis (Market vs Limit)",
            ReportKind::ValueIndex => "Greed/Fear Index Value Analysis",
            ReportKind::Direction => "Trading Direction Analysis",
            ReportKind::Price => "Execution Price Analysis",
            ReportKind::StrategyRecommendations => "Trading Strategy Recommendations",
        }
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| ReportError::UnknownReport(s.to_string()))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.as_str().parse::<ReportKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = "heatmap".parse::<ReportKind>().unwrap_err();
        assert!(matches!(err, ReportError::UnknownReport(s) if s == "heatmap"));
    }

    #[test]
    fn there_are_exactly_eight_reports() {
        assert_eq!(ReportKind::ALL.len(), 8);
    }
}
