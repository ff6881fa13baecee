use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side of the order
    pub fn opposite(&self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }

    /// The uppercase wire form used in the CSV export ("BUY" / "SELL").
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl FromStr for OrderSide {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            other => Err(CoreError::InvalidInput(
                "side".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the order executed: a crossed order took liquidity from the resting
/// book (market order), an uncrossed one rested until matched (limit order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderKind {
    Market,
    Limit,
}

impl OrderKind {
    pub fn from_crossed(crossed: bool) -> Self {
        if crossed {
            OrderKind::Market
        } else {
            OrderKind::Limit
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderKind::Market => "Market Order",
            OrderKind::Limit => "Limit Order",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Long/short bucketing of the finer-grained `direction` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PositionCohort {
    Long,
    Short,
}

impl PositionCohort {
    /// Maps a position-action label to its cohort. Labels outside the two
    /// known sets belong to neither cohort and are excluded from the split.
    pub fn classify(direction: &str) -> Option<Self> {
        match direction {
            "Open Long" | "Close Long" | "Buy" => Some(PositionCohort::Long),
            "Open Short" | "Close Short" | "Sell" => Some(PositionCohort::Short),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PositionCohort::Long => "Long",
            PositionCohort::Short => "Short",
        }
    }
}

impl fmt::Display for PositionCohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_side_parses_case_insensitively() {
        assert_eq!("BUY".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!("sell".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!(" Buy ".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert!("HOLD".parse::<OrderSide>().is_err());
    }

    #[test]
    fn order_side_opposite_flips() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn order_kind_from_crossed_flag() {
        assert_eq!(OrderKind::from_crossed(true), OrderKind::Market);
        assert_eq!(OrderKind::from_crossed(false), OrderKind::Limit);
    }

    #[test]
    fn cohort_covers_both_direction_sets() {
        for d in ["Open Long", "Close Long", "Buy"] {
            assert_eq!(PositionCohort::classify(d), Some(PositionCohort::Long));
        }
        for d in ["Open Short", "Close Short", "Sell"] {
            assert_eq!(PositionCohort::classify(d), Some(PositionCohort::Short));
        }
        assert_eq!(PositionCohort::classify("Liquidation"), None);
    }
}
