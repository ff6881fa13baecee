use crate::enums::{OrderKind, OrderSide, PositionCohort};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single executed trade row, as ingested from the CSV export.
///
/// Records are immutable once loaded: filtering produces new views over the
/// same rows, never in-place mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Trade date, the ordering key for time-series displays.
    pub date: NaiveDate,
    /// Sentiment bucket for the day, e.g. "Fear", "Neutral", "Extreme Greed".
    pub classification: String,
    /// Raw greed/fear index score, 0..=100.
    pub value: u8,
    /// Order-level trade direction.
    pub side: OrderSide,
    /// Finer-grained position action, e.g. "Open Long", "Close Short".
    pub direction: String,
    /// Fill price.
    pub execution_price: Decimal,
    /// Notional traded, in USD.
    pub size_usd: Decimal,
    /// Quantity traded, in tokens.
    pub size_tokens: Decimal,
    /// Realized profit/loss attributed to this row (signed).
    pub closed_pnl: Decimal,
    /// Transaction fee.
    pub fee: Decimal,
    /// True when the order crossed the book (market order).
    pub crossed: bool,
}

impl TradeRecord {
    pub fn order_kind(&self) -> OrderKind {
        OrderKind::from_crossed(self.crossed)
    }

    pub fn cohort(&self) -> Option<PositionCohort> {
        PositionCohort::classify(&self.direction)
    }

    /// A trade counts as a win when it realized a strictly positive PnL.
    pub fn is_win(&self) -> bool {
        self.closed_pnl > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            classification: "Greed".to_string(),
            value: 72,
            side: OrderSide::Buy,
            direction: "Open Long".to_string(),
            execution_price: dec!(64123.5),
            size_usd: dec!(1500),
            size_tokens: dec!(0.0234),
            closed_pnl: dec!(12.75),
            fee: dec!(0.45),
            crossed: true,
        }
    }

    #[test]
    fn win_requires_strictly_positive_pnl() {
        let mut r = record();
        assert!(r.is_win());
        r.closed_pnl = Decimal::ZERO;
        assert!(!r.is_win());
        r.closed_pnl = dec!(-0.01);
        assert!(!r.is_win());
    }

    #[test]
    fn order_kind_and_cohort_derive_from_fields() {
        let r = record();
        assert_eq!(r.order_kind(), OrderKind::Market);
        assert_eq!(r.cohort(), Some(PositionCohort::Long));
    }

    #[test]
    fn record_round_trips_through_serde() {
        let r = record();
        let json = serde_json::to_string(&r).unwrap();
        let back: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
