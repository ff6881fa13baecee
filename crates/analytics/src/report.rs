use chrono::NaiveDate;
use core_types::OrderSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The per-group aggregate record, one per group-key value.
///
/// A `GroupPerformance` is only ever produced for a group with at least one
/// row, so the count-based metrics are always defined. `roi_pct` stays
/// `None` when the group's volume sums to zero; such groups are skipped by
/// the ROI mapping and by every ranking helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPerformance {
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub trade_count: usize,
    pub total_volume: Decimal,
    /// count(closed_pnl > 0) / count(*) x 100.
    pub win_rate_pct: Decimal,
    /// total_pnl / total_volume x 100; `None` when the volume is zero.
    pub roi_pct: Option<Decimal>,
}

/// Per-sentiment-value performance: the common group metrics plus the
/// average fill price at that index value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePerformance {
    #[serde(flatten)]
    pub performance: GroupPerformance,
    pub avg_price: Decimal,
}

/// Descriptive statistics over `execution_price` within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub mean: Decimal,
    /// Population standard deviation.
    pub std_dev: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub median: Decimal,
    /// Coefficient of variation (std_dev / mean); `None` when the mean is zero.
    pub cv: Option<Decimal>,
}

/// Buy-versus-sell comparison within one classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuySellBreakdown {
    pub buy_count: usize,
    pub sell_count: usize,
    pub buy_volume: Decimal,
    pub sell_volume: Decimal,
    pub buy_tokens: Decimal,
    pub sell_tokens: Decimal,
    pub buy_pnl: Decimal,
    pub sell_pnl: Decimal,
    /// `None` when the classification has no BUY rows.
    pub buy_avg_price: Option<Decimal>,
    /// `None` when the classification has no SELL rows.
    pub sell_avg_price: Option<Decimal>,
    /// mean SELL price - mean BUY price; `None` when either side is absent.
    pub spread: Option<Decimal>,
}

/// Per-(order kind, classification) cell of the order-type breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderKindCell {
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub trade_count: usize,
    pub win_rate_pct: Decimal,
    pub avg_fee: Decimal,
}

/// PnL and win rate for one long/short cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortPerformance {
    pub total_pnl: Decimal,
    pub trade_count: usize,
    pub win_rate_pct: Decimal,
}

/// The long/short partition of the filtered rows. A cohort with no rows is
/// `None`, never a zeroed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionSplit {
    pub long: Option<CohortPerformance>,
    pub short: Option<CohortPerformance>,
}

/// Headline figures for the overview report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSummary {
    pub total_trades: usize,
    pub total_pnl: Decimal,
    pub win_rate_pct: Decimal,
    pub total_volume: Decimal,
    pub avg_trade_size: Decimal,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub most_active_classification: String,
    pub preferred_side: OrderSide,
}

/// Result of the two-leg strategy simulation: mean fill price of each leg,
/// their difference, and the difference as a fraction of the entry mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySimulation {
    pub entry_trades: usize,
    pub exit_trades: usize,
    pub avg_entry_price: Decimal,
    pub avg_exit_price: Decimal,
    pub potential_profit: Decimal,
    pub roi_pct: Decimal,
}
