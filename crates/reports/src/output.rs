use crate::kind::ReportKind;
use analytics::{
    BuySellBreakdown, CorrelationMatrix, DirectionSplit, GroupPerformance, OrderKindCell,
    OverviewSummary, PriceStats, StrategySimulation, ValuePerformance,
};
use core_types::{OrderKind, TradeRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// A finished report: the typed derived records plus the key-insight lines
/// the presentation layer shows alongside them.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub title: &'static str,
    pub body: ReportBody,
    pub insights: Vec<String>,
}

/// The typed payload of each report kind, ready for tabular display.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "report", rename_all = "kebab-case")]
pub enum ReportBody {
    Overview {
        summary: OverviewSummary,
    },
    PnlByClassification {
        performance: BTreeMap<String, GroupPerformance>,
    },
    BuySell {
        breakdown: BTreeMap<String, BuySellBreakdown>,
    },
    OrderType {
        performance: BTreeMap<OrderKind, GroupPerformance>,
        breakdown: BTreeMap<OrderKind, BTreeMap<String, OrderKindCell>>,
    },
    ValueIndex {
        performance: BTreeMap<u8, ValuePerformance>,
        correlation: CorrelationMatrix,
        /// Bounded, seeded row sample for the scatter display. Explicitly
        /// outside the deterministic aggregation contract.
        scatter_sample: Vec<TradeRecord>,
    },
    Direction {
        performance: BTreeMap<String, GroupPerformance>,
        frequency: BTreeMap<String, usize>,
        split: DirectionSplit,
    },
    Price {
        stats: BTreeMap<String, PriceStats>,
    },
    StrategyRecommendations {
        matrix: BTreeMap<String, StrategyMatrixRow>,
        rankings: Rankings,
        simulation: Option<StrategySimulation>,
        playbook: &'static str,
    },
}

/// One row of the strategy performance matrix: the common group metrics
/// plus price level and volatility for the classification.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyMatrixRow {
    #[serde(flatten)]
    pub performance: GroupPerformance,
    pub avg_price: Decimal,
    /// Price coefficient of variation; `None` when the mean price is zero.
    pub price_cv: Option<Decimal>,
}

/// Best-by-metric picks over the classification groups. Every field skips
/// groups whose metric is undefined; `None` means no group qualified.
#[derive(Debug, Clone, Serialize)]
pub struct Rankings {
    pub best_total_pnl: Option<String>,
    pub best_win_rate: Option<String>,
    pub best_roi: Option<String>,
    pub most_active: Option<String>,
    /// Classification with the lowest average BUY fill price.
    pub best_buy_period: Option<String>,
    /// Classification with the highest average SELL fill price.
    pub best_sell_period: Option<String>,
    pub preferred_order_kind: Option<OrderKind>,
}
