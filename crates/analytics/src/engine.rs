use crate::error::AnalyticsError;
use crate::report::{
    BuySellBreakdown, CohortPerformance, DirectionSplit, GroupPerformance, OrderKindCell,
    OverviewSummary, PriceStats, StrategySimulation, ValuePerformance,
};
use core_types::{OrderKind, OrderSide, PositionCohort, TradeRecord};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One leg of the ad hoc strategy simulation: take rows on `side` whose
/// classification is in `classifications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationLeg {
    pub side: OrderSide,
    pub classifications: BTreeSet<String>,
}

impl SimulationLeg {
    pub fn new<I, S>(side: OrderSide, classifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            side,
            classifications: classifications.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, row: &TradeRecord) -> bool {
        row.side == self.side && self.classifications.contains(&row.classification)
    }
}

/// A stateless calculator for deriving aggregate metrics from trade rows.
///
/// Every operation takes the (already filtered) rows and a grouping key and
/// returns a `BTreeMap` from group value to derived record. The sorted key
/// order of the map is also the documented tie-break order for the
/// best-by-metric selectors.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headline figures over the full filtered row-set.
    pub fn overview(&self, rows: &[TradeRecord]) -> Result<OverviewSummary, AnalyticsError> {
        if rows.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "overview requires at least one row".to_string(),
            ));
        }
        debug!(rows = rows.len(), "computing overview summary");

        let total_trades = rows.len();
        let total_pnl: Decimal = rows.iter().map(|r| r.closed_pnl).sum();
        let total_volume: Decimal = rows.iter().map(|r| r.size_usd).sum();
        let wins = rows.iter().filter(|r| r.is_win()).count();
        let win_rate_pct =
            Decimal::from(wins) / Decimal::from(total_trades) * Decimal::from(100);
        let avg_trade_size = total_volume / Decimal::from(total_trades);

        // min/max are defined because the slice is non-empty.
        let first_date = rows.iter().map(|r| r.date).min().unwrap_or_default();
        let last_date = rows.iter().map(|r| r.date).max().unwrap_or_default();

        let mut by_classification: BTreeMap<&str, usize> = BTreeMap::new();
        for row in rows {
            *by_classification.entry(row.classification.as_str()).or_default() += 1;
        }
        let most_active_classification = max_count_key(&by_classification)
            .map(|k| k.to_string())
            .unwrap_or_default();

        let mut by_side: BTreeMap<OrderSide, usize> = BTreeMap::new();
        for row in rows {
            *by_side.entry(row.side).or_default() += 1;
        }
        let preferred_side = max_count_key(&by_side).copied().unwrap_or(OrderSide::Buy);

        Ok(OverviewSummary {
            total_trades,
            total_pnl,
            win_rate_pct,
            total_volume,
            avg_trade_size,
            first_date,
            last_date,
            most_active_classification,
            preferred_side,
        })
    }

    /// PnL/win-rate/volume/ROI per sentiment classification.
    pub fn performance_by_classification(
        &self,
        rows: &[TradeRecord],
    ) -> BTreeMap<String, GroupPerformance> {
        self.performance_by_key(rows, |r| r.classification.clone())
    }

    /// The same metrics grouped by the raw greed/fear index value, plus the
    /// average fill price at each value.
    pub fn performance_by_value(&self, rows: &[TradeRecord]) -> BTreeMap<u8, ValuePerformance> {
        let grouped = group_by(rows, |r| r.value);
        grouped
            .into_iter()
            .map(|(value, group)| {
                let avg_price = mean(group.iter().map(|r| r.execution_price));
                (
                    value,
                    ValuePerformance {
                        performance: aggregate_group(&group),
                        avg_price,
                    },
                )
            })
            .collect()
    }

    /// Per-direction-label performance (e.g. "Open Long", "Close Short").
    pub fn performance_by_direction(
        &self,
        rows: &[TradeRecord],
    ) -> BTreeMap<String, GroupPerformance> {
        self.performance_by_key(rows, |r| r.direction.clone())
    }

    /// Market-versus-limit performance, derived from the `crossed` flag.
    pub fn performance_by_order_kind(
        &self,
        rows: &[TradeRecord],
    ) -> BTreeMap<OrderKind, GroupPerformance> {
        self.performance_by_key(rows, |r| r.order_kind())
    }

    fn performance_by_key<K: Ord>(
        &self,
        rows: &[TradeRecord],
        key: impl Fn(&TradeRecord) -> K,
    ) -> BTreeMap<K, GroupPerformance> {
        group_by(rows, key)
            .into_iter()
            .map(|(k, group)| (k, aggregate_group(&group)))
            .collect()
    }

    /// ROI per classification, with zero-denominator groups omitted rather
    /// than carried as `None`.
    pub fn roi_by_classification(&self, rows: &[TradeRecord]) -> BTreeMap<String, Decimal> {
        self.performance_by_classification(rows)
            .into_iter()
            .filter_map(|(k, perf)| perf.roi_pct.map(|roi| (k, roi)))
            .collect()
    }

    /// Win rate per classification. Groups only exist for observed rows, so
    /// every entry is defined.
    pub fn win_rate_by_classification(&self, rows: &[TradeRecord]) -> BTreeMap<String, Decimal> {
        self.performance_by_classification(rows)
            .into_iter()
            .map(|(k, perf)| (k, perf.win_rate_pct))
            .collect()
    }

    /// The (order kind, classification) breakdown behind the order-type
    /// report: PnL, win rate, and average fee per cell.
    pub fn order_kind_breakdown(
        &self,
        rows: &[TradeRecord],
    ) -> BTreeMap<OrderKind, BTreeMap<String, OrderKindCell>> {
        let mut out: BTreeMap<OrderKind, BTreeMap<String, OrderKindCell>> = BTreeMap::new();
        for (kind, by_class) in group_by(rows, |r| r.order_kind()) {
            let cells = group_by(by_class.iter().copied(), |r| r.classification.clone())
                .into_iter()
                .map(|(class, group)| {
                    let perf = aggregate_group(&group);
                    let avg_fee = mean(group.iter().map(|r| r.fee));
                    (
                        class,
                        OrderKindCell {
                            total_pnl: perf.total_pnl,
                            avg_pnl: perf.avg_pnl,
                            trade_count: perf.trade_count,
                            win_rate_pct: perf.win_rate_pct,
                            avg_fee,
                        },
                    )
                })
                .collect();
            out.insert(kind, cells);
        }
        out
    }

    /// Price statistics (mean/std/min/max/median/CV) per classification.
    pub fn price_stats_by_classification(
        &self,
        rows: &[TradeRecord],
    ) -> Result<BTreeMap<String, PriceStats>, AnalyticsError> {
        group_by(rows, |r| r.classification.clone())
            .into_iter()
            .map(|(class, group)| {
                let prices: Vec<Decimal> = group.iter().map(|r| r.execution_price).collect();
                Ok((class, price_stats(&prices)?))
            })
            .collect()
    }

    /// Buy-versus-sell comparison per classification. The spread is only
    /// defined for classifications that saw both sides.
    pub fn buy_sell_by_classification(
        &self,
        rows: &[TradeRecord],
    ) -> BTreeMap<String, BuySellBreakdown> {
        group_by(rows, |r| r.classification.clone())
            .into_iter()
            .map(|(class, group)| {
                let buys: Vec<&TradeRecord> =
                    group.iter().copied().filter(|r| r.side == OrderSide::Buy).collect();
                let sells: Vec<&TradeRecord> =
                    group.iter().copied().filter(|r| r.side == OrderSide::Sell).collect();

                let buy_avg_price = mean_opt(buys.iter().map(|r| r.execution_price));
                let sell_avg_price = mean_opt(sells.iter().map(|r| r.execution_price));
                let spread = match (buy_avg_price, sell_avg_price) {
                    (Some(buy), Some(sell)) => Some(sell - buy),
                    _ => None,
                };

                (
                    class,
                    BuySellBreakdown {
                        buy_count: buys.len(),
                        sell_count: sells.len(),
                        buy_volume: buys.iter().map(|r| r.size_usd).sum(),
                        sell_volume: sells.iter().map(|r| r.size_usd).sum(),
                        buy_tokens: buys.iter().map(|r| r.size_tokens).sum(),
                        sell_tokens: sells.iter().map(|r| r.size_tokens).sum(),
                        buy_pnl: buys.iter().map(|r| r.closed_pnl).sum(),
                        sell_pnl: sells.iter().map(|r| r.closed_pnl).sum(),
                        buy_avg_price,
                        sell_avg_price,
                        spread,
                    },
                )
            })
            .collect()
    }

    /// Partitions the rows into long/short cohorts by direction label and
    /// aggregates PnL and win rate per cohort.
    pub fn direction_split(&self, rows: &[TradeRecord]) -> DirectionSplit {
        let cohort = |wanted: PositionCohort| -> Option<CohortPerformance> {
            let members: Vec<&TradeRecord> = rows
                .iter()
                .filter(|r| r.cohort() == Some(wanted))
                .collect();
            if members.is_empty() {
                return None;
            }
            let total_pnl = members.iter().map(|r| r.closed_pnl).sum();
            let wins = members.iter().filter(|r| r.is_win()).count();
            Some(CohortPerformance {
                total_pnl,
                trade_count: members.len(),
                win_rate_pct: Decimal::from(wins) / Decimal::from(members.len())
                    * Decimal::from(100),
            })
        };

        DirectionSplit {
            long: cohort(PositionCohort::Long),
            short: cohort(PositionCohort::Short),
        }
    }

    /// How often each direction label occurs.
    pub fn direction_frequency(&self, rows: &[TradeRecord]) -> BTreeMap<String, usize> {
        let mut out = BTreeMap::new();
        for row in rows {
            *out.entry(row.direction.clone()).or_default() += 1;
        }
        out
    }

    /// Simulates the two-leg entry/exit strategy: mean fill price of each
    /// leg, their difference, and the difference relative to the entry mean.
    pub fn simulate_strategy(
        &self,
        rows: &[TradeRecord],
        entry: &SimulationLeg,
        exit: &SimulationLeg,
    ) -> Result<StrategySimulation, AnalyticsError> {
        let entry_prices: Vec<Decimal> = rows
            .iter()
            .filter(|r| entry.matches(r))
            .map(|r| r.execution_price)
            .collect();
        let exit_prices: Vec<Decimal> = rows
            .iter()
            .filter(|r| exit.matches(r))
            .map(|r| r.execution_price)
            .collect();

        if entry_prices.is_empty() || exit_prices.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "insufficient data for simulation with current filters".to_string(),
            ));
        }

        let avg_entry_price = mean(entry_prices.iter().copied());
        let avg_exit_price = mean(exit_prices.iter().copied());
        if avg_entry_price == Decimal::ZERO {
            return Err(AnalyticsError::NotEnoughData(
                "entry leg has a zero average price".to_string(),
            ));
        }

        let potential_profit = avg_exit_price - avg_entry_price;
        Ok(StrategySimulation {
            entry_trades: entry_prices.len(),
            exit_trades: exit_prices.len(),
            avg_entry_price,
            avg_exit_price,
            potential_profit,
            roi_pct: potential_profit / avg_entry_price * Decimal::from(100),
        })
    }
}

// ==============================================================================
// Ranking helpers
// ==============================================================================

/// Picks the key with the maximum metric. Keys whose metric is undefined
/// (`None`) are never selected; ties resolve to the first key in the map's
/// sorted order because only strictly greater values replace the leader.
pub fn best_by<'a, K: Ord, V>(
    map: &'a BTreeMap<K, V>,
    metric: impl Fn(&V) -> Option<Decimal>,
) -> Option<(&'a K, Decimal)> {
    let mut best: Option<(&K, Decimal)> = None;
    for (key, value) in map {
        let Some(m) = metric(value) else { continue };
        match best {
            Some((_, current)) if m <= current => {}
            _ => best = Some((key, m)),
        }
    }
    best
}

fn max_count_key<K: Ord>(counts: &BTreeMap<K, usize>) -> Option<&K> {
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in counts {
        match best {
            Some((_, current)) if count <= current => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(k, _)| k)
}

// ==============================================================================
// Aggregation primitives
// ==============================================================================

fn group_by<'a, K: Ord>(
    rows: impl IntoIterator<Item = &'a TradeRecord>,
    key: impl Fn(&TradeRecord) -> K,
) -> BTreeMap<K, Vec<&'a TradeRecord>> {
    let mut groups: BTreeMap<K, Vec<&TradeRecord>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
}

/// Aggregates one non-empty group into its derived record.
fn aggregate_group(group: &[&TradeRecord]) -> GroupPerformance {
    let trade_count = group.len();
    let total_pnl: Decimal = group.iter().map(|r| r.closed_pnl).sum();
    let total_volume: Decimal = group.iter().map(|r| r.size_usd).sum();
    let wins = group.iter().filter(|r| r.is_win()).count();

    let roi_pct = if total_volume > Decimal::ZERO {
        Some(total_pnl / total_volume * Decimal::from(100))
    } else {
        None
    };

    GroupPerformance {
        total_pnl,
        avg_pnl: total_pnl / Decimal::from(trade_count),
        trade_count,
        total_volume,
        win_rate_pct: Decimal::from(wins) / Decimal::from(trade_count) * Decimal::from(100),
        roi_pct,
    }
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut count = 0u64;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

fn mean_opt(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let collected: Vec<Decimal> = values.collect();
    if collected.is_empty() {
        None
    } else {
        Some(mean(collected.into_iter()))
    }
}

fn price_stats(prices: &[Decimal]) -> Result<PriceStats, AnalyticsError> {
    let n = Decimal::from(prices.len());
    let mean_price = mean(prices.iter().copied());
    let variance: Decimal = prices
        .iter()
        .map(|p| (*p - mean_price) * (*p - mean_price))
        .sum::<Decimal>()
        / n;
    let std_dev = variance.sqrt().ok_or_else(|| {
        AnalyticsError::InternalError("failed to take square root of variance".to_string())
    })?;

    let mut sorted = prices.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / Decimal::from(2)
    } else {
        sorted[mid]
    };

    let cv = if mean_price == Decimal::ZERO {
        None
    } else {
        Some(std_dev / mean_price)
    };

    Ok(PriceStats {
        mean: mean_price,
        std_dev,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        median,
        cv,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(
        classification: &str,
        side: OrderSide,
        closed_pnl: Decimal,
        size_usd: Decimal,
    ) -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            classification: classification.to_string(),
            value: 50,
            side,
            direction: match side {
                OrderSide::Buy => "Open Long".to_string(),
                OrderSide::Sell => "Close Long".to_string(),
            },
            execution_price: dec!(100),
            size_usd,
            size_tokens: dec!(0.1),
            closed_pnl,
            fee: dec!(0.05),
            crossed: false,
        }
    }

    /// The four-row scenario from the acceptance checklist: Fear and Greed,
    /// one winning and one losing trade each.
    fn four_row_scenario() -> Vec<TradeRecord> {
        vec![
            row("Fear", OrderSide::Buy, dec!(-5), dec!(100)),
            row("Fear", OrderSide::Sell, dec!(10), dec!(100)),
            row("Greed", OrderSide::Buy, dec!(20), dec!(100)),
            row("Greed", OrderSide::Sell, dec!(-3), dec!(100)),
        ]
    }

    #[test]
    fn classification_performance_matches_hand_computation() {
        let engine = AnalyticsEngine::new();
        let perf = engine.performance_by_classification(&four_row_scenario());

        let fear = &perf["Fear"];
        assert_eq!(fear.total_pnl, dec!(5));
        assert_eq!(fear.win_rate_pct, dec!(50));
        assert_eq!(fear.roi_pct, Some(dec!(2.5)));
        assert_eq!(fear.trade_count, 2);

        let greed = &perf["Greed"];
        assert_eq!(greed.total_pnl, dec!(17));
        assert_eq!(greed.win_rate_pct, dec!(50));
        assert_eq!(greed.roi_pct, Some(dec!(8.5)));
    }

    #[test]
    fn best_roi_selects_greed() {
        let engine = AnalyticsEngine::new();
        let perf = engine.performance_by_classification(&four_row_scenario());
        let (best, roi) = best_by(&perf, |p| p.roi_pct).unwrap();
        assert_eq!(best, "Greed");
        assert_eq!(roi, dec!(8.5));
    }

    #[test]
    fn best_selector_is_deterministic_under_ties() {
        let engine = AnalyticsEngine::new();
        let rows = four_row_scenario();
        // Win rate is 50% for both groups; the tie must go to the first key
        // in sorted order, every time.
        for _ in 0..10 {
            let perf = engine.performance_by_classification(&rows);
            let (best, _) = best_by(&perf, |p| Some(p.win_rate_pct)).unwrap();
            assert_eq!(best, "Fear");
        }
    }

    #[test]
    fn zero_volume_group_is_omitted_from_roi() {
        let engine = AnalyticsEngine::new();
        let rows = vec![
            row("Fear", OrderSide::Buy, dec!(3), dec!(0)),
            row("Fear", OrderSide::Sell, dec!(-1), dec!(0)),
            row("Greed", OrderSide::Buy, dec!(4), dec!(50)),
        ];

        let perf = engine.performance_by_classification(&rows);
        assert_eq!(perf["Fear"].roi_pct, None);

        let roi = engine.roi_by_classification(&rows);
        assert!(!roi.contains_key("Fear"));
        assert_eq!(roi["Greed"], dec!(8));

        // The ranking must never land on the undefined group even though
        // its PnL-based metric would not exist to compare.
        let (best, _) = best_by(&perf, |p| p.roi_pct).unwrap();
        assert_eq!(best, "Greed");
    }

    #[test]
    fn win_rate_is_always_within_bounds() {
        let engine = AnalyticsEngine::new();
        let rows = vec![
            row("Fear", OrderSide::Buy, dec!(1), dec!(10)),
            row("Fear", OrderSide::Buy, dec!(2), dec!(10)),
            row("Greed", OrderSide::Sell, dec!(-2), dec!(10)),
        ];
        for perf in engine.performance_by_classification(&rows).values() {
            assert!(perf.win_rate_pct >= Decimal::ZERO);
            assert!(perf.win_rate_pct <= dec!(100));
        }
    }

    #[test]
    fn overview_summarizes_the_filtered_rows() {
        let engine = AnalyticsEngine::new();
        let mut rows = four_row_scenario();
        rows.push(row("Fear", OrderSide::Buy, dec!(1), dec!(100)));
        let overview = engine.overview(&rows).unwrap();

        assert_eq!(overview.total_trades, 5);
        assert_eq!(overview.total_pnl, dec!(23));
        assert_eq!(overview.total_volume, dec!(500));
        assert_eq!(overview.most_active_classification, "Fear");
        assert_eq!(overview.preferred_side, OrderSide::Buy);
        assert_eq!(overview.win_rate_pct, dec!(60));
    }

    #[test]
    fn overview_of_no_rows_is_not_enough_data() {
        let engine = AnalyticsEngine::new();
        assert!(matches!(
            engine.overview(&[]),
            Err(AnalyticsError::NotEnoughData(_))
        ));
    }

    #[test]
    fn price_stats_cover_the_descriptive_set() {
        let engine = AnalyticsEngine::new();
        let mut rows = Vec::new();
        for price in [dec!(10), dec!(20), dec!(30), dec!(40)] {
            let mut r = row("Fear", OrderSide::Buy, dec!(1), dec!(10));
            r.execution_price = price;
            rows.push(r);
        }

        let stats = engine.price_stats_by_classification(&rows).unwrap();
        let fear = &stats["Fear"];
        assert_eq!(fear.mean, dec!(25));
        assert_eq!(fear.min, dec!(10));
        assert_eq!(fear.max, dec!(40));
        assert_eq!(fear.median, dec!(25));
        // Population std dev of {10,20,30,40} is sqrt(125) ~ 11.1803.
        let expected = dec!(125).sqrt().unwrap();
        assert!((fear.std_dev - expected).abs() < dec!(0.0001));
        let cv = fear.cv.unwrap();
        assert!((cv - expected / dec!(25)).abs() < dec!(0.0001));
    }

    #[test]
    fn cv_is_undefined_for_zero_mean() {
        let engine = AnalyticsEngine::new();
        let mut r = row("Fear", OrderSide::Buy, dec!(1), dec!(10));
        r.execution_price = Decimal::ZERO;
        let stats = engine.price_stats_by_classification(&[r]).unwrap();
        assert_eq!(stats["Fear"].cv, None);
    }

    #[test]
    fn spread_requires_both_sides() {
        let engine = AnalyticsEngine::new();
        let mut rows = vec![
            row("Fear", OrderSide::Buy, dec!(1), dec!(10)),
            row("Fear", OrderSide::Sell, dec!(1), dec!(10)),
            row("Greed", OrderSide::Buy, dec!(1), dec!(10)),
        ];
        rows[0].execution_price = dec!(90);
        rows[1].execution_price = dec!(110);

        let breakdown = engine.buy_sell_by_classification(&rows);
        assert_eq!(breakdown["Fear"].spread, Some(dec!(20)));
        assert_eq!(breakdown["Fear"].buy_pnl, dec!(1));
        assert_eq!(breakdown["Fear"].buy_tokens, dec!(0.1));
        // Greed only saw buys, so its spread is undefined.
        assert_eq!(breakdown["Greed"].spread, None);
        assert_eq!(breakdown["Greed"].sell_avg_price, None);
        assert_eq!(breakdown["Greed"].sell_pnl, Decimal::ZERO);
    }

    #[test]
    fn direction_split_partitions_cohorts() {
        let engine = AnalyticsEngine::new();
        let mut rows = vec![
            row("Fear", OrderSide::Buy, dec!(5), dec!(10)),
            row("Fear", OrderSide::Buy, dec!(-2), dec!(10)),
            row("Greed", OrderSide::Sell, dec!(7), dec!(10)),
        ];
        rows[2].direction = "Open Short".to_string();

        let split = engine.direction_split(&rows);
        let long = split.long.unwrap();
        assert_eq!(long.trade_count, 2);
        assert_eq!(long.total_pnl, dec!(3));
        assert_eq!(long.win_rate_pct, dec!(50));

        let short = split.short.unwrap();
        assert_eq!(short.trade_count, 1);
        assert_eq!(short.total_pnl, dec!(7));
        assert_eq!(short.win_rate_pct, dec!(100));
    }

    #[test]
    fn direction_split_with_one_empty_cohort() {
        let engine = AnalyticsEngine::new();
        let rows = vec![row("Fear", OrderSide::Buy, dec!(5), dec!(10))];
        let split = engine.direction_split(&rows);
        assert!(split.long.is_some());
        assert!(split.short.is_none());
    }

    #[test]
    fn unknown_direction_labels_belong_to_no_cohort() {
        let engine = AnalyticsEngine::new();
        let mut r = row("Fear", OrderSide::Buy, dec!(5), dec!(10));
        r.direction = "Liquidation".to_string();
        let split = engine.direction_split(&[r]);
        assert!(split.long.is_none());
        assert!(split.short.is_none());
    }

    #[test]
    fn order_kind_breakdown_tracks_fees() {
        let engine = AnalyticsEngine::new();
        let mut rows = vec![
            row("Fear", OrderSide::Buy, dec!(5), dec!(10)),
            row("Fear", OrderSide::Buy, dec!(-1), dec!(10)),
        ];
        rows[0].crossed = true;
        rows[0].fee = dec!(0.30);
        rows[1].fee = dec!(0.10);

        let breakdown = engine.order_kind_breakdown(&rows);
        assert_eq!(breakdown[&OrderKind::Market]["Fear"].avg_fee, dec!(0.30));
        assert_eq!(breakdown[&OrderKind::Limit]["Fear"].avg_fee, dec!(0.10));
        assert_eq!(breakdown[&OrderKind::Market]["Fear"].win_rate_pct, dec!(100));
    }

    #[test]
    fn simulation_reports_profit_and_roi() {
        let engine = AnalyticsEngine::new();
        let mut rows = vec![
            row("Neutral", OrderSide::Buy, dec!(0), dec!(10)),
            row("Greed", OrderSide::Sell, dec!(0), dec!(10)),
            row("Extreme Greed", OrderSide::Sell, dec!(0), dec!(10)),
        ];
        rows[0].execution_price = dec!(100);
        rows[1].execution_price = dec!(115);
        rows[2].execution_price = dec!(125);

        let entry = SimulationLeg::new(OrderSide::Buy, ["Neutral"]);
        let exit = SimulationLeg::new(OrderSide::Sell, ["Greed", "Extreme Greed"]);
        let sim = engine.simulate_strategy(&rows, &entry, &exit).unwrap();

        assert_eq!(sim.entry_trades, 1);
        assert_eq!(sim.exit_trades, 2);
        assert_eq!(sim.avg_entry_price, dec!(100));
        assert_eq!(sim.avg_exit_price, dec!(120));
        assert_eq!(sim.potential_profit, dec!(20));
        assert_eq!(sim.roi_pct, dec!(20));
    }

    #[test]
    fn simulation_with_an_empty_leg_is_insufficient_data() {
        let engine = AnalyticsEngine::new();
        let rows = vec![row("Neutral", OrderSide::Buy, dec!(0), dec!(10))];
        let entry = SimulationLeg::new(OrderSide::Buy, ["Neutral"]);
        let exit = SimulationLeg::new(OrderSide::Sell, ["Greed"]);
        let err = engine.simulate_strategy(&rows, &entry, &exit).unwrap_err();
        assert!(matches!(err, AnalyticsError::NotEnoughData(_)));
        assert!(err.to_string().contains("insufficient data"));
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let engine = AnalyticsEngine::new();
        let rows = four_row_scenario();
        let first = engine.performance_by_classification(&rows);
        let second = engine.performance_by_classification(&rows);
        assert_eq!(first, second);
    }
}
