use crate::error::ReportError;
use crate::kind::ReportKind;
use crate::output::{Rankings, Report, ReportBody, StrategyMatrixRow};
use analytics::{
    AnalyticsEngine, AnalyticsError, CorrelationMatrix, SimulationLeg, best_by, sample_rows,
};
use configuration::AnalysisConfig;
use core_types::{OrderKind, TradeRecord};
use dataset::TradeTable;
use rust_decimal::Decimal;
use tracing::info;

/// The static entry/exit/risk playbook shown on the strategy report. This
/// is copy, not a property of the data: the claims about which sentiment
/// phase to enter or exit in are never checked against the loaded table.
const STRATEGY_PLAYBOOK: &str = "\
Entry: buy when sentiment is Neutral for lower entry prices (mean-reversion \
setup); go long during Fear phases when buy-side interest is strong; prefer \
limit orders when they show better performance; focus on high-volume \
classifications for liquidity.
Exit: target Extreme Greed as the exit window with the highest average \
price; reduce longs or open shorts during Greed; watch win rates by \
classification after extreme sentiment spikes.
Risk: diversify across market conditions, set stops from historical \
volatility, and monitor the correlation between index values and PnL.";

/// Runs the named report over the (already filtered) table.
///
/// The empty-table check happens here, before any aggregation: filters that
/// exclude every row surface as `ReportError::EmptyResult`, never as a
/// zero-valued metric set.
pub fn run_report(
    kind: ReportKind,
    table: &TradeTable,
    config: &AnalysisConfig,
) -> Result<Report, ReportError> {
    if table.is_empty() {
        return Err(ReportError::EmptyResult);
    }
    info!(report = %kind, rows = table.len(), "running report");

    let engine = AnalyticsEngine::new();
    let rows = table.rows();
    let (body, insights) = match kind {
        ReportKind::Overview => overview(&engine, rows)?,
        ReportKind::PnlByClassification => pnl_by_classification(&engine, rows),
        ReportKind::BuySell => buy_sell(&engine, rows),
        ReportKind::OrderType => order_type(&engine, rows),
        ReportKind::ValueIndex => value_index(&engine, rows, config),
        ReportKind::Direction => direction(&engine, rows),
        ReportKind::Price => price(&engine, rows)?,
        ReportKind::StrategyRecommendations => strategy_recommendations(&engine, rows, config)?,
    };

    Ok(Report {
        kind,
        title: kind.title(),
        body,
        insights,
    })
}

fn overview(
    engine: &AnalyticsEngine,
    rows: &[TradeRecord],
) -> Result<(ReportBody, Vec<String>), ReportError> {
    let summary = engine.overview(rows)?;
    let insights = vec![
        format!(
            "Date range: {} to {}",
            summary.first_date, summary.last_date
        ),
        format!(
            "Most active classification: {} (preferred side: {})",
            summary.most_active_classification, summary.preferred_side
        ),
        format!("Average trade size: ${:.2}", summary.avg_trade_size),
    ];
    Ok((ReportBody::Overview { summary }, insights))
}

fn pnl_by_classification(
    engine: &AnalyticsEngine,
    rows: &[TradeRecord],
) -> (ReportBody, Vec<String>) {
    let performance = engine.performance_by_classification(rows);

    let mut insights = Vec::new();
    if let Some((best, pnl)) = best_by(&performance, |p| Some(p.total_pnl)) {
        insights.push(format!("Best Total PnL: {best} (${pnl:.2})"));
    }
    if let Some((best, roi)) = best_by(&performance, |p| p.roi_pct) {
        insights.push(format!("Best ROI: {best} ({roi:.2}%)"));
    }
    if let Some((best, rate)) = best_by(&performance, |p| Some(p.win_rate_pct)) {
        insights.push(format!("Highest Win Rate: {best} ({rate:.2}%)"));
    }

    (ReportBody::PnlByClassification { performance }, insights)
}

fn buy_sell(engine: &AnalyticsEngine, rows: &[TradeRecord]) -> (ReportBody, Vec<String>) {
    let breakdown = engine.buy_sell_by_classification(rows);

    let mut insights = Vec::new();
    // Lowest average BUY price is the best time to enter; negate the metric
    // so the shared max-selector picks the minimum.
    let best_buy = best_by(&breakdown, |b| b.buy_avg_price.map(|p| -p));
    let best_sell = best_by(&breakdown, |b| b.sell_avg_price);
    if let Some((class, negated)) = &best_buy {
        insights.push(format!("Best time to BUY: during '{class}' (avg ${:.4})", -negated));
    }
    if let Some((class, price)) = &best_sell {
        insights.push(format!("Best time to SELL: during '{class}' (avg ${price:.4})"));
    }
    if let (Some((_, negated)), Some((_, sell))) = (&best_buy, &best_sell) {
        insights.push(format!("Widest price spread: ${:.4}", sell - -negated));
    }

    (ReportBody::BuySell { breakdown }, insights)
}

fn order_type(engine: &AnalyticsEngine, rows: &[TradeRecord]) -> (ReportBody, Vec<String>) {
    let performance = engine.performance_by_order_kind(rows);
    let breakdown = engine.order_kind_breakdown(rows);

    let mut insights = Vec::new();
    for kind in [OrderKind::Market, OrderKind::Limit] {
        if let Some(perf) = performance.get(&kind) {
            insights.push(format!(
                "{kind} PnL: ${:.2} (win rate {:.2}%)",
                perf.total_pnl, perf.win_rate_pct
            ));
        }
    }
    if let Some((kind, _)) = best_by(&performance, |p| Some(p.total_pnl)) {
        insights.push(format!("Recommended: {kind}s"));
    }

    (
        ReportBody::OrderType {
            performance,
            breakdown,
        },
        insights,
    )
}

fn value_index(
    engine: &AnalyticsEngine,
    rows: &[TradeRecord],
    config: &AnalysisConfig,
) -> (ReportBody, Vec<String>) {
    let performance = engine.performance_by_value(rows);
    let correlation = CorrelationMatrix::compute(rows);
    let scatter_sample = sample_rows(
        rows,
        config.sampling.scatter_max_rows,
        config.sampling.seed,
    );

    let mut insights = Vec::new();
    if let Some((value, pnl)) = best_by(&performance, |v| Some(v.performance.total_pnl)) {
        insights.push(format!("Most profitable index value: {value} (${pnl:.2})"));
    }
    if let Some((value, rate)) = best_by(&performance, |v| Some(v.performance.win_rate_pct)) {
        insights.push(format!("Highest win-rate index value: {value} ({rate:.2}%)"));
    }
    match correlation.get("value", "closed_pnl") {
        Some(r) => insights.push(format!("Value-PnL correlation: {r:.4}")),
        None => insights.push("Value-PnL correlation: undefined for this selection".to_string()),
    }

    (
        ReportBody::ValueIndex {
            performance,
            correlation,
            scatter_sample,
        },
        insights,
    )
}

fn direction(engine: &AnalyticsEngine, rows: &[TradeRecord]) -> (ReportBody, Vec<String>) {
    let performance = engine.performance_by_direction(rows);
    let frequency = engine.direction_frequency(rows);
    let split = engine.direction_split(rows);

    let mut insights = Vec::new();
    if let Some(long) = &split.long {
        insights.push(format!(
            "Long cohort PnL: ${:.2} over {} trades (win rate {:.2}%)",
            long.total_pnl, long.trade_count, long.win_rate_pct
        ));
    }
    if let Some(short) = &split.short {
        insights.push(format!(
            "Short cohort PnL: ${:.2} over {} trades (win rate {:.2}%)",
            short.total_pnl, short.trade_count, short.win_rate_pct
        ));
    }
    match (&split.long, &split.short) {
        (Some(long), Some(short)) => {
            let recommended = if long.total_pnl >= short.total_pnl {
                "Long"
            } else {
                "Short"
            };
            insights.push(format!("Recommended cohort: {recommended}"));
        }
        (Some(_), None) => insights.push("Only long-cohort trades in this selection".to_string()),
        (None, Some(_)) => insights.push("Only short-cohort trades in this selection".to_string()),
        (None, None) => {}
    }

    (
        ReportBody::Direction {
            performance,
            frequency,
            split,
        },
        insights,
    )
}

fn price(
    engine: &AnalyticsEngine,
    rows: &[TradeRecord],
) -> Result<(ReportBody, Vec<String>), ReportError> {
    let stats = engine.price_stats_by_classification(rows)?;

    let mut insights = Vec::new();
    if let Some((class, mean)) = best_by(&stats, |s| Some(s.mean)) {
        insights.push(format!("Highest avg price: {class} (${mean:.4})"));
    }
    if let Some((class, negated)) = best_by(&stats, |s| Some(-s.mean)) {
        insights.push(format!("Lowest avg price: {class} (${:.4})", -negated));
    }
    if let Some((class, cv)) = best_by(&stats, |s| s.cv) {
        insights.push(format!("Most volatile: {class} (CV {cv:.4})"));
    }

    Ok((ReportBody::Price { stats }, insights))
}

fn strategy_recommendations(
    engine: &AnalyticsEngine,
    rows: &[TradeRecord],
    config: &AnalysisConfig,
) -> Result<(ReportBody, Vec<String>), ReportError> {
    let performance = engine.performance_by_classification(rows);
    let price_stats = engine.price_stats_by_classification(rows)?;
    let buy_sell = engine.buy_sell_by_classification(rows);
    let order_kinds = engine.performance_by_order_kind(rows);

    let matrix: std::collections::BTreeMap<String, StrategyMatrixRow> = performance
        .iter()
        .map(|(class, perf)| {
            let stats = &price_stats[class];
            (
                class.clone(),
                StrategyMatrixRow {
                    performance: perf.clone(),
                    avg_price: stats.mean,
                    price_cv: stats.cv,
                },
            )
        })
        .collect();

    let rankings = Rankings {
        best_total_pnl: best_by(&performance, |p| Some(p.total_pnl)).map(|(k, _)| k.clone()),
        best_win_rate: best_by(&performance, |p| Some(p.win_rate_pct)).map(|(k, _)| k.clone()),
        best_roi: best_by(&performance, |p| p.roi_pct).map(|(k, _)| k.clone()),
        most_active: best_by(&performance, |p| Some(Decimal::from(p.trade_count as u64)))
            .map(|(k, _)| k.clone()),
        best_buy_period: best_by(&buy_sell, |b| b.buy_avg_price.map(|p| -p))
            .map(|(k, _)| k.clone()),
        best_sell_period: best_by(&buy_sell, |b| b.sell_avg_price).map(|(k, _)| k.clone()),
        preferred_order_kind: best_by(&order_kinds, |p| Some(p.total_pnl)).map(|(k, _)| *k),
    };

    let mut insights = Vec::new();
    if let Some(best) = &rankings.best_total_pnl {
        insights.push(format!("Best Total PnL: {best}"));
    }
    if let Some(best) = &rankings.best_win_rate {
        insights.push(format!("Best Win Rate: {best}"));
    }
    if let Some(best) = &rankings.best_roi {
        insights.push(format!("Best ROI: {best}"));
    }
    if let Some(best) = &rankings.most_active {
        insights.push(format!("Most Active: {best}"));
    }
    if let Some(kind) = rankings.preferred_order_kind {
        insights.push(format!("Preferred orders: {kind}s"));
    }

    let entry = SimulationLeg::new(
        config.strategy.entry.side,
        config.strategy.entry.classifications.clone(),
    );
    let exit = SimulationLeg::new(
        config.strategy.exit.side,
        config.strategy.exit.classifications.clone(),
    );
    let simulation = match engine.simulate_strategy(rows, &entry, &exit) {
        Ok(sim) => {
            insights.push(format!(
                "Simulated entry ${:.4} / exit ${:.4}: potential profit ${:.4} ({:.2}% ROI)",
                sim.avg_entry_price, sim.avg_exit_price, sim.potential_profit, sim.roi_pct
            ));
            Some(sim)
        }
        Err(AnalyticsError::NotEnoughData(_)) => {
            insights.push(
                "Strategy simulation: insufficient data with current filters".to_string(),
            );
            None
        }
        Err(other) => return Err(other.into()),
    };

    Ok((
        ReportBody::StrategyRecommendations {
            matrix,
            rankings,
            simulation,
            playbook: STRATEGY_PLAYBOOK,
        },
        insights,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::OrderSide;
    use dataset::FilterSelection;
    use rust_decimal_macros::dec;

    fn row(
        classification: &str,
        side: OrderSide,
        pnl: Decimal,
        price: Decimal,
        value: u8,
    ) -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            classification: classification.to_string(),
            value,
            side,
            direction: match side {
                OrderSide::Buy => "Open Long".to_string(),
                OrderSide::Sell => "Close Long".to_string(),
            },
            execution_price: price,
            size_usd: dec!(100),
            size_tokens: dec!(0.1),
            closed_pnl: pnl,
            fee: dec!(0.05),
            crossed: false,
        }
    }

    fn table() -> TradeTable {
        TradeTable::new(vec![
            row("Fear", OrderSide::Buy, dec!(-5), dec!(95), 20),
            row("Fear", OrderSide::Sell, dec!(10), dec!(102), 25),
            row("Greed", OrderSide::Buy, dec!(20), dec!(110), 75),
            row("Greed", OrderSide::Sell, dec!(-3), dec!(118), 80),
            row("Neutral", OrderSide::Buy, dec!(2), dec!(100), 50),
        ])
    }

    #[test]
    fn empty_table_short_circuits_every_report() {
        let empty = TradeTable::new(vec![]);
        let config = AnalysisConfig::default();
        for kind in ReportKind::ALL {
            let err = run_report(kind, &empty, &config).unwrap_err();
            assert!(matches!(err, ReportError::EmptyResult), "{kind} did not short-circuit");
        }
    }

    #[test]
    fn filtered_to_nothing_is_an_empty_result_not_a_metric_set() {
        let table = table();
        let filtered = table.filter(&FilterSelection::all().with_classifications(["Extreme Fear"]));
        let err = run_report(ReportKind::Overview, &filtered, &AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(err, ReportError::EmptyResult));
    }

    #[test]
    fn every_report_kind_runs_on_a_populated_table() {
        let table = table();
        let config = AnalysisConfig::default();
        for kind in ReportKind::ALL {
            let report = run_report(kind, &table, &config).unwrap();
            assert_eq!(report.kind, kind);
            assert!(!report.insights.is_empty(), "{kind} produced no insights");
        }
    }

    #[test]
    fn pnl_report_names_the_best_roi_group() {
        let report = run_report(
            ReportKind::PnlByClassification,
            &table(),
            &AnalysisConfig::default(),
        )
        .unwrap();
        let ReportBody::PnlByClassification { performance } = &report.body else {
            panic!("wrong body");
        };
        assert_eq!(performance["Greed"].total_pnl, dec!(17));
        assert!(report.insights.iter().any(|i| i.contains("Best ROI: Greed")));
    }

    #[test]
    fn strategy_report_simulates_the_configured_legs() {
        let report = run_report(
            ReportKind::StrategyRecommendations,
            &table(),
            &AnalysisConfig::default(),
        )
        .unwrap();
        let ReportBody::StrategyRecommendations { simulation, .. } = &report.body else {
            panic!("wrong body");
        };
        // Entry: BUY during Neutral at 100. Exit: SELL during Greed at 118.
        let sim = simulation.as_ref().unwrap();
        assert_eq!(sim.avg_entry_price, dec!(100));
        assert_eq!(sim.avg_exit_price, dec!(118));
        assert_eq!(sim.roi_pct, dec!(18));
    }

    #[test]
    fn strategy_report_survives_an_unsimulatable_selection() {
        // Only Fear rows: both simulation legs are empty, the report still runs.
        let table = table();
        let filtered = table.filter(&FilterSelection::all().with_classifications(["Fear"]));
        let report = run_report(
            ReportKind::StrategyRecommendations,
            &filtered,
            &AnalysisConfig::default(),
        )
        .unwrap();
        let ReportBody::StrategyRecommendations { simulation, .. } = &report.body else {
            panic!("wrong body");
        };
        assert!(simulation.is_none());
        assert!(
            report
                .insights
                .iter()
                .any(|i| i.contains("insufficient data"))
        );
    }

    #[test]
    fn value_index_report_bounds_the_scatter_sample() {
        let mut config = AnalysisConfig::default();
        config.sampling.scatter_max_rows = 2;
        let report = run_report(ReportKind::ValueIndex, &table(), &config).unwrap();
        let ReportBody::ValueIndex { scatter_sample, .. } = &report.body else {
            panic!("wrong body");
        };
        assert_eq!(scatter_sample.len(), 2);
    }

    #[test]
    fn reports_serialize_for_the_presentation_layer() {
        let config = AnalysisConfig::default();
        let table = table();
        for kind in ReportKind::ALL {
            let report = run_report(kind, &table, &config).unwrap();
            let json = serde_json::to_string(&report).unwrap();
            assert!(json.contains(kind.as_str()));
        }
    }

    #[test]
    fn rerunning_a_report_is_idempotent() {
        let config = AnalysisConfig::default();
        let table = table();
        let a = run_report(ReportKind::PnlByClassification, &table, &config).unwrap();
        let b = run_report(ReportKind::PnlByClassification, &table, &config).unwrap();
        assert_eq!(
            serde_json::to_string(&a.body).unwrap(),
            serde_json::to_string(&b.body).unwrap()
        );
    }
}
