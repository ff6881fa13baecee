use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use core_types::OrderSide;
use dataset::{FilterSelection, load_csv_path};
use reports::{Report, ReportBody, ReportKind, run_report};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

/// The main entry point for the Sentilens trade-sentiment analyzer.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentilens=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args),
        Commands::Validate(args) => handle_validate(args),
        Commands::Reports => handle_reports(),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Greed/fear sentiment analytics over a trade-history CSV export.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a report over a trade-history CSV file.
    Analyze(AnalyzeArgs),
    /// Load a CSV file and report its shape without running any analysis.
    Validate(ValidateArgs),
    /// List the available report types.
    Reports,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Path to the trade-history CSV file.
    #[arg(long)]
    file: PathBuf,

    /// The report to run (see `reports` for the list).
    #[arg(long, default_value = "overview")]
    report: String,

    /// Restrict the analysis to these classifications (repeatable).
    #[arg(long)]
    classification: Vec<String>,

    /// Restrict the analysis to these sides: BUY or SELL (repeatable).
    #[arg(long)]
    side: Vec<String>,

    /// Emit the report as JSON instead of rendered tables.
    #[arg(long)]
    json: bool,

    /// Optional TOML configuration file for sampling and strategy legs.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct ValidateArgs {
    /// Path to the trade-history CSV file.
    #[arg(long)]
    file: PathBuf,
}

// ==============================================================================
// Command handlers
// ==============================================================================

fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let kind: ReportKind = args.report.parse()?;
    let config = configuration::load_config(args.config.as_deref())
        .context("failed to load configuration")?;

    let table = load_csv_path(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    info!(rows = table.len(), "loaded trade history");

    let mut selection = FilterSelection::all();
    if !args.classification.is_empty() {
        selection = selection.with_classifications(args.classification.clone());
    }
    if !args.side.is_empty() {
        let sides = args
            .side
            .iter()
            .map(|s| s.parse::<OrderSide>())
            .collect::<Result<Vec<_>, _>>()?;
        selection = selection.with_sides(sides);
    }
    let filtered = table.filter(&selection);

    let report = run_report(kind, &filtered, &config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }
    Ok(())
}

fn handle_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let table = load_csv_path(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    println!("OK: {} rows", table.len());
    if let Some((first, last)) = table.date_range() {
        println!("Date range: {first} to {last}");
    }
    println!("Classifications: {}", table.classifications().join(", "));
    let sides: Vec<&str> = table.sides().iter().map(|s| s.as_str()).collect();
    println!("Sides: {}", sides.join(", "));
    Ok(())
}

fn handle_reports() -> anyhow::Result<()> {
    let mut table = new_table(vec!["Identifier", "Title"]);
    for kind in ReportKind::ALL {
        table.add_row(vec![kind.as_str(), kind.title()]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn render_report(report: &Report) {
    println!("=== {} ===", report.title);
    println!();

    match &report.body {
        ReportBody::Overview { summary } => {
            let mut table = new_table(vec!["Metric", "Value"]);
            table
                .add_row(vec![
                    Cell::new("Total Trades"),
                    Cell::new(summary.total_trades),
                ])
                .add_row(vec![
                    Cell::new("Total PnL"),
                    Cell::new(format!("${:.2}", summary.total_pnl)),
                ])
                .add_row(vec![
                    Cell::new("Win Rate"),
                    Cell::new(format!("{:.2}%", summary.win_rate_pct)),
                ])
                .add_row(vec![
                    Cell::new("Total Volume"),
                    Cell::new(format!("${:.2}", summary.total_volume)),
                ])
                .add_row(vec![
                    Cell::new("Avg Trade Size"),
                    Cell::new(format!("${:.2}", summary.avg_trade_size)),
                ])
                .add_row(vec![
                    Cell::new("First Trade"),
                    Cell::new(summary.first_date),
                ])
                .add_row(vec![Cell::new("Last Trade"), Cell::new(summary.last_date)]);
            println!("{table}");
        }
        ReportBody::PnlByClassification { performance } => {
            println!("{}", performance_table(performance.iter()));
        }
        ReportBody::BuySell { breakdown } => {
            let mut table = new_table(vec![
                "Classification",
                "Buys",
                "Sells",
                "Buy Volume",
                "Sell Volume",
                "Buy PnL",
                "Sell PnL",
                "Avg Buy Price",
                "Avg Sell Price",
                "Spread",
            ]);
            for (class, b) in breakdown {
                table.add_row(vec![
                    Cell::new(class),
                    Cell::new(b.buy_count),
                    Cell::new(b.sell_count),
                    Cell::new(format!("${:.2}", b.buy_volume)),
                    Cell::new(format!("${:.2}", b.sell_volume)),
                    Cell::new(format!("${:.2}", b.buy_pnl)),
                    Cell::new(format!("${:.2}", b.sell_pnl)),
                    Cell::new(fmt_opt_price(b.buy_avg_price)),
                    Cell::new(fmt_opt_price(b.sell_avg_price)),
                    Cell::new(fmt_opt_price(b.spread)),
                ]);
            }
            println!("{table}");
        }
        ReportBody::OrderType {
            performance,
            breakdown,
        } => {
            println!("{}", performance_table(performance.iter()));
            for (kind, cells) in breakdown {
                println!("\n{kind}s by classification:");
                let mut table = new_table(vec![
                    "Classification",
                    "Total PnL",
                    "Avg PnL",
                    "Trades",
                    "Win Rate",
                    "Avg Fee",
                ]);
                for (class, cell) in cells {
                    table.add_row(vec![
                        Cell::new(class),
                        Cell::new(format!("${:.2}", cell.total_pnl)),
                        Cell::new(format!("${:.2}", cell.avg_pnl)),
                        Cell::new(cell.trade_count),
                        Cell::new(format!("{:.2}%", cell.win_rate_pct)),
                        Cell::new(format!("${:.4}", cell.avg_fee)),
                    ]);
                }
                println!("{table}");
            }
        }
        ReportBody::ValueIndex {
            performance,
            correlation,
            scatter_sample,
        } => {
            let mut table = new_table(vec![
                "Index Value",
                "Total PnL",
                "Avg PnL",
                "Trades",
                "Win Rate",
                "ROI",
                "Avg Price",
            ]);
            for (value, v) in performance {
                table.add_row(vec![
                    Cell::new(value),
                    Cell::new(format!("${:.2}", v.performance.total_pnl)),
                    Cell::new(format!("${:.2}", v.performance.avg_pnl)),
                    Cell::new(v.performance.trade_count),
                    Cell::new(format!("{:.2}%", v.performance.win_rate_pct)),
                    Cell::new(fmt_opt_pct(v.performance.roi_pct)),
                    Cell::new(format!("${:.4}", v.avg_price)),
                ]);
            }
            println!("{table}");

            println!("\nCorrelation matrix:");
            let names = correlation.column_names();
            let mut header = vec![String::new()];
            header.extend(names.iter().map(|n| n.to_string()));
            let mut matrix = new_table(header.iter().map(String::as_str).collect());
            for a in names {
                let mut row = vec![Cell::new(a)];
                for b in names {
                    row.push(Cell::new(match correlation.get(a, b) {
                        Some(r) => format!("{r:.4}"),
                        None => "n/a".to_string(),
                    }));
                }
                matrix.add_row(row);
            }
            println!("{matrix}");
            println!("\nScatter sample: {} rows", scatter_sample.len());
        }
        ReportBody::Direction {
            performance,
            frequency,
            split,
        } => {
            println!("{}", performance_table(performance.iter()));

            println!("\nDirection frequency:");
            let mut table = new_table(vec!["Direction", "Trades"]);
            for (direction, count) in frequency {
                table.add_row(vec![Cell::new(direction), Cell::new(count)]);
            }
            println!("{table}");

            println!("\nLong vs Short:");
            let mut table = new_table(vec!["Cohort", "Total PnL", "Trades", "Win Rate"]);
            for (label, cohort) in [("Long", &split.long), ("Short", &split.short)] {
                if let Some(c) = cohort {
                    table.add_row(vec![
                        Cell::new(label),
                        Cell::new(format!("${:.2}", c.total_pnl)),
                        Cell::new(c.trade_count),
                        Cell::new(format!("{:.2}%", c.win_rate_pct)),
                    ]);
                }
            }
            println!("{table}");
        }
        ReportBody::Price { stats } => {
            let mut table = new_table(vec![
                "Classification",
                "Mean",
                "Std Dev",
                "Min",
                "Max",
                "Median",
                "CV",
            ]);
            for (class, s) in stats {
                table.add_row(vec![
                    Cell::new(class),
                    Cell::new(format!("${:.4}", s.mean)),
                    Cell::new(format!("${:.4}", s.std_dev)),
                    Cell::new(format!("${:.4}", s.min)),
                    Cell::new(format!("${:.4}", s.max)),
                    Cell::new(format!("${:.4}", s.median)),
                    Cell::new(match s.cv {
                        Some(cv) => format!("{cv:.4}"),
                        None => "n/a".to_string(),
                    }),
                ]);
            }
            println!("{table}");
        }
        ReportBody::StrategyRecommendations {
            matrix,
            rankings,
            simulation,
            playbook,
        } => {
            let mut table = new_table(vec![
                "Classification",
                "Total PnL",
                "Trades",
                "Win Rate",
                "ROI",
                "Avg Price",
                "Price CV",
            ]);
            for (class, row) in matrix {
                table.add_row(vec![
                    Cell::new(class),
                    Cell::new(format!("${:.2}", row.performance.total_pnl)),
                    Cell::new(row.performance.trade_count),
                    Cell::new(format!("{:.2}%", row.performance.win_rate_pct)),
                    Cell::new(fmt_opt_pct(row.performance.roi_pct)),
                    Cell::new(format!("${:.4}", row.avg_price)),
                    Cell::new(match row.price_cv {
                        Some(cv) => format!("{cv:.4}"),
                        None => "n/a".to_string(),
                    }),
                ]);
            }
            println!("{table}");

            println!("\nRankings:");
            let mut table = new_table(vec!["Category", "Classification"]);
            let rows: [(&str, Option<String>); 7] = [
                ("Best Total PnL", rankings.best_total_pnl.clone()),
                ("Best Win Rate", rankings.best_win_rate.clone()),
                ("Best ROI", rankings.best_roi.clone()),
                ("Most Active", rankings.most_active.clone()),
                ("Best Buy Period", rankings.best_buy_period.clone()),
                ("Best Sell Period", rankings.best_sell_period.clone()),
                (
                    "Preferred Order Type",
                    rankings.preferred_order_kind.map(|k| k.to_string()),
                ),
            ];
            for (category, pick) in rows {
                table.add_row(vec![
                    Cell::new(category),
                    Cell::new(pick.unwrap_or_else(|| "n/a".to_string())),
                ]);
            }
            println!("{table}");

            if let Some(sim) = simulation {
                println!("\nStrategy simulation:");
                println!(
                    "  entry: {} trades at avg ${:.4}",
                    sim.entry_trades, sim.avg_entry_price
                );
                println!(
                    "  exit:  {} trades at avg ${:.4}",
                    sim.exit_trades, sim.avg_exit_price
                );
                println!(
                    "  potential profit ${:.4} ({:.2}% ROI)",
                    sim.potential_profit, sim.roi_pct
                );
            }

            println!("\nPlaybook:\n{playbook}");
        }
    }

    if !report.insights.is_empty() {
        println!("\nKey insights:");
        for insight in &report.insights {
            println!("  - {insight}");
        }
    }
}

/// Renders the shared per-group performance columns for any key type.
fn performance_table<'a, K: std::fmt::Display + 'a>(
    groups: impl Iterator<Item = (K, &'a analytics::GroupPerformance)>,
) -> Table {
    let mut table = new_table(vec![
        "Group",
        "Total PnL",
        "Avg PnL",
        "Trades",
        "Volume",
        "Win Rate",
        "ROI",
    ]);
    for (key, perf) in groups {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(format!("${:.2}", perf.total_pnl)),
            Cell::new(format!("${:.2}", perf.avg_pnl)),
            Cell::new(perf.trade_count),
            Cell::new(format!("${:.2}", perf.total_volume)),
            Cell::new(format!("{:.2}%", perf.win_rate_pct)),
            Cell::new(fmt_opt_pct(perf.roi_pct)),
        ]);
    }
    table
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn fmt_opt_pct(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "n/a".to_string(),
    }
}

fn fmt_opt_price(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${v:.4}"),
        None => "n/a".to_string(),
    }
}
