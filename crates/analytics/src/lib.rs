//! # Sentilens Analytics Engine
//!
//! This crate derives descriptive statistics from a validated trade table,
//! conditioned on the greed/fear sentiment classification. It is the
//! computational core behind every report the dashboard can show.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   files, filters, or presentation. It depends only on `core-types`.
//! - **Stateless Calculation:** the `AnalyticsEngine` is a stateless
//!   calculator. Every operation takes a row slice and returns derived
//!   records; nothing is cached between calls, so re-running a report on
//!   the same rows is bit-identical.
//! - **Undefined means absent:** a metric with a zero denominator or an
//!   empty group is omitted (or `None`), never emitted as 0, NaN, or
//!   infinity. Ranking helpers skip undefined metrics entirely.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the main struct that contains the calculation logic.
//! - `report`: the aggregate record structs the engine produces.
//! - `correlation::CorrelationMatrix`: Pearson correlation over the numeric columns.
//! - `sample::sample_rows`: the seeded scatter-display sample (explicitly
//!   outside the deterministic aggregation contract).
//! - `AnalyticsError`: the specific error types returned from this crate.

pub mod correlation;
pub mod engine;
pub mod error;
pub mod report;
pub mod sample;

// Re-export the key components to create a clean, public-facing API.
pub use correlation::{CORRELATION_COLUMNS, CorrelationMatrix};
pub use engine::{AnalyticsEngine, SimulationLeg, best_by};
pub use error::AnalyticsError;
pub use report::{
    BuySellBreakdown, CohortPerformance, DirectionSplit, GroupPerformance, OrderKindCell,
    OverviewSummary, PriceStats, StrategySimulation, ValuePerformance,
};
pub use sample::sample_rows;
