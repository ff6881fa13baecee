//! # Report Selector
//!
//! Maps the eight external report identifiers onto the aggregation calls
//! and key-insight narrative each report needs. This crate defines the
//! contract the presentation layer consumes: it never renders anything
//! itself, it only produces typed derived records plus insight lines.
//!
//! ## Architectural Principles
//!
//! - **Fixed dispatch:** report selection is an enum plus one pure handler
//!   per kind, not a conditional keyed on display labels. Adding a report
//!   means adding a variant and a handler, nothing else.
//! - **Empty in, notice out:** an empty filtered table short-circuits to
//!   `ReportError::EmptyResult` before any aggregation runs, so no report
//!   ever shows a computed-but-meaningless metric set.
//! - **Static copy stays copy:** the strategy playbook text is carried
//!   verbatim on the strategy-recommendations report and never derived
//!   from (or asserted against) the data.

pub mod error;
pub mod kind;
pub mod output;
pub mod runner;

// Re-export the key components to create a clean, public-facing API.
pub use error::ReportError;
pub use kind::ReportKind;
pub use output::{Rankings, Report, ReportBody, StrategyMatrixRow};
pub use runner::run_report;
