//! # Trade Dataset
//!
//! This crate owns the boundary between raw uploaded bytes and the typed,
//! validated trade table the rest of the system works on.
//!
//! ## Architectural Principles
//!
//! - **Validate before anything else:** `load_csv` refuses to hand out a
//!   table unless the exact required-column set is present and every row
//!   coerces cleanly. No aggregation ever sees a partially valid table.
//! - **Immutable tables:** a `TradeTable` is never mutated after load.
//!   Filtering produces a new view; the source table stays intact for the
//!   rest of the session.
//!
//! ## Public API
//!
//! - `load_csv` / `load_csv_path`: parse and validate an uploaded table.
//! - `TradeTable`: the validated, immutable row collection.
//! - `FilterSelection`: the classification/side multi-select filter.
//! - `DatasetError`: the specific error types returned from this crate.

pub mod error;
pub mod loader;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::{REQUIRED_COLUMNS, load_csv, load_csv_path};
pub use table::{FilterSelection, TradeTable};
