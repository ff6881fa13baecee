use crate::error::DatasetError;
use crate::table::TradeTable;
use chrono::NaiveDate;
use core_types::{OrderSide, TradeRecord};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// The exact column set an uploaded table must contain. Names are
/// case-sensitive; additional columns are permitted and ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "date",
    "classification",
    "side",
    "closed_pnl",
    "size_usd",
    "execution_price",
    "crossed",
    "direction",
    "value",
];

/// Columns the loader reads when present but does not require. Absent
/// optional columns default to zero for every row.
const OPTIONAL_COLUMNS: [&str; 2] = ["size_tokens", "fee"];

/// Parses and validates an uploaded CSV byte stream into a `TradeTable`.
///
/// Validation happens in two passes: the header row is checked against the
/// full required-column set (reporting every missing column, not just the
/// first), then each row is coerced field by field. Any failure rejects the
/// whole row-set; no partial table is ever produced.
pub fn load_csv<R: Read>(reader: R) -> Result<TradeTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name, idx))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !columns.contains_key(*name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::Schema { missing });
    }

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        // Row numbers in error messages are 1-based and count data rows.
        let row_number = idx + 1;
        let record = record?;
        rows.push(parse_row(&record, &columns, row_number)?);
    }

    info!(rows = rows.len(), "trade table loaded and validated");
    Ok(TradeTable::new(rows))
}

/// Convenience wrapper around [`load_csv`] for on-disk files.
pub fn load_csv_path(path: &Path) -> Result<TradeTable, DatasetError> {
    debug!(path = %path.display(), "loading trade table");
    let file = std::fs::File::open(path)?;
    load_csv(file)
}

fn parse_row(
    record: &StringRecord,
    columns: &HashMap<&str, usize>,
    row: usize,
) -> Result<TradeRecord, DatasetError> {
    let field = |column: &'static str| -> &str {
        // Required columns were verified up front; a short record yields "".
        columns
            .get(column)
            .and_then(|&idx| record.get(idx))
            .unwrap_or("")
    };
    let optional_field = |column: &'static str| -> Option<&str> {
        if !OPTIONAL_COLUMNS.contains(&column) {
            return None;
        }
        columns.get(column).and_then(|&idx| record.get(idx))
    };

    let date = parse_date(field("date"), row)?;
    let classification = field("classification").to_string();
    let side: OrderSide =
        field("side")
            .parse()
            .map_err(|_| DatasetError::InvalidField {
                row,
                column: "side",
                message: format!("expected BUY or SELL, got '{}'", field("side")),
            })?;
    let direction = field("direction").to_string();
    let value = parse_index_value(field("value"), row)?;
    let crossed = parse_crossed(field("crossed"), row)?;

    let execution_price = parse_decimal(field("execution_price"), "execution_price", row)?;
    let closed_pnl = parse_decimal(field("closed_pnl"), "closed_pnl", row)?;
    let size_usd = parse_non_negative(field("size_usd"), "size_usd", row)?;
    let size_tokens = match optional_field("size_tokens") {
        Some(raw) => parse_non_negative(raw, "size_tokens", row)?,
        None => Decimal::ZERO,
    };
    let fee = match optional_field("fee") {
        Some(raw) => parse_non_negative(raw, "fee", row)?,
        None => Decimal::ZERO,
    };

    Ok(TradeRecord {
        date,
        classification,
        value,
        side,
        direction,
        execution_price,
        size_usd,
        size_tokens,
        closed_pnl,
        fee,
        crossed,
    })
}

fn parse_date(raw: &str, row: usize) -> Result<NaiveDate, DatasetError> {
    raw.parse::<NaiveDate>()
        .map_err(|e| DatasetError::InvalidField {
            row,
            column: "date",
            message: format!("'{raw}' is not a calendar date: {e}"),
        })
}

fn parse_index_value(raw: &str, row: usize) -> Result<u8, DatasetError> {
    let value: u8 = raw.parse().map_err(|_| DatasetError::InvalidField {
        row,
        column: "value",
        message: format!("'{raw}' is not an integer in 0..=100"),
    })?;
    if value > 100 {
        return Err(DatasetError::InvalidField {
            row,
            column: "value",
            message: format!("index value {value} is outside 0..=100"),
        });
    }
    Ok(value)
}

fn parse_crossed(raw: &str, row: usize) -> Result<bool, DatasetError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DatasetError::InvalidField {
            row,
            column: "crossed",
            message: format!("expected true or false, got '{raw}'"),
        }),
    }
}

fn parse_decimal(raw: &str, column: &'static str, row: usize) -> Result<Decimal, DatasetError> {
    raw.parse::<Decimal>()
        .map_err(|e| DatasetError::InvalidField {
            row,
            column,
            message: format!("'{raw}' is not numeric: {e}"),
        })
}

fn parse_non_negative(
    raw: &str,
    column: &'static str,
    row: usize,
) -> Result<Decimal, DatasetError> {
    let value = parse_decimal(raw, column, row)?;
    if value < Decimal::ZERO {
        return Err(DatasetError::InvalidField {
            row,
            column,
            message: format!("{value} must not be negative"),
        });
    }
    Ok(value)
}
