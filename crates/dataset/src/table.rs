use chrono::NaiveDate;
use core_types::{OrderSide, TradeRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// A validated, immutable collection of trade rows in upload order.
///
/// The table is never mutated after load; `filter` returns a new table
/// holding only the matching rows so the source stays usable for the rest
/// of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeTable {
    rows: Vec<TradeRecord>,
}

impl TradeTable {
    pub fn new(rows: Vec<TradeRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TradeRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest trade date in the table, if any rows exist.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Distinct classification labels in first-seen order, for the shell's
    /// multi-select options.
    pub fn classifications(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            if seen.insert(row.classification.as_str()) {
                out.push(row.classification.clone());
            }
        }
        out
    }

    /// Distinct trade sides in first-seen order.
    pub fn sides(&self) -> Vec<OrderSide> {
        let mut out = Vec::new();
        for row in &self.rows {
            if !out.contains(&row.side) {
                out.push(row.side);
            }
        }
        out
    }

    /// Returns the subset of rows allowed by `selection`, preserving row
    /// order. The receiver is left untouched.
    pub fn filter(&self, selection: &FilterSelection) -> TradeTable {
        let rows: Vec<TradeRecord> = self
            .rows
            .iter()
            .filter(|row| selection.allows(row))
            .cloned()
            .collect();
        debug!(
            before = self.rows.len(),
            after = rows.len(),
            "applied classification/side filter"
        );
        TradeTable::new(rows)
    }
}

/// The user's classification/side multi-select. `None` on either axis means
/// "all observed values", the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub classifications: Option<BTreeSet<String>>,
    pub sides: Option<BTreeSet<OrderSide>>,
}

impl FilterSelection {
    /// Selects everything, the same as the default.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_classifications<I, S>(mut self, classifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classifications = Some(classifications.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sides<I>(mut self, sides: I) -> Self
    where
        I: IntoIterator<Item = OrderSide>,
    {
        self.sides = Some(sides.into_iter().collect());
        self
    }

    fn allows(&self, row: &TradeRecord) -> bool {
        let classification_ok = match &self.classifications {
            Some(set) => set.contains(&row.classification),
            None => true,
        };
        let side_ok = match &self.sides {
            Some(set) => set.contains(&row.side),
            None => true,
        };
        classification_ok && side_ok
    }
}
