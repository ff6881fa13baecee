use core_types::TradeRecord;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// The numeric columns the correlation matrix is computed over, in matrix
/// order.
pub const CORRELATION_COLUMNS: [&str; 4] =
    ["value", "closed_pnl", "execution_price", "size_usd"];

/// Pearson correlation over the numeric columns of the full filtered
/// row-set. Correlation is a scale-free statistic, so it is computed in
/// `f64` rather than fixed-point decimals.
///
/// A cell is defined only when both columns have at least two rows and
/// non-zero variance; undefined cells stay `None` instead of propagating
/// NaN into display or ranking logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    cells: [[Option<f64>; 4]; 4],
}

impl CorrelationMatrix {
    /// Computes the matrix over `rows`. The diagonal is 1 for any column
    /// with non-zero variance.
    pub fn compute(rows: &[TradeRecord]) -> Self {
        let columns = extract_columns(rows);
        let mut cells = [[None; 4]; 4];
        for i in 0..4 {
            for j in 0..=i {
                let r = pearson(&columns[i], &columns[j]);
                cells[i][j] = r;
                cells[j][i] = r;
            }
        }
        Self { cells }
    }

    pub fn column_names(&self) -> &'static [&'static str; 4] {
        &CORRELATION_COLUMNS
    }

    /// Correlation between two named columns, `None` for unknown names or
    /// undefined cells.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = CORRELATION_COLUMNS.iter().position(|c| *c == a)?;
        let j = CORRELATION_COLUMNS.iter().position(|c| *c == b)?;
        self.cells[i][j]
    }

    pub fn cells(&self) -> &[[Option<f64>; 4]; 4] {
        &self.cells
    }
}

fn extract_columns(rows: &[TradeRecord]) -> [Vec<f64>; 4] {
    let mut value = Vec::with_capacity(rows.len());
    let mut closed_pnl = Vec::with_capacity(rows.len());
    let mut execution_price = Vec::with_capacity(rows.len());
    let mut size_usd = Vec::with_capacity(rows.len());
    for row in rows {
        value.push(f64::from(row.value));
        closed_pnl.push(row.closed_pnl.to_f64().unwrap_or(0.0));
        execution_price.push(row.execution_price.to_f64().unwrap_or(0.0));
        size_usd.push(row.size_usd.to_f64().unwrap_or(0.0));
    }
    [value, closed_pnl, execution_price, size_usd]
}

/// Pearson correlation coefficient, `None` when fewer than two samples or
/// either series has zero variance.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }

    let n_f = n as f64;
    let mean_x = x.iter().sum::<f64>() / n_f;
    let mean_y = y.iter().sum::<f64>() / n_f;

    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        ss_xy += dx * dy;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
    }

    if ss_xx.abs() < f64::EPSILON || ss_yy.abs() < f64::EPSILON {
        return None;
    }
    Some(ss_xy / (ss_xx * ss_yy).sqrt())
}
