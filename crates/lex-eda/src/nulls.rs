//! Missing-value report.
//!
//! Only columns that actually contain nulls are listed, most-affected
//! first. A zero-row table yields an empty report: with no rows there is no
//! null to observe, so no percentage is ever divided by zero.

use crate::error::{EdaError, Result};
use crate::table::TableView;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One column's missing-value figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullReportRow {
    pub name: String,
    pub null_count: usize,
    /// `100 * null_count / row_count`, unrounded.
    pub null_percentage: f64,
}

/// Missing-value report for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullReport {
    pub row_count: usize,
    /// Columns with at least one null, by descending null count.
    pub rows: Vec<NullReportRow>,
}

impl NullReport {
    /// True when no column has missing values.
    pub fn is_clean(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_nulls(&self) -> usize {
        self.rows.iter().map(|row| row.null_count).sum()
    }
}

/// Report per-column null counts and percentages.
///
/// Columns without nulls are left out. Ties in null count keep table order.
pub fn report_nulls<T: TableView + ?Sized>(table: &T) -> Result<NullReport> {
    let row_count = table.row_count();
    let columns = table.column_info()?;

    let mut rows = Vec::new();
    for column in columns {
        if column.length != row_count {
            return Err(EdaError::LengthMismatch {
                column: column.name,
                length: column.length,
                row_count,
            });
        }
        if column.null_count > column.length {
            return Err(EdaError::InvalidNullCount {
                column: column.name,
                null_count: column.null_count,
                length: column.length,
            });
        }
        // null_count > 0 implies row_count > 0 here.
        if column.null_count == 0 {
            continue;
        }
        rows.push(NullReportRow {
            null_percentage: 100.0 * column.null_count as f64 / row_count as f64,
            null_count: column.null_count,
            name: column.name,
        });
    }

    // Stable sort keeps table order for equal counts.
    rows.sort_by(|a, b| b.null_count.cmp(&a.null_count));

    debug!(
        "Null report over {} rows: {} columns with nulls",
        row_count,
        rows.len()
    );

    Ok(NullReport { row_count, rows })
}
