//! Structural summary of a table: dtypes, non-null counts and memory.
//!
//! Memory figures come from an explicit sizing table rather than from the
//! host's allocator bookkeeping, so they are reproducible across runs and
//! library versions. Variable-width columns the host cannot measure are
//! sized with a configured fallback width and flagged as estimates.

use crate::config::SizingConfig;
use crate::error::{EdaError, Result};
use crate::table::{ColumnInfo, DtypeKind, Sizing, TableView};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One row of a [`SchemaSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRow {
    /// Position of the column in the table.
    pub index: usize,
    pub name: String,
    pub dtype: DtypeKind,
    pub dtype_name: String,
    pub non_null_count: usize,
    pub estimated_bytes: u64,
    /// True when `estimated_bytes` came from a fallback width.
    pub is_estimate: bool,
}

/// Structural and memory summary of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSummary {
    /// One row per column, in table order.
    pub rows: Vec<SchemaRow>,
    pub row_count: usize,
    pub total_estimated_bytes: u64,
    /// True when any row is an estimate.
    pub is_estimate: bool,
    /// Distinct host dtype names, sorted.
    pub dtype_names: Vec<String>,
}

impl SchemaSummary {
    pub fn column_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows whose byte figure is a fallback estimate.
    pub fn estimated_rows(&self) -> impl Iterator<Item = &SchemaRow> {
        self.rows.iter().filter(|row| row.is_estimate)
    }
}

/// Summarize a table's schema, null counts and memory footprint.
///
/// Fails with [`EdaError::UnsupportedDtype`] when a column has no sizing
/// rule and no fallback width, and with [`EdaError::InvalidNullCount`] or
/// [`EdaError::LengthMismatch`] when the host reports inconsistent counts.
pub fn summarize_schema<T: TableView + ?Sized>(
    table: &T,
    config: &SizingConfig,
) -> Result<SchemaSummary> {
    let row_count = table.row_count();
    let columns = table.column_info()?;

    debug!(
        "Summarizing schema of {} columns x {} rows",
        columns.len(),
        row_count
    );

    let mut rows = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        validate_counts(column, row_count)?;
        let (estimated_bytes, is_estimate) = column_bytes(column, config)?;
        rows.push(SchemaRow {
            index,
            name: column.name.clone(),
            dtype: column.dtype,
            dtype_name: column.dtype_name.clone(),
            non_null_count: column.non_null_count(),
            estimated_bytes,
            is_estimate,
        });
    }

    let estimated_columns = rows.iter().filter(|row| row.is_estimate).count();
    if estimated_columns > 0 {
        warn!(
            "Memory usage for {} of {} columns is a fallback estimate",
            estimated_columns,
            rows.len()
        );
    }

    let dtype_names: BTreeSet<String> = rows.iter().map(|row| row.dtype_name.clone()).collect();

    Ok(SchemaSummary {
        total_estimated_bytes: rows.iter().map(|row| row.estimated_bytes).sum(),
        is_estimate: estimated_columns > 0,
        dtype_names: dtype_names.into_iter().collect(),
        row_count,
        rows,
    })
}

fn validate_counts(column: &ColumnInfo, row_count: usize) -> Result<()> {
    if column.length != row_count {
        return Err(EdaError::LengthMismatch {
            column: column.name.clone(),
            length: column.length,
            row_count,
        });
    }

    if column.null_count > column.length {
        return Err(EdaError::InvalidNullCount {
            column: column.name.clone(),
            null_count: column.null_count,
            length: column.length,
        });
    }

    Ok(())
}

/// Byte figure for one column and whether it is an estimate.
fn column_bytes(column: &ColumnInfo, config: &SizingConfig) -> Result<(u64, bool)> {
    let length = column.length as u64;
    match column.sizing {
        Sizing::Fixed { width } => Ok((length * width as u64, false)),
        Sizing::Measured { bytes } => Ok((bytes as u64, false)),
        Sizing::Unmeasured => match config.fallback_width(column.dtype) {
            Some(width) => {
                debug!(
                    "Column '{}' sized with fallback width {} bytes",
                    column.name, width
                );
                Ok((length * width as u64, true))
            }
            None => Err(unsupported(column)),
        },
        Sizing::Opaque => Err(unsupported(column)),
    }
}

fn unsupported(column: &ColumnInfo) -> EdaError {
    EdaError::UnsupportedDtype {
        column: column.name.clone(),
        dtype: column.dtype_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::FakeTable;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    // ==================== DataFrame summaries ====================

    #[test]
    fn test_one_row_per_column_in_order() {
        let df = df!(
            "id" => &[1i64, 2, 3, 4],
            "score" => &[Some(1.5f64), None, Some(2.0), None],
            "flag" => &[true, false, true, true],
        )
        .unwrap();

        let summary = summarize_schema(&df, &SizingConfig::default()).unwrap();

        let names: Vec<&str> = summary.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["id", "score", "flag"]);
        assert_eq!(summary.row_count, 4);
        assert_eq!(summary.column_count(), 3);

        assert_eq!(summary.rows[0].non_null_count, 4);
        assert_eq!(summary.rows[1].non_null_count, 2);
        assert_eq!(summary.rows[0].estimated_bytes, 32);
        assert_eq!(summary.rows[1].estimated_bytes, 32);
        assert_eq!(summary.rows[2].estimated_bytes, 4);
        assert_eq!(summary.total_estimated_bytes, 68);
        assert!(!summary.is_estimate);
    }

    #[test]
    fn test_string_columns_are_measured() {
        let df = df!("name" => &[Some("ab"), None, Some("cde")]).unwrap();

        let summary = summarize_schema(&df, &SizingConfig::default()).unwrap();

        assert_eq!(summary.rows[0].dtype, DtypeKind::String);
        assert_eq!(summary.rows[0].estimated_bytes, 5);
        assert!(!summary.rows[0].is_estimate);
    }

    #[test]
    fn test_dtype_names_are_distinct_and_sorted() {
        let df = df!(
            "a" => &[1i64, 2],
            "b" => &[3i64, 4],
            "c" => &[1.0f64, 2.0],
        )
        .unwrap();

        let summary = summarize_schema(&df, &SizingConfig::default()).unwrap();

        assert_eq!(summary.dtype_names.len(), 2);
        let mut sorted = summary.dtype_names.clone();
        sorted.sort();
        assert_eq!(summary.dtype_names, sorted);
    }

    #[test]
    fn test_empty_frame() {
        let summary = summarize_schema(&DataFrame::empty(), &SizingConfig::default()).unwrap();

        assert!(summary.rows.is_empty());
        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.total_estimated_bytes, 0);
        assert!(summary.dtype_names.is_empty());
    }

    #[test]
    fn test_zero_rows_with_columns() {
        let df = df!("a" => Vec::<i32>::new(), "b" => Vec::<String>::new()).unwrap();

        let summary = summarize_schema(&df, &SizingConfig::default()).unwrap();

        assert_eq!(summary.column_count(), 2);
        assert_eq!(summary.row_count, 0);
        assert!(summary.rows.iter().all(|r| r.non_null_count == 0));
        assert_eq!(summary.total_estimated_bytes, 0);
    }

    // ==================== Fallback estimates ====================

    #[test]
    fn test_unmeasured_column_uses_fallback() {
        let table = FakeTable::new(10)
            .int("id", 0)
            .with("tags", DtypeKind::Categorical, 2, Sizing::Unmeasured);

        let summary = summarize_schema(&table, &SizingConfig::default()).unwrap();

        assert_eq!(summary.rows[1].estimated_bytes, 40);
        assert!(summary.rows[1].is_estimate);
        assert!(!summary.rows[0].is_estimate);
        assert!(summary.is_estimate);
        assert_eq!(summary.total_estimated_bytes, 120);
        assert_eq!(summary.estimated_rows().count(), 1);
    }

    fn fallback_frame() -> DataFrame {
        let grade = Series::new("grade".into(), &[Some("a"), None, Some("b")])
            .cast(&DataType::from_categories(Categories::global()))
            .unwrap();
        let stops = Series::new(
            "stops".into(),
            &[
                Series::new("".into(), &[1i32, 2]),
                Series::new("".into(), &[3i32]),
                Series::new("".into(), &[4i32, 5, 6]),
            ],
        );
        let id = Series::new("id".into(), &[1i64, 2, 3]);
        DataFrame::new(vec![id.into(), grade.into(), stops.into()]).unwrap()
    }

    #[test]
    fn test_dataframe_fallback_columns_are_flagged() {
        let df = fallback_frame();

        let summary = summarize_schema(&df, &SizingConfig::default()).unwrap();

        let id = &summary.rows[0];
        assert_eq!(id.estimated_bytes, 24);
        assert!(!id.is_estimate);

        let grade = &summary.rows[1];
        assert_eq!(grade.dtype, DtypeKind::Categorical);
        assert_eq!(grade.non_null_count, 2);
        assert_eq!(grade.estimated_bytes, 3 * 4);
        assert!(grade.is_estimate);

        let stops = &summary.rows[2];
        assert_eq!(stops.dtype, DtypeKind::Other);
        assert_eq!(stops.estimated_bytes, 3 * 8);
        assert!(stops.is_estimate);

        assert!(summary.is_estimate);
        assert_eq!(summary.total_estimated_bytes, 24 + 12 + 24);
        assert_eq!(summary.estimated_rows().count(), 2);
    }

    #[test]
    fn test_dataframe_fallback_widths_follow_config() {
        let df = fallback_frame();
        let config = SizingConfig::builder()
            .categorical_fallback_width(2)
            .other_fallback_width(Some(32))
            .build()
            .unwrap();

        let summary = summarize_schema(&df, &config).unwrap();

        assert_eq!(summary.rows[1].estimated_bytes, 6);
        assert_eq!(summary.rows[2].estimated_bytes, 96);
    }

    #[test]
    fn test_dataframe_strings_ignore_string_fallback() {
        let df = df!("city" => &["Oslo", "Lima"]).unwrap();
        let config = SizingConfig::builder()
            .string_fallback_width(100)
            .build()
            .unwrap();

        let summary = summarize_schema(&df, &config).unwrap();

        assert_eq!(summary.rows[0].estimated_bytes, 8);
        assert!(!summary.is_estimate);
    }

    #[test]
    fn test_dataframe_list_without_fallback_is_unsupported() {
        let df = fallback_frame();
        let config = SizingConfig::builder()
            .other_fallback_width(None)
            .build()
            .unwrap();

        let err = summarize_schema(&df, &config).unwrap_err();
        assert!(matches!(err, EdaError::UnsupportedDtype { ref column, .. } if column == "stops"));
    }

    #[test]
    fn test_other_without_fallback_is_unsupported() {
        let table = FakeTable::new(3).with("nested", DtypeKind::Other, 0, Sizing::Unmeasured);
        let config = SizingConfig::builder()
            .other_fallback_width(None)
            .build()
            .unwrap();

        let err = summarize_schema(&table, &config).unwrap_err();
        assert!(matches!(err, EdaError::UnsupportedDtype { ref column, .. } if column == "nested"));
    }

    #[test]
    fn test_opaque_column_is_unsupported() {
        let table = FakeTable::new(3)
            .int("id", 0)
            .with("blob", DtypeKind::Other, 0, Sizing::Opaque);

        let err = summarize_schema(&table, &SizingConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_DTYPE");
    }

    // ==================== Inconsistent hosts ====================

    #[test]
    fn test_null_count_above_length_is_rejected() {
        let table = FakeTable::new(2).int("id", 5);

        let err = summarize_schema(&table, &SizingConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EdaError::InvalidNullCount {
                null_count: 5,
                length: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut table = FakeTable::new(4).int("id", 0);
        table.columns[0].length = 3;

        let err = summarize_schema(&table, &SizingConfig::default()).unwrap_err();
        assert!(matches!(err, EdaError::LengthMismatch { length: 3, row_count: 4, .. }));
    }
}
