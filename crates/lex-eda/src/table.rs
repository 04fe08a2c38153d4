//! Read interface to the host table.
//!
//! The EDA operations never touch polars directly: they see a table through
//! [`TableView`], which yields per-column metadata ([`ColumnInfo`]), the row
//! count, and a way to build a renamed copy. [`DataFrame`] implements it;
//! tests use a plain in-memory double.

use crate::error::{Result, ResultExt};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Data Type Classification
// =============================================================================

/// Semantic type tag of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtypeKind {
    /// Signed or unsigned integers
    Integer,
    /// Floating point and decimal numbers
    Float,
    /// UTF-8 text
    String,
    /// Boolean flags
    Boolean,
    /// Date, datetime, duration and time types
    Temporal,
    /// Dictionary-encoded categoricals and enums
    Categorical,
    /// Binary, nested and anything else
    Other,
}

impl DtypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
            Self::Categorical => "categorical",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DtypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the semantic kind of a polars DataType.
pub fn dtype_kind(dtype: &DataType) -> DtypeKind {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => DtypeKind::Integer,
        DataType::Float32 | DataType::Float64 | DataType::Decimal(..) => DtypeKind::Float,
        DataType::Boolean => DtypeKind::Boolean,
        DataType::Date | DataType::Datetime(..) | DataType::Duration(_) | DataType::Time => {
            DtypeKind::Temporal
        }
        DataType::String => DtypeKind::String,
        DataType::Categorical(..) | DataType::Enum(..) => DtypeKind::Categorical,
        _ => DtypeKind::Other,
    }
}

/// Bytes per element for fixed-width dtypes.
///
/// Booleans count as one byte each and Decimal as its 128-bit backing
/// integer. Returns `None` for variable-width and unknown dtypes.
pub fn fixed_width_bytes(dtype: &DataType) -> Option<usize> {
    let width = match dtype {
        DataType::Null => 0,
        DataType::Boolean | DataType::Int8 | DataType::UInt8 => 1,
        DataType::Int16 | DataType::UInt16 => 2,
        DataType::Int32 | DataType::UInt32 | DataType::Float32 | DataType::Date => 4,
        DataType::Int64
        | DataType::UInt64
        | DataType::Float64
        | DataType::Datetime(..)
        | DataType::Duration(_)
        | DataType::Time => 8,
        DataType::Decimal(..) => 16,
        _ => return None,
    };
    Some(width)
}

// =============================================================================
// Column Metadata
// =============================================================================

/// How the host can account for a column's memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Sizing {
    /// Every element occupies `width` bytes.
    Fixed { width: usize },
    /// The host summed the actual payload bytes of the column.
    Measured { bytes: usize },
    /// Variable-width values the host did not measure; a fallback width applies.
    Unmeasured,
    /// The host cannot describe the values at all.
    Opaque,
}

/// Metadata for one column of a table snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: DtypeKind,
    /// The host's own name for the dtype (e.g. `i64`, `str`).
    pub dtype_name: String,
    pub length: usize,
    pub null_count: usize,
    pub sizing: Sizing,
}

impl ColumnInfo {
    /// Build metadata for a polars column, measuring string and binary payloads.
    pub fn from_column(column: &Column) -> Result<Self> {
        let dtype = column.dtype();
        let sizing = match fixed_width_bytes(dtype) {
            Some(width) => Sizing::Fixed { width },
            None => match dtype {
                DataType::String => {
                    let bytes = column
                        .as_materialized_series()
                        .str()
                        .context(format!("Measuring string column '{}'", column.name()))?
                        .into_iter()
                        .flatten()
                        .map(str::len)
                        .sum();
                    Sizing::Measured { bytes }
                }
                DataType::Binary => {
                    let bytes = column
                        .as_materialized_series()
                        .binary()
                        .context(format!("Measuring binary column '{}'", column.name()))?
                        .into_iter()
                        .flatten()
                        .map(<[u8]>::len)
                        .sum();
                    Sizing::Measured { bytes }
                }
                DataType::Categorical(..)
                | DataType::Enum(..)
                | DataType::List(_)
                | DataType::Array(..)
                | DataType::Struct(_) => Sizing::Unmeasured,
                _ => Sizing::Opaque,
            },
        };

        Ok(Self {
            name: column.name().to_string(),
            dtype: dtype_kind(dtype),
            dtype_name: dtype.to_string(),
            length: column.len(),
            null_count: column.null_count(),
            sizing,
        })
    }

    /// Number of present values.
    ///
    /// Saturates at zero; summaries reject inconsistent counts before use.
    pub fn non_null_count(&self) -> usize {
        self.length.saturating_sub(self.null_count)
    }
}

// =============================================================================
// Table Interface
// =============================================================================

/// Read-only view of a columnar table.
///
/// Implementations must report columns in table order. Nothing here mutates
/// the table; renaming builds a new one.
pub trait TableView {
    /// Metadata for every column, in order.
    fn column_info(&self) -> Result<Vec<ColumnInfo>>;

    /// Number of rows, independent of how many columns there are.
    fn row_count(&self) -> usize;

    /// Column names, in order.
    fn column_names(&self) -> Result<Vec<String>> {
        Ok(self.column_info()?.into_iter().map(|c| c.name).collect())
    }

    /// A copy of this table with the given names, data and order unchanged.
    fn with_renamed_columns(&self, names: &[String]) -> Result<Self>
    where
        Self: Sized;
}

impl TableView for DataFrame {
    fn column_info(&self) -> Result<Vec<ColumnInfo>> {
        self.get_columns().iter().map(ColumnInfo::from_column).collect()
    }

    fn row_count(&self) -> usize {
        self.height()
    }

    fn column_names(&self) -> Result<Vec<String>> {
        Ok(self
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect())
    }

    fn with_renamed_columns(&self, names: &[String]) -> Result<Self> {
        let mut renamed = self.clone();
        renamed.set_column_names(names.iter().map(String::as_str))?;
        Ok(renamed)
    }
}

// =============================================================================
// Test Double
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
