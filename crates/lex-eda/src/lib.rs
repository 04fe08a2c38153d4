//! Exploratory Data Analysis Helpers
//!
//! Diagnostic and cleanup operations for Polars DataFrames, usable as free
//! functions, through a borrowing [`FrameInspector`], or as methods via
//! [`EdaFrameExt`].
//!
//! # Overview
//!
//! - **Schema Summary**: dtypes, non-null counts and a reproducible memory
//!   footprint per column ([`summarize_schema`])
//! - **Null Report**: columns with missing values, ranked by null count
//!   ([`report_nulls`])
//! - **Name Normalization**: lowercase snake_case identifiers with
//!   collision suffixes ([`normalize_names`])
//!
//! All three are pure reads of the input table. Normalization returns a new
//! table and leaves the original untouched.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_eda::{EdaFrameExt, SizingConfig, summarize_schema, report_nulls};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .try_into_reader_with_file_path(Some("data.csv".into()))?
//!     .finish()?;
//!
//! // Rendered reports
//! println!("{}", df.info()?);
//! println!("{}", df.null_report()?);
//!
//! // Structured results
//! let summary = summarize_schema(&df, &SizingConfig::default())?;
//! let nulls = report_nulls(&df)?;
//! println!("{} bytes, {} columns with nulls", summary.total_estimated_bytes, nulls.rows.len());
//!
//! // Canonical column names
//! let df = df.clean_names()?;
//! ```
//!
//! # Memory Figures
//!
//! Fixed-width columns are sized as `length x width` from an explicit
//! per-dtype table (see [`table::fixed_width_bytes`]). String and binary
//! columns are measured by summing payload bytes. Categorical and nested
//! columns use the fallback widths in [`SizingConfig`]; those rows and the
//! summary carry `is_estimate = true`.
//!
//! # Other Tables
//!
//! The operations accept any [`TableView`], so tables held in other
//! structures can be inspected by implementing that trait.

pub mod config;
pub mod error;
pub mod inspector;
pub mod naming;
pub mod nulls;
pub mod reporting;
pub mod schema;
pub mod table;

// Re-exports for convenient access
pub use config::{ConfigValidationError, RenderOptions, SizingConfig, SizingConfigBuilder};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use inspector::{EdaFrameExt, FrameInspector};
pub use naming::{normalize_name, normalize_name_list, normalize_names};
pub use nulls::{NullReport, NullReportRow, report_nulls};
pub use reporting::{InspectionReport, RenamedColumn, ReportGenerator, ReportSections};
pub use schema::{SchemaRow, SchemaSummary, summarize_schema};
pub use table::{ColumnInfo, DtypeKind, Sizing, TableView, dtype_kind, fixed_width_bytes};

static_assertions::assert_impl_all!(SchemaSummary: Send, Sync);
static_assertions::assert_impl_all!(NullReport: Send, Sync);
static_assertions::assert_impl_all!(EdaError: Send, Sync);
