//! Error types for the EDA operations.
//!
//! Every operation is all-or-nothing: an error means no partial summary,
//! report or renamed table was produced.
//!
//! Errors are serializable as `{ code, message }` so they can be emitted in
//! the CLI's JSON output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for schema summaries, null reports and renaming.
#[derive(Error, Debug)]
pub enum EdaError {
    /// A column's dtype has no sizing rule and no fallback width applies.
    #[error("Column '{column}' has dtype {dtype} with no sizing rule or fallback estimate")]
    UnsupportedDtype { column: String, dtype: String },

    /// The host reported more nulls than values for a column.
    #[error("Column '{column}' reports {null_count} nulls but only {length} values")]
    InvalidNullCount {
        column: String,
        null_count: usize,
        length: usize,
    },

    /// A column's length disagrees with the table's row count.
    #[error("Column '{column}' has length {length} but the table has {row_count} rows")]
    LengthMismatch {
        column: String,
        length: usize,
        row_count: usize,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedDtype { .. } => "UNSUPPORTED_DTYPE",
            Self::InvalidNullCount { .. } => "INVALID_NULL_COUNT",
            Self::LengthMismatch { .. } => "LENGTH_MISMATCH",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for EDA operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}
