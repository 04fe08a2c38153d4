//! Configuration types for schema sizing and report rendering.
//!
//! Fallback widths are the assumed average bytes per element for
//! variable-width columns whose payload the host cannot measure. Any byte
//! figure derived from them is flagged as an estimate.

use crate::table::DtypeKind;
use serde::{Deserialize, Serialize};

/// Default assumed bytes per string element.
pub const DEFAULT_STRING_FALLBACK_WIDTH: usize = 16;
/// Default assumed bytes per categorical element (one dictionary code).
pub const DEFAULT_CATEGORICAL_FALLBACK_WIDTH: usize = 4;
/// Default assumed bytes per element of nested or otherwise unmeasured dtypes.
pub const DEFAULT_OTHER_FALLBACK_WIDTH: usize = 8;

/// Sizing rules for variable-width columns.
///
/// Use [`SizingConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_eda::SizingConfig;
///
/// let config = SizingConfig::builder()
///     .string_fallback_width(24)
///     .other_fallback_width(None)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Assumed bytes per element for unmeasured string columns.
    /// Polars string columns are always measured, so this only applies to
    /// hosts whose strings report [`crate::Sizing::Unmeasured`].
    /// Default: 16
    pub string_fallback_width: usize,

    /// Assumed bytes per element for unmeasured categorical columns.
    /// Default: 4
    pub categorical_fallback_width: usize,

    /// Assumed bytes per element for unmeasured nested/other columns.
    /// `None` turns the fallback off, so such columns fail with
    /// [`crate::EdaError::UnsupportedDtype`].
    /// Default: Some(8)
    pub other_fallback_width: Option<usize>,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            string_fallback_width: DEFAULT_STRING_FALLBACK_WIDTH,
            categorical_fallback_width: DEFAULT_CATEGORICAL_FALLBACK_WIDTH,
            other_fallback_width: Some(DEFAULT_OTHER_FALLBACK_WIDTH),
        }
    }
}

impl SizingConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SizingConfigBuilder {
        SizingConfigBuilder::default()
    }

    /// Fallback width for a variable-width dtype kind.
    ///
    /// Fixed-width kinds have no fallback and return `None`.
    pub fn fallback_width(&self, kind: DtypeKind) -> Option<usize> {
        match kind {
            DtypeKind::String => Some(self.string_fallback_width),
            DtypeKind::Categorical => Some(self.categorical_fallback_width),
            DtypeKind::Other => self.other_fallback_width,
            DtypeKind::Integer | DtypeKind::Float | DtypeKind::Boolean | DtypeKind::Temporal => {
                None
            }
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.string_fallback_width == 0 {
            return Err(ConfigValidationError::ZeroWidth(
                "string_fallback_width".to_string(),
            ));
        }

        if self.categorical_fallback_width == 0 {
            return Err(ConfigValidationError::ZeroWidth(
                "categorical_fallback_width".to_string(),
            ));
        }

        if self.other_fallback_width == Some(0) {
            return Err(ConfigValidationError::ZeroWidth(
                "other_fallback_width".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid fallback width for '{0}': must be at least 1 byte")]
    ZeroWidth(String),

    #[error("Invalid percentage decimals: {0} (must be at most 10)")]
    InvalidDecimals(usize),

    #[error("Invalid name width: {0} (must be at least 1)")]
    InvalidNameWidth(usize),
}

impl From<ConfigValidationError> for crate::EdaError {
    fn from(err: ConfigValidationError) -> Self {
        crate::EdaError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`SizingConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct SizingConfigBuilder {
    string_fallback_width: Option<usize>,
    categorical_fallback_width: Option<usize>,
    other_fallback_width: Option<Option<usize>>,
}

impl SizingConfigBuilder {
    /// Set the assumed bytes per unmeasured string element.
    pub fn string_fallback_width(mut self, width: usize) -> Self {
        self.string_fallback_width = Some(width);
        self
    }

    /// Set the assumed bytes per unmeasured categorical element.
    pub fn categorical_fallback_width(mut self, width: usize) -> Self {
        self.categorical_fallback_width = Some(width);
        self
    }

    /// Set the assumed bytes per unmeasured nested/other element.
    ///
    /// Pass `None` to make such columns an error instead of an estimate.
    pub fn other_fallback_width(mut self, width: Option<usize>) -> Self {
        self.other_fallback_width = Some(width);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<SizingConfig, ConfigValidationError> {
        let config = SizingConfig {
            string_fallback_width: self
                .string_fallback_width
                .unwrap_or(DEFAULT_STRING_FALLBACK_WIDTH),
            categorical_fallback_width: self
                .categorical_fallback_width
                .unwrap_or(DEFAULT_CATEGORICAL_FALLBACK_WIDTH),
            other_fallback_width: self
                .other_fallback_width
                .unwrap_or(Some(DEFAULT_OTHER_FALLBACK_WIDTH)),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Options for the text renderers in [`crate::reporting`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Width of the column-name field in rendered tables.
    /// Default: 25
    pub name_width: usize,

    /// Decimal places for null percentages.
    /// Default: 2
    pub percentage_decimals: usize,

    /// Whether to print the leading class/range lines of the info report.
    /// Default: true
    pub show_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            name_width: 25,
            percentage_decimals: 2,
            show_header: true,
        }
    }
}

impl RenderOptions {
    /// Validate the options and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.name_width == 0 {
            return Err(ConfigValidationError::InvalidNameWidth(self.name_width));
        }

        if self.percentage_decimals > 10 {
            return Err(ConfigValidationError::InvalidDecimals(
                self.percentage_decimals,
            ));
        }

        Ok(())
    }
}
