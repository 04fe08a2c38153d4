//! Method-style access to the EDA operations.
//!
//! [`FrameInspector`] borrows a table and carries the sizing and rendering
//! options, so repeated calls don't have to pass them around.
//! [`EdaFrameExt`] adds `info`, `null_report` and `clean_names` directly to
//! [`DataFrame`].

use crate::config::{RenderOptions, SizingConfig};
use crate::error::Result;
use crate::naming::normalize_names;
use crate::nulls::{NullReport, report_nulls};
use crate::reporting::{render_info, render_null_report};
use crate::schema::{SchemaSummary, summarize_schema};
use crate::table::TableView;
use polars::prelude::DataFrame;

/// Borrowing wrapper exposing the EDA operations on one table.
#[derive(Debug, Clone)]
pub struct FrameInspector<'a, T: TableView> {
    table: &'a T,
    sizing: SizingConfig,
    render: RenderOptions,
}

impl<'a, T: TableView> FrameInspector<'a, T> {
    pub fn new(table: &'a T) -> Self {
        Self {
            table,
            sizing: SizingConfig::default(),
            render: RenderOptions::default(),
        }
    }

    /// Use custom fallback widths for memory estimates.
    pub fn with_sizing(mut self, sizing: SizingConfig) -> Self {
        self.sizing = sizing;
        self
    }

    /// Use custom rendering options for the text reports.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn summarize_schema(&self) -> Result<SchemaSummary> {
        summarize_schema(self.table, &self.sizing)
    }

    pub fn report_nulls(&self) -> Result<NullReport> {
        report_nulls(self.table)
    }

    pub fn normalize_names(&self) -> Result<T> {
        normalize_names(self.table)
    }

    /// Rendered schema summary.
    pub fn info(&self) -> Result<String> {
        self.render.validate()?;
        Ok(render_info(&self.summarize_schema()?, &self.render))
    }

    /// Rendered missing-value report.
    pub fn null_report(&self) -> Result<String> {
        self.render.validate()?;
        Ok(render_null_report(&self.report_nulls()?, &self.render))
    }
}

/// EDA helpers callable directly on a [`DataFrame`].
///
/// ```rust,ignore
/// use lex_eda::EdaFrameExt;
///
/// println!("{}", df.info()?);
/// println!("{}", df.null_report()?);
/// let df = df.clean_names()?;
/// ```
pub trait EdaFrameExt {
    /// An inspector with default options.
    fn inspect(&self) -> FrameInspector<'_, DataFrame>;

    /// Rendered schema summary with default options.
    fn info(&self) -> Result<String> {
        self.inspect().info()
    }

    /// Rendered missing-value report with default options.
    fn null_report(&self) -> Result<String> {
        self.inspect().null_report()
    }

    /// A new frame with canonical column names.
    fn clean_names(&self) -> Result<DataFrame> {
        self.inspect().normalize_names()
    }
}

impl EdaFrameExt for DataFrame {
    fn inspect(&self) -> FrameInspector<'_, DataFrame> {
        FrameInspector::new(self)
    }
}

static_assertions::assert_impl_all!(FrameInspector<'static, DataFrame>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdaError;
    use polars::prelude::*;

    fn sample() -> DataFrame {
        df!(
            "Passenger Id" => &[1i64, 2, 3, 4],
            "Age" => &[Some(22.0f64), None, Some(35.0), None],
            "Cabin #" => &[None, Some("C85"), None, None],
        )
        .unwrap()
    }

    #[test]
    fn test_inspector_operations() {
        let df = sample();
        let inspector = FrameInspector::new(&df);

        let summary = inspector.summarize_schema().unwrap();
        assert_eq!(summary.column_count(), 3);

        let nulls = inspector.report_nulls().unwrap();
        let names: Vec<&str> = nulls.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cabin #", "Age"]);

        let renamed = inspector.normalize_names().unwrap();
        assert_eq!(
            renamed.column_names().unwrap(),
            vec!["passenger_id", "age", "cabin"]
        );
        assert_eq!(df.get_column_names()[0].as_str(), "Passenger Id");
    }

    #[test]
    fn test_extension_trait() {
        let df = sample();

        let info = df.info().unwrap();
        assert!(info.contains("Data columns (total 3 columns):"));

        let nulls = df.null_report().unwrap();
        assert!(nulls.contains("Total Rows: 4"));
        assert!(nulls.contains("75.00"));

        let cleaned = df.clean_names().unwrap();
        assert_eq!(cleaned.height(), df.height());
        assert_eq!(cleaned.get_column_names()[2].as_str(), "cabin");
    }

    #[test]
    fn test_custom_render_options() {
        let df = sample();
        let options = RenderOptions {
            percentage_decimals: 0,
            ..RenderOptions::default()
        };

        let text = df.inspect().with_render_options(options).null_report().unwrap();
        assert!(text.contains(" 75"));
        assert!(!text.contains("75.00"));
    }

    #[test]
    fn test_invalid_render_options() {
        let df = sample();
        let options = RenderOptions {
            name_width: 0,
            ..RenderOptions::default()
        };

        let err = df.inspect().with_render_options(options).info().unwrap_err();
        assert!(matches!(err, EdaError::InvalidConfig(_)));
    }
}
