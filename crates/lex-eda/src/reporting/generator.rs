use crate::config::SizingConfig;
use crate::error::Result;
use crate::naming::normalize_names;
use crate::nulls::{NullReport, report_nulls};
use crate::schema::{SchemaSummary, summarize_schema};
use crate::table::TableView;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

// ============================================================================
// Report Types
// ============================================================================

/// Combined EDA results for one input, used for `--json` and `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Structural and memory summary, present when it was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaSummary>,
    /// Missing-value report, present when it was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nulls: Option<NullReport>,
    /// Name changes, present when normalization ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed_columns: Option<Vec<RenamedColumn>>,
}

/// Selects which operations an inspection runs.
///
/// Each section is computed on its own, so a table the schema summarizer
/// rejects can still be renamed or null-checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSections {
    pub schema: bool,
    pub nulls: bool,
    pub names: bool,
}

impl ReportSections {
    pub fn all() -> Self {
        Self {
            schema: true,
            nulls: true,
            names: true,
        }
    }
}

/// One column's name before and after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedColumn {
    pub original: String,
    pub normalized: String,
}

impl RenamedColumn {
    /// Pair up name sequences of equal length.
    pub fn pair(original: &[String], normalized: &[String]) -> Vec<RenamedColumn> {
        original
            .iter()
            .zip(normalized)
            .map(|(original, normalized)| RenamedColumn {
                original: original.clone(),
                normalized: normalized.clone(),
            })
            .collect()
    }

    pub fn is_changed(&self) -> bool {
        self.original != self.normalized
    }
}

// ============================================================================
// Report Generator
// ============================================================================

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Assemble a report stamped with the current local time.
    pub fn build_report(
        input_file: &str,
        schema: Option<SchemaSummary>,
        nulls: Option<NullReport>,
        renamed_columns: Option<Vec<RenamedColumn>>,
    ) -> InspectionReport {
        InspectionReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            schema,
            nulls,
            renamed_columns,
        }
    }

    /// Run the selected operations over `table` and collect their results.
    ///
    /// Returns the renamed table alongside the report when `sections.names`
    /// is set.
    pub fn inspect<T: TableView>(
        input_file: &str,
        table: &T,
        sections: ReportSections,
        sizing: &SizingConfig,
    ) -> Result<(InspectionReport, Option<T>)> {
        debug!("Inspecting {} with {:?}", input_file, sections);

        let schema = if sections.schema {
            Some(summarize_schema(table, sizing)?)
        } else {
            None
        };
        let nulls = if sections.nulls {
            Some(report_nulls(table)?)
        } else {
            None
        };

        let (renamed_columns, renamed) = if sections.names {
            let renamed = normalize_names(table)?;
            let pairs = RenamedColumn::pair(&table.column_names()?, &renamed.column_names()?);
            (Some(pairs), Some(renamed))
        } else {
            (None, None)
        };

        let report = Self::build_report(input_file, schema, nulls, renamed_columns);
        Ok((report, renamed))
    }

    /// Write the report as pretty JSON to `<output_dir>/<base_name>_eda.json`.
    pub fn write_report_to_file(
        &self,
        report: &InspectionReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_eda.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
