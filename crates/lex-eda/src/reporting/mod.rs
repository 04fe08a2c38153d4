//! Presentation of EDA results.
//!
//! The core operations return structured data; this module turns it into
//! the console tables printed by the CLI and into a JSON
//! [`InspectionReport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_eda::reporting::{render_info, render_null_report, ReportGenerator};
//! use lex_eda::{report_nulls, summarize_schema, RenderOptions, SizingConfig};
//!
//! let summary = summarize_schema(&df, &SizingConfig::default())?;
//! println!("{}", render_info(&summary, &RenderOptions::default()));
//!
//! let nulls = report_nulls(&df)?;
//! println!("{}", render_null_report(&nulls, &RenderOptions::default()));
//!
//! let report = ReportGenerator::build_report("data.csv", Some(summary), Some(nulls), None);
//! ReportGenerator::new(PathBuf::from("output")).write_report_to_file(&report, "data")?;
//! ```

mod generator;
mod render;

pub use generator::{InspectionReport, RenamedColumn, ReportGenerator, ReportSections};
pub use render::{format_bytes, render_info, render_null_report};
