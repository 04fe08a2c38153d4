//! CLI entry point for the EDA helpers.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use lex_eda::reporting::{render_info, render_null_report};
use lex_eda::{RenamedColumn, RenderOptions, ReportGenerator, ReportSections, SizingConfig};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Print column dtypes, non-null counts and memory usage
    Info,
    /// Print columns with missing values, most affected first
    Nulls,
    /// Normalize column names to lowercase snake_case
    CleanNames {
        /// Write the renamed dataset to this CSV or Parquet file
        #[arg(short = 'f', long)]
        out_file: Option<String>,
    },
    /// Run info, nulls and clean-names together
    All,
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Exploratory data analysis helpers for tabular files",
    long_about = "Quick structural diagnostics for CSV and Parquet datasets.\n\n\
                  EXAMPLES:\n  \
                  # Schema, non-null counts and memory usage\n  \
                  lex-eda -i data.csv info\n\n  \
                  # Missing values report\n  \
                  lex-eda -i data.csv nulls\n\n  \
                  # Normalize column names and save the result\n  \
                  lex-eda -i data.csv clean-names -f data_clean.csv\n\n  \
                  # Everything, as JSON\n  \
                  lex-eda -i data.parquet all --json"
)]
struct Args {
    /// Path to the CSV or Parquet file to inspect
    #[arg(short, long)]
    input: String,

    #[command(subcommand)]
    command: Command,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of text tables
    ///
    /// Disables all logs; only the JSON report is written.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_eda.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Assumed bytes per categorical element
    #[arg(long, default_value = "4")]
    categorical_width: usize,

    /// Assumed bytes per element of nested or other dtypes
    #[arg(long, default_value = "8")]
    other_width: usize,

    /// Fail on nested/other dtypes instead of estimating their size
    #[arg(long)]
    no_fallback: bool,

    /// Decimal places for null percentages
    #[arg(long, default_value = "2")]
    decimals: usize,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let sizing = SizingConfig::builder()
        .categorical_fallback_width(args.categorical_width)
        .other_fallback_width((!args.no_fallback).then_some(args.other_width))
        .build()?;

    let render = RenderOptions {
        percentage_decimals: args.decimals,
        ..RenderOptions::default()
    };
    render.validate()?;

    info!("Loading dataset from: {}", args.input);
    let data = load_table(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    run(&args, &data, &sizing, &render)
}

fn run(args: &Args, data: &DataFrame, sizing: &SizingConfig, render: &RenderOptions) -> Result<()> {
    let sections = match args.command {
        Command::Info => ReportSections {
            schema: true,
            ..ReportSections::default()
        },
        Command::Nulls => ReportSections {
            nulls: true,
            ..ReportSections::default()
        },
        Command::CleanNames { .. } => ReportSections {
            names: true,
            ..ReportSections::default()
        },
        Command::All => ReportSections::all(),
    };

    let (report, renamed) = ReportGenerator::inspect(&args.input, data, sections, sizing)?;

    if let (
        Some(renamed),
        Command::CleanNames {
            out_file: Some(path),
        },
    ) = (renamed, &args.command)
    {
        write_table(renamed, path)?;
        info!("Renamed dataset written to: {}", path);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let generator = ReportGenerator::new(PathBuf::from(&args.output));
        let report_path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    // Text output goes to stdout regardless of log level.
    if let Some(ref schema) = report.schema {
        println!("{}\n", render_info(schema, render));
    }
    if let Some(ref nulls) = report.nulls {
        println!("{}\n", render_null_report(nulls, render));
    }
    if let Some(ref renamed) = report.renamed_columns {
        print_renamed(renamed);
    }

    Ok(())
}

fn print_renamed(renamed: &[RenamedColumn]) {
    let changed: Vec<&RenamedColumn> = renamed.iter().filter(|r| r.is_changed()).collect();

    println!("--- Column Names ({} of {} changed) ---", changed.len(), renamed.len());
    for column in changed {
        println!("  {:<30} -> {}", column.original, column.normalized);
    }
}

/// Load a CSV or Parquet file, chosen by extension.
fn load_table(path: &str) -> Result<DataFrame> {
    let extension = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match extension.as_deref() {
        Some("parquet") | Some("pq") => {
            debug!("Reading Parquet input");
            let file = File::open(path)?;
            Ok(ParquetReader::new(file).finish()?)
        }
        _ => {
            debug!("Reading CSV input");
            Ok(CsvReadOptions::default()
                .with_infer_schema_length(Some(100))
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
                .finish()?)
        }
    }
}

/// Write a frame as Parquet or CSV, chosen by extension.
fn write_table(mut df: DataFrame, path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    if path.ends_with(".parquet") {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;
    }
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
