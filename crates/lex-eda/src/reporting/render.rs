//! Fixed-width text rendering of schema summaries and null reports.

use crate::config::RenderOptions;
use crate::nulls::NullReport;
use crate::schema::SchemaSummary;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Human-readable size: MB above one mebibyte, KB otherwise.
pub fn format_bytes(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes > MIB {
        format!("{:.2} MB", bytes / MIB)
    } else {
        format!("{:.2} KB", bytes / KIB)
    }
}

/// Render a schema summary as a table in the style of `DataFrame.info()`.
///
/// The memory line ends in `+` when any column was sized from a fallback
/// width.
pub fn render_info(summary: &SchemaSummary, options: &RenderOptions) -> String {
    let width = options.name_width;
    let rule = "-".repeat(width + 35);
    let mut lines = Vec::with_capacity(summary.rows.len() + 8);

    if options.show_header {
        lines.push("<class 'polars.DataFrame'>".to_string());
        if summary.row_count == 0 {
            lines.push("RangeIndex: 0 entries".to_string());
        } else {
            lines.push(format!(
                "RangeIndex: {} entries, 0 to {}",
                summary.row_count,
                summary.row_count - 1
            ));
        }
        lines.push(format!(
            "Data columns (total {} columns):",
            summary.column_count()
        ));
    }

    lines.push(format!(
        "{:<4} {:<width$} {:<15} {:<10}",
        "#",
        "Column",
        "Non-Null Count",
        "Dtype",
        width = width
    ));
    lines.push(rule.clone());

    lines.extend(summary.rows.iter().map(|row| {
        format!(
            "{:<4} {:<width$} {:<15} {:<10}",
            row.index,
            truncate_str(&row.name, width),
            row.non_null_count,
            row.dtype_name,
            width = width
        )
    }));

    lines.push(rule);
    lines.push(format!("dtypes: {}", summary.dtype_names.join(", ")));

    let marker = if summary.is_estimate { "+" } else { "" };
    lines.push(format!(
        "memory usage: {}{}",
        format_bytes(summary.total_estimated_bytes),
        marker
    ));

    lines.join("\n")
}

/// Render a null report, or a one-line all-clear when nothing is missing.
pub fn render_null_report(report: &NullReport, options: &RenderOptions) -> String {
    let width = options.name_width;
    let mut lines = vec![format!(
        "--- Missing Values Report (Total Rows: {}) ---",
        report.row_count
    )];

    if report.is_clean() {
        lines.push("No missing values found in the dataset.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "{:<width$} {:>12} {:>16}",
        "column_name",
        "null_count",
        "null_percentage",
        width = width
    ));
    lines.push("-".repeat(width + 30));

    lines.extend(report.rows.iter().map(|row| {
        format!(
            "{:<width$} {:>12} {:>16.prec$}",
            truncate_str(&row.name, width),
            row.null_count,
            row.null_percentage,
            width = width,
            prec = options.percentage_decimals
        )
    }));

    lines.join("\n")
}

/// Truncate a string to max chars with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
