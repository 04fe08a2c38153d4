//! Column name normalization.
//!
//! Names are folded to lowercase ASCII identifiers: every run of characters
//! other than `[A-Za-z0-9]` becomes one underscore, and leading or trailing
//! underscores are dropped. A name with nothing left becomes
//! `column_<index>` (0-based position). Repeated results get `_1`, `_2`, ...
//! in order of appearance, so the output is always unique.

use crate::error::Result;
use crate::table::TableView;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Prefix of the positional name given to names with no alphanumerics.
pub const PLACEHOLDER_PREFIX: &str = "column";

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("Invalid regex: separator run"));

/// Canonicalize a single name, without placeholder or collision handling.
///
/// May return an empty string when the input has no ASCII alphanumerics.
///
/// ```rust,ignore
/// use lex_eda::naming::normalize_name;
///
/// assert_eq!(normalize_name("  Age!! "), "age");
/// assert_eq!(normalize_name("Unit Price ($)"), "unit_price");
/// ```
pub fn normalize_name(name: &str) -> String {
    let replaced = SEPARATOR_RUN.replace_all(name.trim(), "_");
    replaced.to_ascii_lowercase().trim_matches('_').to_string()
}

/// Canonicalize a whole name sequence into unique identifiers.
pub fn normalize_name_list<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen_counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut output = Vec::with_capacity(names.len());

    for (index, name) in names.iter().enumerate() {
        let mut base = normalize_name(name.as_ref());
        if base.is_empty() {
            base = format!("{}_{}", PLACEHOLDER_PREFIX, index);
        }

        let prior = seen_counts.entry(base.clone()).or_insert(0);
        let mut candidate = base.clone();
        if *prior > 0 || taken.contains(&candidate) {
            let mut suffix = (*prior).max(1);
            candidate = format!("{}_{}", base, suffix);
            while taken.contains(&candidate) {
                suffix += 1;
                candidate = format!("{}_{}", base, suffix);
            }
        }
        *prior += 1;

        taken.insert(candidate.clone());
        output.push(candidate);
    }

    output
}

/// Return a copy of `table` with canonical column names.
///
/// Data, row order and column order are untouched; only the names change.
/// Fails only if the host rejects the new name sequence.
pub fn normalize_names<T: TableView>(table: &T) -> Result<T> {
    let names = table.column_names()?;
    let normalized = normalize_name_list(&names);

    let changed = names
        .iter()
        .zip(&normalized)
        .filter(|(before, after)| before != after)
        .count();
    debug!("Normalized column names: {} of {} changed", changed, names.len());

    table.with_renamed_columns(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::FakeTable;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    // ==================== normalize_name tests ====================

    #[test]
    fn test_normalize_name_basic() {
        assert_eq!(normalize_name("First Name"), "first_name");
        assert_eq!(normalize_name("  Age!! "), "age");
        assert_eq!(normalize_name("unit-price/usd"), "unit_price_usd");
        assert_eq!(normalize_name("__already__snake__"), "already_snake");
        assert_eq!(normalize_name("Total  (EUR)"), "total_eur");
    }

    #[test]
    fn test_normalize_name_tabs_and_newlines() {
        assert_eq!(normalize_name("\tcol\nname "), "col_name");
    }

    #[test]
    fn test_normalize_name_non_ascii_is_separator() {
        assert_eq!(normalize_name("Café Sales"), "caf_sales");
    }

    #[test]
    fn test_normalize_name_only_punctuation() {
        assert_eq!(normalize_name("###"), "");
        assert_eq!(normalize_name("   "), "");
    }

    // ==================== normalize_name_list tests ====================

    #[test]
    fn test_collision_gets_suffix() {
        let names = normalize_name_list(&["First Name", "first_name", "  Age!! "]);
        assert_eq!(names, vec!["first_name", "first_name_1", "age"]);
    }

    #[test]
    fn test_repeated_collisions_count_up() {
        let names = normalize_name_list(&["a", "A", "a "]);
        assert_eq!(names, vec!["a", "a_1", "a_2"]);
    }

    #[test]
    fn test_placeholder_uses_position() {
        let names = normalize_name_list(&["id", "###", "", "name"]);
        assert_eq!(names, vec!["id", "column_1", "column_2", "name"]);
    }

    #[test]
    fn test_generated_suffix_never_duplicates_later_name() {
        let names = normalize_name_list(&["a", "a", "a_1"]);
        assert_eq!(names, vec!["a", "a_1", "a_1_1"]);

        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        let names = normalize_name_list(&["a_1", "a", "a"]);
        assert_eq!(names, vec!["a_1", "a", "a_2"]);
    }

    #[test]
    fn test_placeholder_collides_with_existing_name() {
        let names = normalize_name_list(&["column_1", "%%"]);
        assert_eq!(names, vec!["column_1", "column_1_1"]);
    }

    #[test]
    fn test_normalize_name_list_is_idempotent() {
        let inputs = [
            "First Name",
            "first_name",
            "  Age!! ",
            "###",
            "a",
            "a",
            "a_1",
        ];
        let once = normalize_name_list(&inputs);
        let twice = normalize_name_list(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_list() {
        let names: Vec<String> = Vec::new();
        assert!(normalize_name_list(&names).is_empty());
    }

    // ==================== normalize_names tests ====================

    #[test]
    fn test_normalize_names_dataframe() {
        let df = df!(
            "First Name" => &["Ann", "Bo"],
            "first_name" => &["x", "y"],
            "  Age!! " => &[Some(31i64), None],
        )
        .unwrap();

        let renamed = normalize_names(&df).unwrap();

        assert_eq!(
            renamed.column_names().unwrap(),
            vec!["first_name", "first_name_1", "age"]
        );
        assert_eq!(renamed.shape(), df.shape());
        assert_eq!(df.column_names().unwrap()[0], "First Name");

        for (before, after) in df.get_columns().iter().zip(renamed.get_columns()) {
            let before = before.as_materialized_series();
            let after = after.as_materialized_series();
            assert!(before.equals_missing(&after.clone().with_name(before.name().clone())));
        }
    }

    #[test]
    fn test_normalize_names_twice_is_stable() {
        let df = df!("Unit Price" => &[1.0f64], "%" => &[2.0f64]).unwrap();

        let once = normalize_names(&df).unwrap();
        let twice = normalize_names(&once).unwrap();

        assert_eq!(once.column_names().unwrap(), vec!["unit_price", "column_1"]);
        assert_eq!(
            once.column_names().unwrap(),
            twice.column_names().unwrap()
        );
    }

    #[test]
    fn test_normalize_names_accepts_duplicate_inputs() {
        let table = FakeTable::new(5).int("Score", 0).int("Score", 1);

        let renamed = normalize_names(&table).unwrap();

        let names: Vec<&str> = renamed.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["score", "score_1"]);
        assert_eq!(renamed.rows, 5);
        assert_eq!(renamed.columns[1].null_count, 1);
        assert_eq!(table.columns[0].name, "Score");
    }
}
