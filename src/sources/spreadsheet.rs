//! Spreadsheet source: word occurrences per column.

use crate::analysis::count_case_insensitive;
use crate::error::ProcessError;
use crate::models::ColumnCounts;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

/// Convert a column letter (`A`, `b`, `AA`) to a zero-based index.
pub fn column_index(letters: &str) -> Result<u32, ProcessError> {
    let invalid = || ProcessError::InvalidColumn(letters.to_string());

    if letters.is_empty() {
        return Err(invalid());
    }

    letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        acc.checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(invalid)
    })
    .map(|n| n - 1)
}

/// Count case-insensitive occurrences of `word` in the text cells of one
/// column. Numbers, dates, booleans and empty cells are ignored.
pub fn count_in_column(range: &Range<Data>, column: u32, word: &str) -> usize {
    let Some((_, first_column)) = range.start() else {
        return 0;
    };
    if column < first_column {
        return 0;
    }
    let offset = (column - first_column) as usize;

    range
        .rows()
        .filter_map(|row| match row.get(offset) {
            Some(Data::String(text)) if !text.is_empty() => Some(text),
            _ => None,
        })
        .map(|text| count_case_insensitive(text, word))
        .sum()
}

/// Open the workbook once and count `word` in every listed column.
///
/// `sheet` selects a worksheet by name; `None` means the first sheet.
pub fn count_word_in_columns(
    path: &Path,
    sheet: Option<&str>,
    columns: &[String],
    word: &str,
) -> Result<ColumnCounts, ProcessError> {
    let workbook_error = |source: calamine::Error| ProcessError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let indices = columns
        .iter()
        .map(|c| column_index(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ProcessError::EmptyWorkbook(path.to_path_buf()))?,
    };
    debug!("Reading worksheet '{}' from {}", sheet_name, path.display());

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(workbook_error)?;

    let counts = columns
        .iter()
        .zip(indices)
        .map(|(letter, index)| (letter.clone(), count_in_column(&range, index, word)))
        .collect();

    Ok(ColumnCounts {
        word: word.to_string(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // Two sheets: "Responses" (first) and "Archive".
    fn feedback_workbook() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/feedback.xlsx")
    }

    fn letters(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample_range() -> Range<Data> {
        // Columns B..D, rows 1..3
        let mut range = Range::new((0, 1), (2, 3));
        range.set_value((0, 1), Data::String("Feedback".to_string()));
        range.set_value((0, 2), Data::String("GitHub is great".to_string()));
        range.set_value((1, 1), Data::String("github, GITHUB".to_string()));
        range.set_value((1, 2), Data::Float(42.0));
        range.set_value((2, 1), Data::String("Gitlab".to_string()));
        range.set_value((2, 3), Data::Bool(true));
        range
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("f").unwrap(), 5);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("AZ").unwrap(), 51);
    }

    #[test]
    fn test_column_index_rejects_invalid() {
        assert!(matches!(column_index(""), Err(ProcessError::InvalidColumn(_))));
        assert!(column_index("A1").is_err());
        assert!(column_index("ÄB").is_err());
        assert!(column_index("ZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_count_in_column_uses_text_cells_only() {
        let range = sample_range();

        assert_eq!(count_in_column(&range, 1, "GitHub"), 2);
        assert_eq!(count_in_column(&range, 2, "github"), 1);
        assert_eq!(count_in_column(&range, 3, "true"), 0);
    }

    #[test]
    fn test_count_outside_range_is_zero() {
        let range = sample_range();

        assert_eq!(count_in_column(&range, 0, "GitHub"), 0);
        assert_eq!(count_in_column(&range, 10, "GitHub"), 0);
        assert_eq!(count_in_column(&Range::empty(), 0, "GitHub"), 0);
    }

    #[test]
    fn test_missing_workbook_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = count_word_in_columns(
            &dir.path().join("Feedback.xlsx"),
            None,
            &["A".to_string()],
            "GitHub",
        );
        assert!(matches!(result, Err(ProcessError::Workbook { .. })));
    }

    #[test]
    fn test_bad_column_fails_before_opening() {
        let dir = tempfile::tempdir().unwrap();
        let result = count_word_in_columns(
            &dir.path().join("Feedback.xlsx"),
            None,
            &["A".to_string(), "7".to_string()],
            "GitHub",
        );
        assert!(matches!(result, Err(ProcessError::InvalidColumn(c)) if c == "7"));
    }

    #[test]
    fn test_counts_first_sheet_by_default() {
        let counts = count_word_in_columns(
            &feedback_workbook(),
            None,
            &letters(&["A", "B", "C", "D"]),
            "GitHub",
        )
        .unwrap();

        assert_eq!(counts.word, "GitHub");
        assert_eq!(counts.counts["A"], 2);
        assert_eq!(counts.counts["B"], 2);
        assert_eq!(counts.counts["C"], 1);
        assert_eq!(counts.counts["D"], 0);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_counts_named_sheet() {
        let counts = count_word_in_columns(
            &feedback_workbook(),
            Some("Archive"),
            &letters(&["B", "A"]),
            "github",
        )
        .unwrap();

        assert_eq!(
            counts.counts.into_iter().collect::<Vec<_>>(),
            vec![("B".to_string(), 0), ("A".to_string(), 2)]
        );
    }

    #[test]
    fn test_unknown_sheet_is_error() {
        let result = count_word_in_columns(
            &feedback_workbook(),
            Some("Missing"),
            &letters(&["A"]),
            "GitHub",
        );
        assert!(matches!(result, Err(ProcessError::Workbook { .. })));
    }
}
