//! Plain-text report generation.
//!
//! Every report is a fixed layout of human-readable lines. Reports carry
//! computed values only; diagnostics go to the log.

use crate::models::{AggregateResult, ColumnCounts, GroupedLabels, WordCounts};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Written in place of statistics when there were no valid samples.
pub const MISSING_VALUE: &str = "n/a";

/// Headings for a statistics report.
#[derive(Debug, Clone, Copy)]
pub struct StatsLabels<'a> {
    pub value: &'a str,
    pub group: &'a str,
}

/// Generate the statistics report for an aggregation result.
pub fn generate_stats_report(result: &AggregateResult, labels: StatsLabels<'_>) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}:\n", labels.value));
    output.push_str(&generate_stats_lines(result));
    output.push('\n');

    output.push_str(&format!(
        "Average {} by {}:\n",
        labels.value, labels.group
    ));
    for (group, avg) in &result.group_means {
        output.push_str(&format!("{}: {:.2}\n", group, avg));
    }

    output
}

fn generate_stats_lines(result: &AggregateResult) -> String {
    let values = match result.overall {
        Some(stats) => [stats.min, stats.max, stats.mean, stats.std_dev].map(|v| format!("{:.2}", v)),
        None => std::array::from_fn(|_| MISSING_VALUE.to_string()),
    };
    let names = ["Minimum", "Maximum", "Mean", "Standard Deviation"];

    names
        .iter()
        .zip(values.iter())
        .map(|(name, value)| format!("{}: {}\n", name, value))
        .collect()
}

/// Generate the spreadsheet word-count report.
pub fn generate_column_count_report(counts: &ColumnCounts) -> String {
    let mut output = String::new();

    let columns: Vec<String> = counts.counts.keys().map(|c| format!("'{}'", c)).collect();
    output.push_str(&format!(
        "Occurrences of '{}' in columns [{}]:\n",
        counts.word,
        columns.join(", ")
    ));

    for (column, count) in &counts.counts {
        output.push_str(&format!("  Column {}: {}\n", column, count));
    }
    output.push_str(&format!("Total occurrences: {}\n", counts.total()));

    output
}

/// Generate the per-group listing report.
pub fn generate_group_listing_report(heading: &str, groups: &GroupedLabels) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}:\n", heading));
    for (group, labels) in groups {
        output.push_str(&format!("{} ({}):\n", group, labels.len()));
        for label in labels {
            output.push_str(&format!("  - {}\n", label));
        }
        output.push('\n');
    }

    output
}

/// Generate the text word-count report.
pub fn generate_word_count_report(counts: &WordCounts) -> String {
    let mut output = String::from("Occurrences of selected words:\n");

    for (word, count) in counts {
        output.push_str(&format!("  {}: {}\n", word, count));
    }

    output
}

/// Write a report, creating parent directories and replacing any
/// existing file.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write report {}", path.display()))?;

    Ok(())
}
