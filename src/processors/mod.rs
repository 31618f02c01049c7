//! The four file processors.
//!
//! Each processor reads one input file, computes its summary and writes one
//! report. Reading is split from writing: `analyze_*` returns a typed
//! [`ProcessError`] and `process_*` applies the configured
//! [`InputErrorPolicy`] before anything is written.

use crate::analysis::{count_words, group_labels, zero_counts, GroupedAggregator};
use crate::cli::ProcessorKind;
use crate::config::{Config, CsvConfig, ExcelConfig, InputErrorPolicy, JsonConfig, TextConfig};
use crate::diagnostics::DiagnosticSink;
use crate::error::ProcessError;
use crate::models::{AggregateResult, ColumnCounts, GroupedLabels, WordCounts};
use crate::report::{self, StatsLabels};
use crate::sources::{self, CsvSource};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Run one processor. Returns the path of the written report.
pub fn run(kind: ProcessorKind, config: &Config, sink: &dyn DiagnosticSink) -> Result<PathBuf> {
    match kind {
        ProcessorKind::Csv => process_csv(config, sink),
        ProcessorKind::Excel => process_excel(config),
        ProcessorKind::Json => process_json(config, sink),
        ProcessorKind::Text => process_text(config),
    }
}

/// Aggregate the configured numeric column of a CSV file.
pub fn analyze_csv(
    path: &Path,
    settings: &CsvConfig,
    sink: &dyn DiagnosticSink,
) -> Result<AggregateResult, ProcessError> {
    let source = CsvSource::open(path, settings.delimiter as u8)?;

    let aggregator = GroupedAggregator::new(&settings.value_field, &settings.group_field, sink)
        .with_fallback_group(&settings.fallback_group);

    // A read error ends the stream and fails the whole input.
    let mut read_error = None;
    let result = aggregator.aggregate(
        source.map_while(|record| record.map_err(|e| read_error = Some(e)).ok()),
    );
    if let Some(e) = read_error {
        return Err(e);
    }

    debug!(
        "Aggregated {} samples, skipped {} rows",
        result.sample_count, result.skipped
    );
    Ok(result)
}

/// Count the configured word in each configured spreadsheet column.
pub fn analyze_excel(path: &Path, settings: &ExcelConfig) -> Result<ColumnCounts, ProcessError> {
    sources::count_word_in_columns(
        path,
        settings.sheet.as_deref(),
        &settings.columns,
        &settings.word,
    )
}

/// Group entry labels by the configured field of a JSON document.
pub fn analyze_json(
    path: &Path,
    settings: &JsonConfig,
    sink: &dyn DiagnosticSink,
) -> Result<GroupedLabels, ProcessError> {
    let entries = sources::read_entries(path, &settings.list_key, sink)?;

    Ok(group_labels(
        &entries,
        &settings.group_field,
        &settings.label_field,
        &settings.fallback,
    ))
}

/// Count the configured words in a text file.
pub fn analyze_text(path: &Path, settings: &TextConfig) -> Result<WordCounts, ProcessError> {
    let content = sources::read_text(path)?;
    Ok(count_words(&content, &settings.words))
}

pub fn process_csv(config: &Config, sink: &dyn DiagnosticSink) -> Result<PathBuf> {
    let settings = &config.csv;
    let input = config.input_path(&settings.input);
    let output = config.output_path(&settings.output);

    let result = recover(
        analyze_csv(&input, settings, sink),
        config.general.on_input_error,
        AggregateResult::empty,
    )?;

    if result.is_empty() {
        debug!(
            "No valid '{}' values in {}",
            settings.value_field,
            input.display()
        );
    }

    let content = report::generate_stats_report(
        &result,
        StatsLabels {
            value: &settings.value_label,
            group: &settings.group_label,
        },
    );
    report::write_report(&output, &content)?;

    info!(
        "Processed CSV file: {}, Statistics saved to: {}",
        input.display(),
        output.display()
    );
    Ok(output)
}

pub fn process_excel(config: &Config) -> Result<PathBuf> {
    let settings = &config.excel;
    let input = config.input_path(&settings.input);
    let output = config.output_path(&settings.output);

    let counts = recover(
        analyze_excel(&input, settings),
        config.general.on_input_error,
        || ColumnCounts::zeroed(&settings.word, &settings.columns),
    )?;

    report::write_report(&output, &report::generate_column_count_report(&counts))?;

    info!(
        "Processed Excel file: {}, Word count saved to: {}",
        input.display(),
        output.display()
    );
    Ok(output)
}

pub fn process_json(config: &Config, sink: &dyn DiagnosticSink) -> Result<PathBuf> {
    let settings = &config.json;
    let input = config.input_path(&settings.input);
    let output = config.output_path(&settings.output);

    let groups = recover(
        analyze_json(&input, settings, sink),
        config.general.on_input_error,
        GroupedLabels::new,
    )?;

    report::write_report(
        &output,
        &report::generate_group_listing_report(&settings.heading, &groups),
    )?;

    info!(
        "Processed JSON file: {}, Results saved to: {}",
        input.display(),
        output.display()
    );
    Ok(output)
}

pub fn process_text(config: &Config) -> Result<PathBuf> {
    let settings = &config.text;
    let input = config.input_path(&settings.input);
    let output = config.output_path(&settings.output);

    let counts = recover(
        analyze_text(&input, settings),
        config.general.on_input_error,
        || zero_counts(&settings.words),
    )?;

    report::write_report(&output, &report::generate_word_count_report(&counts))?;

    info!(
        "Processed text file: {}, Word counts saved to: {}",
        input.display(),
        output.display()
    );
    Ok(output)
}

/// Apply the input error policy to the outcome of reading an input.
fn recover<T>(
    result: Result<T, ProcessError>,
    policy: InputErrorPolicy,
    fallback: impl FnOnce() -> T,
) -> Result<T> {
    match (result, policy) {
        (Ok(value), _) => Ok(value),
        (Err(e), InputErrorPolicy::EmptyReport) => {
            error!("{}", e);
            Ok(fallback())
        }
        (Err(e), InputErrorPolicy::Fail) => Err(e.into()),
    }
}
