//! Grouped numeric aggregation.
//!
//! Turns a stream of records into overall summary statistics plus a mean
//! per group. Records whose value cannot be used are reported to the
//! diagnostic sink and left out of every bucket.

use crate::diagnostics::DiagnosticSink;
use crate::error::RecordError;
use crate::models::{AggregateResult, NumericSample, Record, SummaryStats};
use indexmap::IndexMap;
use std::borrow::Borrow;

/// Group label used when a record has no grouping field.
pub const DEFAULT_FALLBACK_GROUP: &str = "Unknown";

/// Accumulates samples from records and computes an [`AggregateResult`].
///
/// Groups are keyed by the raw text of the grouping field, so `"Asia"` and
/// `"asia"` are distinct buckets.
pub struct GroupedAggregator<'a> {
    value_field: String,
    group_field: String,
    fallback_group: String,
    sink: &'a dyn DiagnosticSink,
    samples: Vec<f64>,
    groups: IndexMap<String, Vec<f64>>,
    skipped: usize,
}

impl<'a> GroupedAggregator<'a> {
    /// Create an aggregator over `value_field`, bucketed by `group_field`.
    pub fn new(
        value_field: impl Into<String>,
        group_field: impl Into<String>,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            value_field: value_field.into(),
            group_field: group_field.into(),
            fallback_group: DEFAULT_FALLBACK_GROUP.to_string(),
            sink,
            samples: Vec::new(),
            groups: IndexMap::new(),
            skipped: 0,
        }
    }

    /// Use a different label for records missing the grouping field.
    pub fn with_fallback_group(mut self, label: impl Into<String>) -> Self {
        self.fallback_group = label.into();
        self
    }

    /// Add one record.
    pub fn push(&mut self, record: &Record) {
        match parse_sample(
            record,
            &self.value_field,
            &self.group_field,
            &self.fallback_group,
        ) {
            Ok(sample) => {
                self.samples.push(sample.value);
                self.groups
                    .entry(sample.group)
                    .or_default()
                    .push(sample.value);
            }
            Err(e) => {
                self.skipped += 1;
                self.sink.record_skipped(record, &e);
            }
        }
    }

    /// Compute the final result.
    pub fn finish(self) -> AggregateResult {
        let group_means = self
            .groups
            .into_iter()
            .filter_map(|(group, values)| mean(&values).map(|m| (group, m)))
            .collect();

        AggregateResult {
            overall: summarize(&self.samples),
            group_means,
            sample_count: self.samples.len(),
            skipped: self.skipped,
        }
    }

    /// Push every record and compute the result in one go.
    pub fn aggregate<I>(mut self, records: I) -> AggregateResult
    where
        I: IntoIterator,
        I::Item: Borrow<Record>,
    {
        for record in records {
            self.push(record.borrow());
        }
        self.finish()
    }
}

/// Reduce a record to its numeric value and group label.
pub fn parse_sample(
    record: &Record,
    value_field: &str,
    group_field: &str,
    fallback_group: &str,
) -> Result<NumericSample, RecordError> {
    let raw = record
        .get(value_field)
        .ok_or_else(|| RecordError::MissingField(value_field.to_string()))?;
    let value = parse_value(raw)?;
    let group = record.get(group_field).unwrap_or(fallback_group).to_string();

    Ok(NumericSample { value, group })
}

/// Parse a raw cell as a finite `f64`, ignoring surrounding whitespace.
pub fn parse_value(raw: &str) -> Result<f64, RecordError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| RecordError::NotNumeric {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

    if !value.is_finite() {
        return Err(RecordError::NotFinite(raw.to_string()));
    }

    Ok(value)
}

/// Min, max, mean and sample standard deviation; `None` for no values.
///
/// Values are divided by a power of two near the largest magnitude before
/// summing, so inputs close to `f64::MAX` do not overflow to infinity.
pub fn summarize(values: &[f64]) -> Option<SummaryStats> {
    let (min, max) = bounds(values)?;
    let scale = scale_for(min.abs().max(max.abs()));
    let scaled_mean = scaled_mean(values, scale);
    let mean = (scaled_mean * scale).clamp(min, max);

    let std_dev = if values.len() > 1 {
        let sum_sq: f64 = values
            .iter()
            .map(|v| (v / scale - scaled_mean).powi(2))
            .sum();
        (sum_sq / (values.len() - 1) as f64).sqrt() * scale
    } else {
        0.0
    };

    Some(SummaryStats {
        min,
        max,
        mean,
        std_dev,
    })
}

/// Arithmetic mean; `None` for no values.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (min, max) = bounds(values)?;
    let scale = scale_for(min.abs().max(max.abs()));
    Some((scaled_mean(values, scale) * scale).clamp(min, max))
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let (&first, rest) = values.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

// Largest power of two not above `max_abs`; dividing by it is exact and
// leaves every value in (-2, 2).
fn scale_for(max_abs: f64) -> f64 {
    if max_abs < 1.0 {
        return 1.0;
    }
    let exponent = (max_abs.to_bits() >> 52) & 0x7ff;
    f64::from_bits(exponent << 52)
}

fn scaled_mean(values: &[f64], scale: f64) -> f64 {
    let sum: f64 = values.iter().map(|v| v / scale).sum();
    sum / values.len() as f64
}
