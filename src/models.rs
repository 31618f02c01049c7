//! Data models shared by the record sources, the aggregator and the
//! report generator.

use indexmap::IndexMap;
use std::fmt;

/// One logical unit of input: a row, a cell or a list entry, reduced to an
/// ordered field name -> raw value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any earlier value under the same name.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", field, value)?;
        }
        write!(f, "}}")
    }
}

/// A record reduced to its numeric value and group label.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSample {
    pub value: f64,
    pub group: String,
}

/// Summary statistics over a non-empty set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample (n - 1) standard deviation; 0 for a single sample.
    pub std_dev: f64,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    /// `None` when no record produced a valid sample.
    pub overall: Option<SummaryStats>,
    /// Mean per group, in the order groups were first seen.
    pub group_means: IndexMap<String, f64>,
    /// Number of accepted samples.
    pub sample_count: usize,
    /// Number of records skipped because their value was unusable.
    pub skipped: usize,
}

impl AggregateResult {
    /// The result used when the input could not be read at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.overall.is_none()
    }
}

/// Word occurrences per spreadsheet column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCounts {
    pub word: String,
    /// Count per column letter, in the configured column order.
    pub counts: IndexMap<String, usize>,
}

impl ColumnCounts {
    /// All configured columns with a zero count.
    pub fn zeroed(word: &str, columns: &[String]) -> Self {
        Self {
            word: word.to_string(),
            counts: columns.iter().map(|c| (c.clone(), 0)).collect(),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Occurrences per configured word, in configured order.
pub type WordCounts = IndexMap<String, usize>;

/// Labels collected per group, in the order groups were first seen.
pub type GroupedLabels = IndexMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_field_order() {
        let record: Record = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(record.to_string(), r#"{"b": "2", "a": "1"}"#);
        assert_eq!(record.get("a"), Some("1"));
        assert_eq!(record.get("c"), None);
    }

    #[test]
    fn test_record_insert_replaces() {
        let mut record = Record::new();
        record.insert("craft", "ISS");
        record.insert("craft", "Tiangong");
        assert_eq!(record.get("craft"), Some("Tiangong"));
        assert_eq!(record.to_string(), r#"{"craft": "Tiangong"}"#);
    }

    #[test]
    fn test_column_counts_total() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut counts = ColumnCounts::zeroed("GitHub", &columns);
        assert_eq!(counts.total(), 0);

        counts.counts.insert("A".to_string(), 3);
        counts.counts.insert("B".to_string(), 2);
        assert_eq!(counts.total(), 5);
        assert_eq!(
            counts.counts.keys().collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_empty_result_is_sentinel() {
        let result = AggregateResult::empty();
        assert!(result.is_empty());
        assert!(result.group_means.is_empty());
        assert_eq!(result.sample_count, 0);
    }
}
