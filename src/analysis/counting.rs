//! Word-occurrence counting and label grouping.

use crate::models::{GroupedLabels, Record, WordCounts};

/// Count non-overlapping occurrences of `word` in `text`, ignoring case.
pub fn count_case_insensitive(text: &str, word: &str) -> usize {
    text.to_lowercase().matches(&word.to_lowercase()).count()
}

/// Count each word in `text`, ignoring case. Keys keep the caller's
/// spelling and order.
pub fn count_words(text: &str, words: &[String]) -> WordCounts {
    let haystack = text.to_lowercase();

    words
        .iter()
        .map(|word| {
            let count = haystack.matches(&word.to_lowercase()).count();
            (word.clone(), count)
        })
        .collect()
}

/// All words with a zero count.
pub fn zero_counts(words: &[String]) -> WordCounts {
    words.iter().map(|w| (w.clone(), 0)).collect()
}

/// Collect `label_field` values per `group_field` value, in first-seen
/// order. Missing fields become `fallback`.
pub fn group_labels<'r, I>(
    records: I,
    group_field: &str,
    label_field: &str,
    fallback: &str,
) -> GroupedLabels
where
    I: IntoIterator<Item = &'r Record>,
{
    let mut grouped = GroupedLabels::new();

    for record in records {
        let group = record.get(group_field).unwrap_or(fallback);
        let label = record.get(label_field).unwrap_or(fallback);
        grouped
            .entry(group.to_string())
            .or_default()
            .push(label.to_string());
    }

    grouped
}
