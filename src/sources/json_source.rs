//! JSON record source.
//!
//! Reads a document such as
//!
//! ```json
//! { "people": [ { "craft": "ISS", "name": "Oleg Kononenko" } ] }
//! ```
//!
//! and turns each entry of the list under a known key into a [`Record`].

use crate::diagnostics::DiagnosticSink;
use crate::error::{ProcessError, RecordError};
use crate::models::Record;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read the entries listed under `list_key`.
///
/// A document without `list_key` yields no entries. Entries that are not
/// objects are reported to `sink` and skipped. Fields holding `null` are
/// left out of the record, as if absent.
pub fn read_entries(
    path: &Path,
    list_key: &str,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<Record>, ProcessError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProcessError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let root: Value = serde_json::from_str(&content).map_err(|source| ProcessError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = match root.get(list_key) {
        None => {
            debug!("No '{}' key in {}", list_key, path.display());
            return Ok(Vec::new());
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(ProcessError::NotAList {
                path: path.to_path_buf(),
                key: list_key.to_string(),
            })
        }
    };

    let mut records: Vec<Record> = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::Object(fields) => {
                records.push(
                    fields
                        .iter()
                        .filter(|(_, value)| !value.is_null())
                        .map(|(key, value)| (key.as_str(), scalar_text(value)))
                        .collect(),
                );
            }
            other => {
                let mut record = Record::new();
                record.insert("entry", other.to_string());
                sink.record_skipped(&record, &RecordError::NotAnObject);
            }
        }
    }

    Ok(records)
}

/// Strings are taken verbatim; anything else keeps its JSON spelling.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
