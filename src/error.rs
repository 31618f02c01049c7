//! Error types for record sources and aggregation.
//!
//! Errors come in two tiers: [`RecordError`] describes a single record
//! that could not be used and is always recoverable, while
//! [`ProcessError`] means a whole input could not be read.

use std::path::PathBuf;
use thiserror::Error;

/// A fatal failure to read or parse an input file.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open workbook {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {} has no worksheets", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("invalid column letter '{0}'")]
    InvalidColumn(String),

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected '{key}' to be a list in {}", .path.display())]
    NotAList { path: PathBuf, key: String },
}

/// Why a single record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("could not convert '{value}' to a number: {reason}")]
    NotNumeric { value: String, reason: String },

    #[error("value '{0}' is not a finite number")]
    NotFinite(String),

    #[error("entry is not an object")]
    NotAnObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_messages() {
        let err = RecordError::NotNumeric {
            value: "bad".to_string(),
            reason: "invalid float literal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not convert 'bad' to a number: invalid float literal"
        );
        assert_eq!(
            RecordError::MissingField("score".to_string()).to_string(),
            "missing field 'score'"
        );
    }

    #[test]
    fn test_process_error_names_path() {
        let err = ProcessError::NotAList {
            path: PathBuf::from("data/astros.json"),
            key: "people".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/astros.json"));
        assert!(msg.contains("'people'"));
    }
}
