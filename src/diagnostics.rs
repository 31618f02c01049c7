//! Diagnostic sink for skipped records.
//!
//! Components that can skip records take a `&dyn DiagnosticSink` when they
//! are built instead of logging on their own. The binary passes a single
//! [`TracingSink`]; tests pass a [`RecordingSink`] to count warnings.

use crate::error::RecordError;
use crate::models::Record;
use tracing::warn;

/// Receives a notification for every record that had to be skipped.
pub trait DiagnosticSink {
    fn record_skipped(&self, record: &Record, error: &RecordError);
}

/// Forwards skipped-record diagnostics to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record_skipped(&self, record: &Record, error: &RecordError) {
        warn!("Skipping invalid row: {} ({})", record, error);
    }
}

/// Collects diagnostics in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: std::cell::RefCell<Vec<(Record, RecordError)>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn count(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn entries(&self) -> Vec<(Record, RecordError)> {
        self.entries.borrow().clone()
    }
}

#[cfg(test)]
impl DiagnosticSink for RecordingSink {
    fn record_skipped(&self, record: &Record, error: &RecordError) {
        self.entries
            .borrow_mut()
            .push((record.clone(), error.clone()));
    }
}
