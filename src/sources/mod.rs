//! Record sources.
//!
//! Each source reads one input file and hands records (or raw text) to the
//! analysis layer. Failures to open or parse the file surface as
//! [`ProcessError`](crate::error::ProcessError); individual bad entries are
//! reported to the diagnostic sink instead.

pub mod csv_source;
pub mod json_source;
pub mod spreadsheet;
pub mod text;

pub use csv_source::CsvSource;
pub use json_source::read_entries;
pub use spreadsheet::{column_index, count_word_in_columns};
pub use text::read_text;
