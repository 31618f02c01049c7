//! CSV record source.

use crate::error::ProcessError;
use crate::models::Record;
use csv::{Reader, ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lazily yields one [`Record`] per data row, keyed by the header row.
///
/// Rows shorter than the header simply lack the trailing fields; extra
/// cells beyond the header are ignored.
pub struct CsvSource {
    reader: Reader<File>,
    headers: StringRecord,
    path: PathBuf,
    row: StringRecord,
}

impl CsvSource {
    /// Open `path` and read its header row.
    pub fn open(path: &Path, delimiter: u8) -> Result<Self, ProcessError> {
        debug!("Opening CSV file: {}", path.display());

        let file = File::open(path).map_err(|source| ProcessError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|source| ProcessError::Csv {
                path: path.to_path_buf(),
                source,
            })?
            .clone();

        debug!("CSV headers: {:?}", headers);

        Ok(Self {
            reader,
            headers,
            path: path.to_path_buf(),
            row: StringRecord::new(),
        })
    }
}

impl Iterator for CsvSource {
    type Item = Result<Record, ProcessError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.row) {
            Ok(true) => Some(Ok(self
                .headers
                .iter()
                .zip(self.row.iter())
                .collect())),
            Ok(false) => None,
            Err(source) => Some(Err(ProcessError::Csv {
                path: self.path.clone(),
                source,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_rows_keyed_by_header() {
        let file = write_csv(
            b"Country name,Regional indicator,Healthy life expectancy\n\
              Finland,Western Europe,71.9\n\
              Nepal,South Asia,64.1\n",
        );

        let source = CsvSource::open(file.path(), b',').unwrap();
        let records: Vec<Record> = source.map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Country name"), Some("Finland"));
        assert_eq!(records[1].get("Regional indicator"), Some("South Asia"));
        assert_eq!(records[1].get("Healthy life expectancy"), Some("64.1"));
    }

    #[test]
    fn test_short_rows_lack_trailing_fields() {
        let file = write_csv(b"name,score,region\nalpha,3\nbeta,4,North,extra\n");

        let records: Vec<Record> = CsvSource::open(file.path(), b',')
            .unwrap()
            .map(Result::unwrap)
            .collect();

        assert_eq!(records[0].get("region"), None);
        assert_eq!(records[0].get("score"), Some("3"));
        assert_eq!(records[1].get("region"), Some("North"));
        assert_eq!(records[1].to_string(), r#"{"name": "beta", "score": "4", "region": "North"}"#);
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_csv(b"a;b\n1;2\n");
        let records: Vec<Record> = CsvSource::open(file.path(), b';')
            .unwrap()
            .map(Result::unwrap)
            .collect();

        assert_eq!(records[0].get("b"), Some("2"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CsvSource::open(&dir.path().join("missing.csv"), b',');
        assert!(matches!(result, Err(ProcessError::Io { .. })));
    }

    #[test]
    fn test_invalid_utf8_row_is_csv_error() {
        let file = write_csv(b"name,score\nok,1\n\xff\xfe,2\n");
        let mut source = CsvSource::open(file.path(), b',').unwrap();

        assert!(source.next().unwrap().is_ok());
        assert!(matches!(source.next(), Some(Err(ProcessError::Csv { .. }))));
    }
}
