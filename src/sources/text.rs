//! Plain-text source.

use crate::error::ProcessError;
use std::path::Path;
use tracing::debug;

/// Read a whole text file into memory.
pub fn read_text(path: &Path) -> Result<String, ProcessError> {
    debug!("Reading text file: {}", path.display());

    std::fs::read_to_string(path).map_err(|source| ProcessError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("romeo.txt");
        std::fs::write(&path, "But soft, what light through yonder window breaks?").unwrap();

        assert!(read_text(&path).unwrap().starts_with("But soft"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_text(&dir.path().join("romeo.txt"));
        assert!(matches!(result, Err(ProcessError::Io { .. })));
    }
}
