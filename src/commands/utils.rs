//! Utility functions for command implementation

use crate::codec;
use crate::error::{Error, Result};
use crate::results::TestrunResult;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a results file
pub fn load_run(path: &Path) -> Result<TestrunResult> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            Error::NotFound(format!("results file {}: {}", path.display(), e))
        }
        _ => Error::Io(e),
    })?;
    codec::read_results(BufReader::new(file))
}

/// Replace a results file atomically
pub fn save_run(path: &Path, run: &TestrunResult) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    codec::write_results(run, temp.as_file_mut())?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::TestResult;
    use crate::status::Status;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.json");

        let mut run = TestrunResult::new();
        run.tests
            .insert("a/b".to_string(), TestResult::new(Status::Fail));
        run.calculate_group_totals();

        save_run(&path, &run).unwrap();
        assert_eq!(load_run(&path).unwrap(), run);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_run(&temp.path().join("missing.json"));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("results.json");
        std::fs::create_dir(&dir).unwrap();
        // On Linux the open succeeds and the read fails inside serde_json.
        let result = load_run(&dir);
        assert!(matches!(result, Err(Error::Io(_)) | Err(Error::Json(_))));
        assert!(!matches!(result, Err(Error::NotFound(_))));
    }
}
