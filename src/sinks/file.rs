//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file, one `write_all` per record.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::config("FileSink", format!("cannot open '{}': {}", path.display(), e))
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush file contents to disk.
    pub fn sync(&self) -> Result<()> {
        self.file.lock().sync_data()?;
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        self.file.lock().write_all(record)?;
        Ok(record.len())
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.jsonl");

        fs::write(&log_path, "{\"old\":true}\n")?;

        let sink = FileSink::new(&log_path)?;
        sink.write(b"{\"new\":true}\n")?;
        sink.sync()?;

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content, "{\"old\":true}\n{\"new\":true}\n");
        assert_eq!(sink.path(), log_path.as_path());
        Ok(())
    }

    #[test]
    fn test_file_sink_bad_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no/such/dir/app.jsonl");

        let err = FileSink::new(&missing).err().expect("directory does not exist");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
