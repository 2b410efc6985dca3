use crate::store::CaseStore;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::error;

/// Append-only text file holding one encoded case per line
pub struct CaseFile {
    // Unbuffered: a failed append leaves nothing queued for the next one
    file: Mutex<File>,
    path: PathBuf,
}

impl CaseFile {
    /// Open (creating if needed) the case file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening case file {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line, blank ones included, with line endings stripped
    pub fn read_lines(&self) -> Result<Vec<String>> {
        // Hold the writer so a half-written append is never observed
        let _writer = self.file.lock();
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading case file {}", self.path.display()))?;

        Ok(content.lines().map(str::to_string).collect())
    }

    /// Append one line and sync it to disk. A line break is inserted first
    /// when the file does not already end with one, so the new record never
    /// merges into the last existing line.
    pub fn append_line(&self, line: &str) -> Result<()> {
        let mut file = self.file.lock();

        let mut record = String::with_capacity(line.len() + 2);
        if !self.ends_with_newline()? {
            record.push('\n');
        }
        record.push_str(line);
        record.push('\n');

        file.write_all(record.as_bytes())
            .with_context(|| format!("writing to case file {}", self.path.display()))?;
        file.sync_data()
            .with_context(|| format!("syncing case file {}", self.path.display()))?;
        Ok(())
    }

    /// True for an empty file or one whose last byte is `\n`
    fn ends_with_newline(&self) -> Result<bool> {
        let mut reader = File::open(&self.path)?;
        let len = reader.metadata()?.len();
        if len == 0 {
            return Ok(true);
        }
        reader.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        reader.read_exact(&mut last)?;
        Ok(last[0] == b'\n')
    }
}

impl CaseStore for CaseFile {
    fn read_all(&self) -> casex_core::Result<Vec<String>> {
        self.read_lines().map_err(|e| {
            error!("Failed to read case file {}: {:#}", self.path.display(), e);
            casex_core::Error::StorageUnavailable(format!("{:#}", e))
        })
    }

    fn append_one(&self, line: &str) -> casex_core::Result<()> {
        self.append_line(line).map_err(|e| {
            error!("Failed to append to case file {}: {:#}", self.path.display(), e);
            casex_core::Error::StorageUnavailable(format!("{:#}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cases.txt");

        let file = CaseFile::open(&path).unwrap();
        assert!(path.exists());
        assert!(file.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = CaseFile::open(dir.path().join("cases.txt")).unwrap();

        file.append_one("1;a;x").unwrap();
        file.append_one("2;b;y").unwrap();
        assert_eq!(file.read_all().unwrap(), vec!["1;a;x", "2;b;y"]);
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.txt");
        std::fs::write(&path, "1;a;x\n2;b;y").unwrap();

        let file = CaseFile::open(&path).unwrap();
        file.append_one("3;c;z").unwrap();

        assert_eq!(file.read_all().unwrap(), vec!["1;a;x", "2;b;y", "3;c;z"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1;a;x\n2;b;y\n3;c;z\n");
    }

    #[test]
    fn test_read_keeps_line_positions_and_strips_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.txt");
        std::fs::write(&path, "1;a\r\n\r\n\n2;b\r\n").unwrap();

        let file = CaseFile::open(&path).unwrap();
        let lines = file.read_all().unwrap();
        assert_eq!(lines, vec!["1;a", "", "", "2;b"]);
        // "2;b" is on line 4 of the file
        assert_eq!(lines[3], "2;b");
    }

    #[test]
    fn test_failed_append_is_storage_unavailable() {
        // Writes to /dev/full fail with ENOSPC
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let file = CaseFile::open(full).unwrap();
        assert!(matches!(
            file.append_one("1;a;x"),
            Err(casex_core::Error::StorageUnavailable(_))
        ));
    }

    #[test]
    fn test_read_failure_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.txt");
        let file = CaseFile::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            file.read_all(),
            Err(casex_core::Error::StorageUnavailable(_))
        ));
    }
}
