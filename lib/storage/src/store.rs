//! Storage providers for the case base
//!
//! A store only knows raw delimited lines: it can read them all back and
//! append one at a time. Decoding is the codec's job.

use casex_core::{Error, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Backing store for persisted case records
pub trait CaseStore: Send + Sync {
    /// Every persisted line, in insertion order. Blank lines are kept so
    /// positions match line numbers; the codec skips them.
    fn read_all(&self) -> Result<Vec<String>>;

    /// Durably append one encoded record
    fn append_one(&self, line: &str) -> Result<()>;
}

/// In-memory store, used where no live storage backend is wanted
#[derive(Debug, Default)]
pub struct MemoryCaseStore {
    lines: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_appends: AtomicBool,
}

impl MemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Mutex::new(lines.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Make subsequent reads fail with `StorageUnavailable`
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Release);
    }

    /// Make subsequent appends fail with `StorageUnavailable`
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::Release);
    }
}

impl CaseStore for MemoryCaseStore {
    fn read_all(&self) -> Result<Vec<String>> {
        if self.fail_reads.load(Ordering::Acquire) {
            return Err(Error::StorageUnavailable("memory store: reads disabled".into()));
        }
        Ok(self.lines.lock().clone())
    }

    fn append_one(&self, line: &str) -> Result<()> {
        if self.fail_appends.load(Ordering::Acquire) {
            return Err(Error::StorageUnavailable("memory store: appends disabled".into()));
        }
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
