//! In-memory document store, used by tests and dry runs.

use crate::kernel::services::ports::file::{DocumentStore, FileError, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    files: FxHashMap<PathBuf, String>,
    read_only: FxHashSet<PathBuf>,
    writes: Vec<PathBuf>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: &str) {
        self.files.insert(path.into(), content.to_string());
    }

    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.files.remove(path)
    }

    /// Writes to `path` fail with `PermissionDenied` from now on.
    pub fn deny_writes(&mut self, path: impl Into<PathBuf>) {
        self.read_only.insert(path.into());
    }

    pub fn content(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn writes(&self) -> &[PathBuf] {
        &self.writes
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read_file(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FileError::NotFound(path.to_path_buf()))
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        if self.read_only.contains(path) {
            return Err(FileError::PermissionDenied(path.to_path_buf()));
        }
        self.files.insert(path.to_path_buf(), content.to_string());
        self.writes.push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
