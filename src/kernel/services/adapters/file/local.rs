//! Local file system document store.

use crate::kernel::services::ports::file::{DocumentStore, FileError, Result};
use std::fs;
use std::path::Path;

pub struct LocalDocumentStore;

impl LocalDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for LocalDocumentStore {
    fn read_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|e| FileError::from_io(e, path))
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(FileError::InvalidPath(String::new()));
        }
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(FileError::NotFound(parent.to_path_buf()));
            }
        }
        fs::write(path, content).map_err(|e| FileError::from_io(e, path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
