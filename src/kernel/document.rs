use compact_str::CompactString;
use ropey::Rope;
use std::path::{Path, PathBuf};

use super::LanguageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskState {
    InSync,
    ExternalModified,
    MissingOnDisk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One open buffer.
///
/// A document without a path has never been saved; saving it always goes
/// through save-as.
pub struct Document {
    pub id: DocumentId,
    title: CompactString,
    path: Option<PathBuf>,
    buffer: Rope,
    clean: bool,
    disk_state: DiskState,
    language: LanguageId,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("path", &self.path)
            .field("clean", &self.clean)
            .field("disk_state", &self.disk_state)
            .field("chars", &self.buffer.len_chars())
            .finish()
    }
}

impl Document {
    pub fn untitled(id: DocumentId, title: &str) -> Self {
        Self {
            id,
            title: CompactString::from(title),
            path: None,
            buffer: Rope::new(),
            clean: true,
            disk_state: DiskState::InSync,
            language: LanguageId::PlainText,
        }
    }

    pub fn from_file(id: DocumentId, path: PathBuf, content: &str) -> Self {
        Self {
            id,
            title: title_for(&path),
            language: LanguageId::from_path(&path),
            path: Some(path),
            buffer: Rope::from_str(content),
            clean: true,
            disk_state: DiskState::InSync,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_clean(&self) -> bool {
        self.clean
    }

    /// Untouched blank document: clean and never saved.
    pub fn is_pristine(&self) -> bool {
        self.clean && self.path.is_none()
    }

    pub fn disk_state(&self) -> DiskState {
        self.disk_state
    }

    pub fn externally_modified(&self) -> bool {
        self.disk_state == DiskState::ExternalModified
    }

    pub fn externally_removed(&self) -> bool {
        self.disk_state == DiskState::MissingOnDisk
    }

    /// The on-disk copy changed (or vanished) since we last read or wrote it.
    pub fn file_on_disk_changed(&self) -> bool {
        self.disk_state != DiskState::InSync
    }

    pub fn set_disk_state(&mut self, state: DiskState) {
        self.disk_state = state;
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn set_language(&mut self, language: LanguageId) -> bool {
        if self.language == language {
            return false;
        }
        self.language = language;
        true
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let end = self.buffer.len_chars();
        self.buffer.insert(end, text);
        self.clean = false;
    }

    pub fn display_title(&self) -> String {
        let prefix = match self.disk_state {
            DiskState::ExternalModified => "\u{26a0} ",
            DiskState::MissingOnDisk => "\u{2717} ",
            DiskState::InSync if !self.clean => "\u{25cf} ",
            DiskState::InSync => "",
        };
        format!("{}{}", prefix, self.title)
    }

    /// Re-associates the document with `path` after a save-as.
    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.title = title_for(&path);
        self.language = LanguageId::from_path(&path);
        self.path = Some(path);
    }

    pub(crate) fn mark_saved(&mut self) {
        self.clean = true;
        self.disk_state = DiskState::InSync;
    }

    pub(crate) fn reload_from_content(&mut self, content: &str) {
        self.buffer = Rope::from_str(content);
        self.clean = true;
        self.disk_state = DiskState::InSync;
    }
}

fn title_for(path: &Path) -> CompactString {
    path.file_name()
        .map(|s| CompactString::new(s.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;
