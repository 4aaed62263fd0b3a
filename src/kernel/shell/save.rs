use std::path::{Path, PathBuf};

use crate::kernel::error::Result;
use crate::kernel::services::ports::{DocumentStore, OverwriteChoice, Prompt};
use crate::kernel::services::ShellEvent;
use crate::kernel::{GroupId, SaveResult};

impl<P: Prompt, D: DocumentStore> super::Shell<P, D> {
    /// Saves to the document's own path, or falls back to save-as when it
    /// has none.
    pub fn save(&mut self, group: GroupId, index: usize) -> Result<SaveResult> {
        let doc = self.document(group, index)?;
        let Some(path) = doc.path().map(Path::to_path_buf) else {
            return self.save_as(group, index, false);
        };

        let overwrite = self.store.is_local(&path) && self.store.exists(&path);
        if doc.file_on_disk_changed() && overwrite {
            let name = doc.title().to_string();
            if self.prompt.ask_overwrite_confirmation(&name) == OverwriteChoice::Cancel {
                tracing::info!(path = %path.display(), "save canceled: file changed on disk");
                return Ok(SaveResult::Canceled);
            }
        }

        self.write_document(group, index, &path, false)
    }

    /// Asks for a destination and writes there. `copy_only` leaves the
    /// document bound to its current path.
    pub fn save_as(&mut self, group: GroupId, index: usize, copy_only: bool) -> Result<SaveResult> {
        let default = self.default_save_path(group, index)?;
        let Some(dest) = self
            .prompt
            .ask_save_path(&default)
            .filter(|p| !p.as_os_str().is_empty())
        else {
            tracing::debug!("save-as dialog dismissed");
            return Ok(SaveResult::Canceled);
        };

        if let Some(dir) = dest.parent() {
            self.remember_dir(dir);
        }
        self.write_document(group, index, &dest, copy_only)
    }

    pub fn save_current(&mut self) -> Result<Option<SaveResult>> {
        match self.current() {
            Some((group, index)) => self.save(group, index).map(Some),
            None => Ok(None),
        }
    }

    pub fn save_as_current(&mut self, copy_only: bool) -> Result<Option<SaveResult>> {
        match self.current() {
            Some((group, index)) => self.save_as(group, index, copy_only).map(Some),
            None => Ok(None),
        }
    }

    /// Current path, or `<last selected dir>/<tab title>` for a never-saved document.
    pub fn default_save_path(&self, group: GroupId, index: usize) -> Result<PathBuf> {
        let doc = self.document(group, index)?;
        Ok(match doc.path() {
            Some(path) => path.to_path_buf(),
            None => self.last_selected_dir().join(doc.title()),
        })
    }

    fn write_document(
        &mut self,
        group: GroupId,
        index: usize,
        dest: &Path,
        copy_only: bool,
    ) -> Result<SaveResult> {
        let doc = self.document(group, index)?;
        let text = doc.text();
        let name = doc.title().to_string();

        if let Err(err) = self.store.write_file(dest, &text) {
            tracing::warn!(path = %dest.display(), error = %err, "save failed");
            self.prompt
                .report_error(&format!("Could not save \u{ab}{}\u{bb}: {}", name, err));
            return Ok(SaveResult::Failed(err));
        }

        let doc = self.document_mut(group, index)?;
        if !copy_only {
            if doc.path() != Some(dest) {
                doc.set_path(dest.to_path_buf());
            }
            doc.mark_saved();
        }
        let document = doc.id;
        tracing::info!(path = %dest.display(), copy_only, "document saved");
        self.bus.emit(ShellEvent::DocumentSaved {
            document,
            path: dest.to_path_buf(),
            copy_only,
        });
        Ok(SaveResult::Saved)
    }
}
