use std::path::{Path, PathBuf};

use crate::kernel::error::{Result, ShellError};
use crate::kernel::services::adapters::absolutize;
use crate::kernel::services::ports::{DocumentStore, Prompt};
use crate::kernel::services::ShellEvent;
use crate::kernel::{Document, DocumentId, GroupId, TabGroup};

impl<P: Prompt, D: DocumentStore> super::Shell<P, D> {
    /// Opens `paths` into `group` and returns how many tabs were added.
    ///
    /// Paths that are already open get focused, or re-read from disk when
    /// `force_reload` is set. A lone untouched blank tab is replaced by the
    /// first file opened.
    pub fn open_documents(
        &mut self,
        paths: &[PathBuf],
        group: GroupId,
        force_reload: bool,
    ) -> Result<usize> {
        let tabs = self.views.group(group).ok_or(ShellError::UnknownGroup(group))?;
        let mut placeholder = (tabs.count() == 1)
            .then(|| tabs.document(0))
            .flatten()
            .filter(|doc| doc.is_pristine())
            .map(|doc| doc.id);

        let mut added = 0;
        for path in paths {
            if let Some(&(at_group, at_index)) = self.views.find_path(path).first() {
                if force_reload {
                    self.reload_document(at_group, at_index, path);
                }
                self.focus(at_group, at_index)?;
                continue;
            }

            let content = match self.store.read_file(path) {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "open failed");
                    self.prompt
                        .report_error(&format!("Could not open {}: {}", path.display(), err));
                    continue;
                }
            };

            let id = self.views.alloc_document_id();
            let doc = Document::from_file(id, path.clone(), &content);
            let tabs = self
                .views
                .group_mut(group)
                .ok_or(ShellError::UnknownGroup(group))?;
            let index = tabs.push(doc);
            tracing::info!(path = %path.display(), "document opened");
            self.bus.emit(ShellEvent::DocumentAdded {
                group,
                document: id,
            });
            added += 1;

            if let Some(blank) = placeholder.take() {
                self.drop_placeholder(group, blank);
            }
            let index = self
                .views
                .group(group)
                .and_then(|g| g.index_of(id))
                .unwrap_or(index);
            self.focus(group, index)?;
        }
        Ok(added)
    }

    /// Asks the user for files, starting in the last used directory.
    pub fn open_with_dialog(&mut self) -> Result<usize> {
        let start = self.last_selected_dir();
        let paths = self.prompt.ask_open_paths(&start);
        let Some(first) = paths.first() else {
            return Ok(0);
        };
        if let Some(dir) = first.parent() {
            self.remember_dir(dir);
        }
        let group = match self.views.current_group_id() {
            Some(group) => group,
            None => self.views.add_group(),
        };
        self.open_documents(&paths, group, false)
    }

    /// Command-line entry: opens `paths` (relative to `cwd`) or a blank
    /// document when there are none.
    pub fn open_startup(&mut self, paths: &[PathBuf], cwd: &Path) -> Result<()> {
        let group = match self.views.current_group_id() {
            Some(group) => group,
            None => self.views.add_group(),
        };

        if !paths.is_empty() {
            let resolved: Vec<PathBuf> = paths.iter().map(|p| absolutize(p, cwd)).collect();
            self.open_documents(&resolved, group, false)?;
        }

        if self.views.group(group).is_some_and(TabGroup::is_empty) {
            self.new_document_in(group);
        }
        Ok(())
    }

    fn reload_document(&mut self, group: GroupId, index: usize, path: &Path) {
        let content = match self.store.read_file(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "reload failed");
                self.prompt
                    .report_error(&format!("Could not reload {}: {}", path.display(), err));
                return;
            }
        };
        if let Ok(doc) = self.document_mut(group, index) {
            doc.reload_from_content(&content);
            tracing::info!(path = %path.display(), "document reloaded");
        }
    }

    fn drop_placeholder(&mut self, group: GroupId, blank: DocumentId) {
        let Some(tabs) = self.views.group_mut(group) else {
            return;
        };
        let Some(index) = tabs.index_of(blank) else {
            return;
        };
        if tabs.document(index).is_some_and(Document::is_pristine) && tabs.remove(index).is_some() {
            self.bus.emit(ShellEvent::DocumentClosed {
                group,
                document: blank,
            });
        }
    }
}
