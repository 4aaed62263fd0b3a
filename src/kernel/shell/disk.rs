use std::path::Path;

use crate::kernel::error::Result;
use crate::kernel::services::ports::{DiskChangeChoice, DocumentStore, Prompt};
use crate::kernel::{DiskState, DocumentId, GroupId};

impl<P: Prompt, D: DocumentStore> super::Shell<P, D> {
    /// Flags the document as changed on disk and lets the user decide what
    /// happens to the open tab.
    pub fn on_file_on_disk_changed(
        &mut self,
        group: GroupId,
        index: usize,
        removed: bool,
    ) -> Result<DiskChangeChoice> {
        let state = if removed {
            DiskState::MissingOnDisk
        } else {
            DiskState::ExternalModified
        };
        let doc = self.document_mut(group, index)?;
        doc.set_disk_state(state);
        let path = doc.path().map(Path::to_path_buf).unwrap_or_default();

        self.focus(group, index)?;
        let choice = self.prompt.ask_disk_change_choice(&path, removed);
        tracing::info!(path = %path.display(), removed, ?choice, "disk change answered");

        match choice {
            DiskChangeChoice::Close => {
                self.close_tab(group, index, true, false)?;
            }
            DiskChangeChoice::Yes if removed => {
                self.save(group, index)?;
            }
            DiskChangeChoice::Yes => {
                self.open_documents(&[path], group, true)?;
            }
            DiskChangeChoice::No => {}
        }
        Ok(choice)
    }

    /// Routes a watcher event to every tab showing `path`.
    pub fn handle_disk_change(&mut self, path: &Path, removed: bool) -> Result<usize> {
        let targets: Vec<(GroupId, DocumentId)> = self
            .views
            .find_path(path)
            .into_iter()
            .filter_map(|(group, index)| {
                let doc = self.views.group(group)?.document(index)?;
                Some((group, doc.id))
            })
            .collect();

        let mut handled = 0;
        for (group, document) in targets {
            // Earlier answers may have closed or moved tabs.
            let Some(index) = self.views.group(group).and_then(|g| g.index_of(document)) else {
                continue;
            };
            if self.document(group, index)?.path() != Some(path) {
                continue;
            }
            self.on_file_on_disk_changed(group, index, removed)?;
            handled += 1;
        }
        Ok(handled)
    }
}
