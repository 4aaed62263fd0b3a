use crate::kernel::error::Result;
use crate::kernel::services::ports::{DocumentStore, Prompt, SaveChoice, SaveReason};
use crate::kernel::services::ShellEvent;
use crate::kernel::{CloseResult, GroupId, SaveResult, TabGroup};

impl<P: Prompt, D: DocumentStore> super::Shell<P, D> {
    /// Decides whether tab `index` of `group` may close, prompting to save
    /// when it is dirty.
    ///
    /// With `remove == false` nothing is detached (the batch validation pass).
    /// `force` discards unsaved changes without asking.
    pub fn close_tab(
        &mut self,
        group: GroupId,
        index: usize,
        remove: bool,
        force: bool,
    ) -> Result<CloseResult> {
        let doc = self.document(group, index)?;
        let clean = doc.is_clean();
        let name = doc.title().to_string();
        let mut result = CloseResult::AlreadyClean;

        // The window always shows at least one tab: an untouched blank
        // document in the last group stays where it is.
        if !self.views.is_pristine_last_tab(group, index) {
            result = if force || clean {
                if remove {
                    self.close_document(group, index);
                }
                if clean {
                    CloseResult::AlreadyClean
                } else {
                    CloseResult::DiscardedThenClosed
                }
            } else {
                self.focus(group, index)?;
                let choice = self.prompt.ask_save_choice(&name, SaveReason::TabClosing);
                tracing::info!(%name, ?choice, "close prompt answered");
                match choice {
                    SaveChoice::Save => match self.save(group, index)? {
                        SaveResult::Saved => {
                            if remove {
                                self.close_document(group, index);
                            }
                            CloseResult::SavedThenClosed
                        }
                        SaveResult::Canceled | SaveResult::Failed(_) => CloseResult::Canceled,
                    },
                    SaveChoice::Discard => {
                        if remove {
                            self.close_document(group, index);
                        }
                        CloseResult::DiscardedThenClosed
                    }
                    SaveChoice::Cancel => CloseResult::Canceled,
                }
            };

            if !result.is_canceled() {
                self.focus_current_of(group);
            }
        }

        if self.views.group(group).is_some_and(TabGroup::is_empty) {
            self.handle_empty_group(group);
        }

        tracing::debug!(group = group.raw(), index, remove, force, ?result, "close tab");
        Ok(result)
    }

    pub fn close_current(&mut self) -> Result<CloseResult> {
        match self.current() {
            Some((group, index)) => self.close_tab(group, index, true, false),
            None => Ok(CloseResult::AlreadyClean),
        }
    }

    fn close_document(&mut self, group: GroupId, index: usize) {
        let Some(doc) = self.views.group_mut(group).and_then(|g| g.remove(index)) else {
            return;
        };
        tracing::info!(title = doc.title(), "document closed");
        self.bus.emit(ShellEvent::DocumentClosed {
            group,
            document: doc.id,
        });
    }

    /// Zero tabs is never a resting state: drop the group when another one
    /// exists, otherwise refill it with a blank document.
    pub(super) fn handle_empty_group(&mut self, group: GroupId) {
        if self.views.len() > 1 {
            self.views.remove_group(group);
            tracing::info!(group = group.raw(), "empty tab group removed");
            self.bus.emit(ShellEvent::GroupRemoved { group });
            if let Some(first) = self.views.group_at(0).map(|g| g.id) {
                self.views.set_current_group(first);
                self.focus_current_of(first);
            }
        } else {
            self.new_document_in(group);
        }
    }
}
