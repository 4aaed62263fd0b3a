//! The window controller: tab groups plus the collaborators that the
//! close/save orchestration needs (prompt, document store, settings).

use std::path::{Path, PathBuf};

use super::error::{Result, ShellError};
use super::services::ports::{DocumentStore, Prompt, SettingsStore, ShellConfig, LAST_SELECTED_DIR};
use super::services::{EventBus, ShellEvent, ShellEventReceiver};
use super::{Document, GroupId, LanguageId, TabGroup, Views};

mod batch;
mod close;
mod disk;
mod open;
mod save;

pub struct Shell<P: Prompt, D: DocumentStore> {
    views: Views,
    prompt: P,
    store: D,
    settings: Box<dyn SettingsStore>,
    config: ShellConfig,
    bus: EventBus,
}

impl<P: Prompt, D: DocumentStore> Shell<P, D> {
    /// Builds a shell with one empty tab group. Call [`Shell::open_startup`]
    /// or [`Shell::new_document`] before handing it to the user.
    pub fn new(prompt: P, store: D, settings: Box<dyn SettingsStore>) -> Self {
        let config = ShellConfig::from_settings(settings.as_ref());
        let mut views = Views::new();
        views.add_group();
        Self {
            views,
            prompt,
            store,
            settings,
            config,
            bus: EventBus::default(),
        }
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut D {
        &mut self.store
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn subscribe(&mut self) -> ShellEventReceiver {
        self.bus.subscribe()
    }

    pub fn document(&self, group: GroupId, index: usize) -> Result<&Document> {
        self.views
            .group(group)
            .ok_or(ShellError::UnknownGroup(group))?
            .document(index)
            .ok_or(ShellError::TabOutOfRange { group, index })
    }

    pub(crate) fn document_mut(&mut self, group: GroupId, index: usize) -> Result<&mut Document> {
        self.views
            .group_mut(group)
            .ok_or(ShellError::UnknownGroup(group))?
            .document_mut(index)
            .ok_or(ShellError::TabOutOfRange { group, index })
    }

    /// Current group and its current tab, when that group has any tab.
    pub fn current(&self) -> Option<(GroupId, usize)> {
        let group = self.views.current_group()?;
        if group.is_empty() {
            return None;
        }
        Some((group.id, group.current_index()))
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.views.current_group()?.current_document()
    }

    /// Makes the tab visibly active and gives it focus.
    pub fn focus(&mut self, group: GroupId, index: usize) -> Result<()> {
        let tabs = self
            .views
            .group_mut(group)
            .ok_or(ShellError::UnknownGroup(group))?;
        let document = tabs
            .document(index)
            .ok_or(ShellError::TabOutOfRange { group, index })?
            .id;
        tabs.set_current_index(index);
        self.views.set_current_group(group);
        self.bus
            .emit(ShellEvent::CurrentDocumentChanged { group, document });
        Ok(())
    }

    fn focus_current_of(&mut self, group: GroupId) {
        let Some(index) = self
            .views
            .group(group)
            .filter(|g| !g.is_empty())
            .map(TabGroup::current_index)
        else {
            return;
        };
        let _ = self.focus(group, index);
    }

    /// Opens a blank `new N` document in the current group.
    pub fn new_document(&mut self) -> (GroupId, usize) {
        let group = match self.views.current_group_id() {
            Some(group) => group,
            None => self.views.add_group(),
        };
        let index = self.new_document_in(group);
        (group, index)
    }

    pub(crate) fn new_document_in(&mut self, group: GroupId) -> usize {
        let number = self.views.next_untitled_number();
        let title = self.config.untitled_title(number);
        let id = self.views.alloc_document_id();
        let Some(tabs) = self.views.group_mut(group) else {
            return 0;
        };
        let index = tabs.push(Document::untitled(id, &title));
        tracing::debug!(group = group.raw(), %title, "new document");
        self.bus.emit(ShellEvent::DocumentAdded {
            group,
            document: id,
        });
        let _ = self.focus(group, index);
        index
    }

    pub fn insert_text(&mut self, group: GroupId, index: usize, text: &str) -> Result<()> {
        self.document_mut(group, index)?.insert_text(text);
        Ok(())
    }

    pub fn set_current_language(&mut self, language: LanguageId) -> bool {
        let Some(doc) = self
            .views
            .current_group_id()
            .and_then(|group| self.views.group_mut(group))
            .and_then(TabGroup::current_document_mut)
        else {
            return false;
        };
        if !doc.set_language(language) {
            return false;
        }
        let document = doc.id;
        self.bus
            .emit(ShellEvent::LanguageChanged { document, language });
        true
    }

    /// Moves the current tab into the other group, splitting the window when
    /// there is only one group. An emptied source group is destroyed.
    pub fn move_to_other_view(&mut self) -> Result<(GroupId, usize)> {
        let (source, index) = self.current().ok_or(ShellError::NoGroups)?;
        let dest = match self.views.other_group(source) {
            Some(group) => group,
            None => self.views.add_group(),
        };

        let doc = self
            .views
            .group_mut(source)
            .and_then(|g| g.remove(index))
            .ok_or(ShellError::TabOutOfRange {
                group: source,
                index,
            })?;
        let document = doc.id;
        self.bus.emit(ShellEvent::DocumentClosed {
            group: source,
            document,
        });

        let new_index = self
            .views
            .group_mut(dest)
            .ok_or(ShellError::UnknownGroup(dest))?
            .push(doc);
        self.bus.emit(ShellEvent::DocumentAdded {
            group: dest,
            document,
        });

        if self.views.group(source).is_some_and(TabGroup::is_empty) {
            self.views.remove_group(source);
            self.bus.emit(ShellEvent::GroupRemoved { group: source });
        }

        self.focus(dest, new_index)?;
        Ok((dest, new_index))
    }

    fn last_selected_dir(&self) -> PathBuf {
        self.settings
            .get_typed::<String>(LAST_SELECTED_DIR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config.default_dir.clone())
    }

    fn remember_dir(&mut self, dir: &Path) {
        if dir.as_os_str().is_empty() {
            return;
        }
        if let Err(err) = self
            .settings
            .set_typed(LAST_SELECTED_DIR, &dir.to_string_lossy())
        {
            tracing::warn!(error = %err, "failed to persist last selected dir");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/shell.rs"]
mod tests;
