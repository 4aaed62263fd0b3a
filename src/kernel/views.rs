use std::path::Path;

use super::{DocumentId, GroupId, TabGroup};

/// All tab groups of the window, plus id allocation.
#[derive(Debug)]
pub struct Views {
    groups: Vec<TabGroup>,
    current: usize,
    next_group_id: u64,
    next_document_id: u64,
    untitled_counter: u64,
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

impl Views {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            current: 0,
            next_group_id: 1,
            next_document_id: 1,
            untitled_counter: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.iter().map(|g| g.id).collect()
    }

    pub fn position(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&TabGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut TabGroup> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn group_at(&self, position: usize) -> Option<&TabGroup> {
        self.groups.get(position)
    }

    pub fn current_group(&self) -> Option<&TabGroup> {
        self.groups.get(self.current)
    }

    pub fn current_group_id(&self) -> Option<GroupId> {
        self.current_group().map(|g| g.id)
    }

    pub fn set_current_group(&mut self, id: GroupId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let changed = pos != self.current;
        self.current = pos;
        changed
    }

    pub fn add_group(&mut self) -> GroupId {
        let id = GroupId::new(self.next_group_id);
        self.next_group_id = self.next_group_id.saturating_add(1);
        self.groups.push(TabGroup::new(id));
        id
    }

    pub fn remove_group(&mut self, id: GroupId) -> Option<TabGroup> {
        let pos = self.position(id)?;
        let group = self.groups.remove(pos);
        if self.current > pos || self.current >= self.groups.len() {
            self.current = self.current.saturating_sub(1);
        }
        Some(group)
    }

    /// The group that is not `id`, when the window is split.
    pub fn other_group(&self, id: GroupId) -> Option<GroupId> {
        self.groups.iter().map(|g| g.id).find(|gid| *gid != id)
    }

    pub(crate) fn alloc_document_id(&mut self) -> DocumentId {
        let id = DocumentId::new(self.next_document_id);
        self.next_document_id = self.next_document_id.saturating_add(1);
        id
    }

    pub(crate) fn next_untitled_number(&mut self) -> u64 {
        let n = self.untitled_counter;
        self.untitled_counter = self.untitled_counter.saturating_add(1);
        n
    }

    /// Every tab currently showing `path`.
    pub fn find_path(&self, path: &Path) -> Vec<(GroupId, usize)> {
        self.groups
            .iter()
            .flat_map(|g| {
                g.documents()
                    .iter()
                    .enumerate()
                    .filter(|(_, doc)| doc.path() == Some(path))
                    .map(move |(i, _)| (g.id, i))
            })
            .collect()
    }

    pub fn open_paths(&self) -> Vec<&Path> {
        self.groups
            .iter()
            .flat_map(|g| g.documents().iter().filter_map(|doc| doc.path()))
            .collect()
    }

    pub fn total_tabs(&self) -> usize {
        self.groups.iter().map(TabGroup::count).sum()
    }

    /// The only tab of the only group, holding an untouched blank document.
    pub fn is_pristine_last_tab(&self, group: GroupId, index: usize) -> bool {
        self.groups.len() == 1
            && self.group(group).is_some_and(|g| {
                g.count() == 1 && g.document(index).is_some_and(|doc| doc.is_pristine())
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/views.rs"]
mod tests;
