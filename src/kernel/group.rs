use super::{Document, DocumentId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Ordered tabs of one split-view pane.
#[derive(Debug)]
pub struct TabGroup {
    pub id: GroupId,
    tabs: Vec<Document>,
    active: usize,
}

impl TabGroup {
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.active
    }

    pub fn documents(&self) -> &[Document] {
        &self.tabs
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.tabs.get(index)
    }

    pub fn document_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.tabs.get_mut(index)
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.tabs.get(self.active)
    }

    pub fn current_document_mut(&mut self) -> Option<&mut Document> {
        self.tabs.get_mut(self.active)
    }

    pub fn index_of(&self, id: DocumentId) -> Option<usize> {
        self.tabs.iter().position(|doc| doc.id == id)
    }

    pub fn set_current_index(&mut self, index: usize) -> bool {
        let index = index.min(self.tabs.len().saturating_sub(1));
        if index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Appends `doc` and makes it current.
    pub fn push(&mut self, doc: Document) -> usize {
        self.tabs.push(doc);
        self.active = self.tabs.len() - 1;
        self.active
    }

    pub fn remove(&mut self, index: usize) -> Option<Document> {
        if index >= self.tabs.len() {
            return None;
        }
        let doc = self.tabs.remove(index);
        if self.tabs.is_empty() {
            self.active = 0;
        } else if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        } else if self.active > index {
            self.active -= 1;
        }
        Some(doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/group.rs"]
mod tests;
