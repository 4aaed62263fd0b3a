use super::services::ports::FileError;

/// Outcome of a request to close one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseResult {
    AlreadyClean,
    SavedThenClosed,
    DiscardedThenClosed,
    /// The user aborted; the tab stays open.
    Canceled,
}

impl CloseResult {
    pub fn is_canceled(self) -> bool {
        matches!(self, Self::Canceled)
    }
}

#[derive(Debug)]
pub enum SaveResult {
    Saved,
    /// Save-as dialog dismissed or overwrite warning declined.
    Canceled,
    /// The store refused the write. Already reported to the user.
    Failed(FileError),
}

impl SaveResult {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Outcome of "close all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchResult {
    Closed,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Proceed,
    Veto,
}
