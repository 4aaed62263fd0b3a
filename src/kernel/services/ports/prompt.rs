//! User prompt port.
//!
//! Every method blocks until the user answers. The orchestration code stays
//! deterministic given the sequence of answers, which is what the scripted
//! adapter relies on.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    Generic,
    TabClosing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteChoice {
    Save,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskChangeChoice {
    Yes,
    No,
    Close,
}

pub trait Prompt {
    /// "Do you want to save changes to `name`?" with Save / Discard / Cancel.
    fn ask_save_choice(&mut self, name: &str, reason: SaveReason) -> SaveChoice;

    /// Warning shown when the file on disk changed since it was last read.
    fn ask_overwrite_confirmation(&mut self, name: &str) -> OverwriteChoice;

    /// `removed` selects between "save it now?" and "reload it?".
    fn ask_disk_change_choice(&mut self, path: &Path, removed: bool) -> DiskChangeChoice;

    /// Save-as destination. `None` or an empty path means the dialog was dismissed.
    fn ask_save_path(&mut self, default: &Path) -> Option<PathBuf>;

    fn ask_open_paths(&mut self, start_dir: &Path) -> Vec<PathBuf>;

    fn report_error(&mut self, message: &str);
}
