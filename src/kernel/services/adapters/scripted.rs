//! Prompt adapter that replays pre-recorded answers.
//!
//! Unscripted questions fall back to the most conservative answer (cancel,
//! no, dismissed dialog). Every question is recorded so callers can assert on
//! what the user would have been asked.

use crate::kernel::services::ports::prompt::{
    DiskChangeChoice, OverwriteChoice, Prompt, SaveChoice, SaveReason,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    SaveChoice { name: String, reason: SaveReason },
    Overwrite { name: String },
    DiskChange { path: PathBuf, removed: bool },
    SavePath { default: PathBuf },
    OpenPaths { start_dir: PathBuf },
    Error { message: String },
}

#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    save_choices: VecDeque<SaveChoice>,
    overwrite_choices: VecDeque<OverwriteChoice>,
    disk_choices: VecDeque<DiskChangeChoice>,
    save_paths: VecDeque<Option<PathBuf>>,
    open_paths: VecDeque<Vec<PathBuf>>,
    calls: Vec<PromptCall>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_choice(mut self, choice: SaveChoice) -> Self {
        self.save_choices.push_back(choice);
        self
    }

    pub fn overwrite(mut self, choice: OverwriteChoice) -> Self {
        self.overwrite_choices.push_back(choice);
        self
    }

    pub fn disk_change(mut self, choice: DiskChangeChoice) -> Self {
        self.disk_choices.push_back(choice);
        self
    }

    pub fn save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_paths.push_back(Some(path.into()));
        self
    }

    pub fn dismiss_save_dialog(mut self) -> Self {
        self.save_paths.push_back(None);
        self
    }

    pub fn open_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.open_paths.push_back(paths);
        self
    }

    pub fn calls(&self) -> &[PromptCall] {
        &self.calls
    }

    pub fn questions(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| !matches!(call, PromptCall::Error { .. }))
            .count()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PromptCall::Error { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True when every scripted answer has been consumed.
    pub fn exhausted(&self) -> bool {
        self.save_choices.is_empty()
            && self.overwrite_choices.is_empty()
            && self.disk_choices.is_empty()
            && self.save_paths.is_empty()
            && self.open_paths.is_empty()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask_save_choice(&mut self, name: &str, reason: SaveReason) -> SaveChoice {
        self.calls.push(PromptCall::SaveChoice {
            name: name.to_string(),
            reason,
        });
        self.save_choices.pop_front().unwrap_or(SaveChoice::Cancel)
    }

    fn ask_overwrite_confirmation(&mut self, name: &str) -> OverwriteChoice {
        self.calls.push(PromptCall::Overwrite {
            name: name.to_string(),
        });
        self.overwrite_choices
            .pop_front()
            .unwrap_or(OverwriteChoice::Cancel)
    }

    fn ask_disk_change_choice(&mut self, path: &Path, removed: bool) -> DiskChangeChoice {
        self.calls.push(PromptCall::DiskChange {
            path: path.to_path_buf(),
            removed,
        });
        self.disk_choices.pop_front().unwrap_or(DiskChangeChoice::No)
    }

    fn ask_save_path(&mut self, default: &Path) -> Option<PathBuf> {
        self.calls.push(PromptCall::SavePath {
            default: default.to_path_buf(),
        });
        self.save_paths.pop_front().flatten()
    }

    fn ask_open_paths(&mut self, start_dir: &Path) -> Vec<PathBuf> {
        self.calls.push(PromptCall::OpenPaths {
            start_dir: start_dir.to_path_buf(),
        });
        self.open_paths.pop_front().unwrap_or_default()
    }

    fn report_error(&mut self, message: &str) {
        self.calls.push(PromptCall::Error {
            message: message.to_string(),
        });
    }
}
