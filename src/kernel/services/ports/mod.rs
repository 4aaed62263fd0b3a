//! Service ports: traits + data contracts.

pub mod config;
pub mod file;
pub mod prompt;
pub mod settings;

pub use config::ShellConfig;
pub use file::{DocumentStore, FileError, Result as FileResult};
pub use prompt::{DiskChangeChoice, OverwriteChoice, Prompt, SaveChoice, SaveReason};
pub use settings::{SettingsError, SettingsStore, LAST_SELECTED_DIR, SHELL_CONFIG};
