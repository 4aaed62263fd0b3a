//! Service adapters: OS specific implementations plus test doubles.

pub mod dirs;
pub mod file;
pub mod file_watcher;
pub mod scripted;
pub mod settings;

pub use dirs::{absolutize, ensure_log_dir, get_log_dir};
pub use file::{LocalDocumentStore, MemoryDocumentStore};
pub use file_watcher::{DiskEvent, DiskWatcher};
pub use scripted::{PromptCall, ScriptedPrompt};
pub use settings::{get_settings_path, JsonFileSettings, MemorySettings};
