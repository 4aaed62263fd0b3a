//! Headless document shell: tab groups, documents and the close/save
//! orchestration that runs on top of them.

pub mod document;
pub mod error;
pub mod group;
pub mod language;
pub mod outcome;
pub mod services;
pub mod shell;
pub mod views;

pub use document::{DiskState, Document, DocumentId};
pub use error::{Result, ShellError};
pub use group::{GroupId, TabGroup};
pub use language::LanguageId;
pub use outcome::{BatchResult, CloseResult, ExitDecision, SaveResult};
pub use shell::Shell;
pub use views::Views;
