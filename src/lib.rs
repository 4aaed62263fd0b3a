//! docshell - tab and document lifecycle for a text editor window
//!
//! Modules:
//! - kernel: documents, tab groups and the close/save orchestration
//! - kernel::services: ports (prompt, storage, settings) and their adapters
//! - console: line-based front end implementing the prompt port

pub mod console;
pub mod kernel;
