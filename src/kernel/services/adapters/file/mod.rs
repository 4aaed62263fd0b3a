//! Document store adapters: local file system and in-memory.

pub mod local;
pub mod memory;

pub use local::LocalDocumentStore;
pub use memory::MemoryDocumentStore;
