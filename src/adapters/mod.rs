// Adapters layer: concrete bookmark stores the core can run against.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
