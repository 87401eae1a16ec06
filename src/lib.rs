pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonFileStore, MemoryStore};
pub use config::toml_config::TomlConfig;
pub use core::engine::{SorterEngine, TriggerOutcome};
pub use domain::model::{BookmarkNode, BookmarkRecord, DomainGroup, PreviewOptions};
pub use utils::error::{Result, SorterError};
