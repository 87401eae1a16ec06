pub mod engine;
pub mod flatten;
pub mod grouper;
pub mod preview;
pub mod resolver;
pub mod sync;

pub use crate::domain::model::{
    BookmarkNode, BookmarkRecord, DomainGroup, NewEntry, PreviewLimits, PreviewOptions,
    PreviewReport,
};
pub use crate::domain::ports::{BookmarkStore, ConfigProvider};
pub use crate::utils::error::Result;
