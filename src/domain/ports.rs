use crate::domain::model::{BookmarkNode, NewEntry, PreviewLimits};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The external tree-structured bookmark store.
///
/// Every call may suspend; callers issue them one at a time and never
/// keep a node across operations.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn fetch_tree(&self) -> Result<Vec<BookmarkNode>>;
    async fn list_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>>;
    async fn create_entry(&self, entry: NewEntry) -> Result<BookmarkNode>;
    async fn delete_subtree(&self, node_id: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn main_folder_title(&self) -> &str;
    fn preferred_parent_title(&self) -> &str;
    fn target_parent_id(&self) -> Option<&str>;
    fn suffix_overrides(&self) -> Vec<String>;
    fn preview_limits(&self) -> PreviewLimits;
}
