use crate::adapters::memory::MemoryStore;
use crate::domain::model::{BookmarkNode, NewEntry};
use crate::domain::ports::BookmarkStore;
use crate::utils::error::{Result, SorterError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Bookmark tree kept in a JSON file holding an array of root nodes.
///
/// The file is rewritten after every mutation, so an interrupted apply
/// leaves the partially rebuilt tree on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SorterError::store_read("open", format!("{}: {}", path.display(), e)))?;
        let roots: Vec<BookmarkNode> = serde_json::from_str(&content)
            .map_err(|e| SorterError::store_read("open", format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded {} roots from {}", roots.len(), path.display());
        Ok(Self {
            path,
            inner: MemoryStore::new(roots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, operation: &str) -> Result<()> {
        let roots = self.inner.snapshot().await;
        let json = serde_json::to_string_pretty(&roots)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| SorterError::store_write(operation, e.to_string()))
    }
}

#[async_trait]
impl BookmarkStore for JsonFileStore {
    async fn fetch_tree(&self) -> Result<Vec<BookmarkNode>> {
        self.inner.fetch_tree().await
    }

    async fn list_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>> {
        self.inner.list_children(folder_id).await
    }

    async fn create_entry(&self, entry: NewEntry) -> Result<BookmarkNode> {
        let node = self.inner.create_entry(entry).await?;
        self.persist("create_entry").await?;
        Ok(node)
    }

    async fn delete_subtree(&self, node_id: &str) -> Result<()> {
        self.inner.delete_subtree(node_id).await?;
        self.persist("delete_subtree").await
    }
}
