use crate::domain::model::{BookmarkNode, NewEntry};
use crate::domain::ports::BookmarkStore;
use crate::utils::error::{Result, SorterError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process bookmark tree. Clones share the same tree.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    roots: Arc<Mutex<Vec<BookmarkNode>>>,
    last_id: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new(roots: Vec<BookmarkNode>) -> Self {
        let last_id = roots.iter().map(max_numeric_id).max().unwrap_or(0);
        Self {
            roots: Arc::new(Mutex::new(roots)),
            last_id: Arc::new(AtomicU64::new(last_id)),
        }
    }

    /// A Chrome-like layout: one root holding the bar, other and mobile folders.
    pub fn with_default_layout() -> Self {
        let root = BookmarkNode {
            id: "0".to_string(),
            title: None,
            url: None,
            children: Some(vec![
                BookmarkNode::folder("1", "Bookmarks bar"),
                BookmarkNode::folder("2", "Other bookmarks"),
                BookmarkNode::folder("3", "Mobile bookmarks"),
            ]),
        };
        Self::new(vec![root])
    }

    pub async fn snapshot(&self) -> Vec<BookmarkNode> {
        self.roots.lock().await.clone()
    }

    /// Next unused numeric id; fails once the id space is used up.
    fn allocate_id(&self) -> Result<String> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map(|previous| (previous + 1).to_string())
            .map_err(|_| SorterError::store_write("create_entry", "no numeric ids left"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_default_layout()
    }
}

fn max_numeric_id(node: &BookmarkNode) -> u64 {
    node.children()
        .iter()
        .map(max_numeric_id)
        .fold(node.id.parse::<u64>().unwrap_or(0), u64::max)
}

fn find_mut<'a>(nodes: &'a mut [BookmarkNode], id: &str) -> Option<&'a mut BookmarkNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find<'a>(nodes: &'a [BookmarkNode], id: &str) -> Option<&'a BookmarkNode> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find(node.children(), id)
        }
    })
}

fn remove(nodes: &mut Vec<BookmarkNode>, id: &str) -> bool {
    if let Some(pos) = nodes.iter().position(|node| node.id == id) {
        nodes.remove(pos);
        return true;
    }
    nodes
        .iter_mut()
        .filter_map(|node| node.children.as_mut())
        .any(|children| remove(children, id))
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn fetch_tree(&self) -> Result<Vec<BookmarkNode>> {
        Ok(self.roots.lock().await.clone())
    }

    async fn list_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>> {
        let roots = self.roots.lock().await;
        find(&roots, folder_id)
            .map(|node| node.children().to_vec())
            .ok_or_else(|| SorterError::NodeNotFound {
                id: folder_id.to_string(),
            })
    }

    async fn create_entry(&self, entry: NewEntry) -> Result<BookmarkNode> {
        let mut roots = self.roots.lock().await;
        let parent = find_mut(&mut roots, &entry.parent_id).ok_or_else(|| {
            SorterError::NodeNotFound {
                id: entry.parent_id.clone(),
            }
        })?;
        if !parent.is_folder() {
            return Err(SorterError::store_write(
                "create_entry",
                format!("parent {} is not a folder", entry.parent_id),
            ));
        }

        let node = BookmarkNode {
            id: self.allocate_id()?,
            title: Some(entry.title),
            children: entry.url.is_none().then(Vec::new),
            url: entry.url,
        };
        parent.children.get_or_insert_with(Vec::new).push(node.clone());
        Ok(node)
    }

    async fn delete_subtree(&self, node_id: &str) -> Result<()> {
        let mut roots = self.roots.lock().await;
        if roots.iter().any(|root| root.id == node_id) {
            return Err(SorterError::store_write(
                "delete_subtree",
                format!("root {} cannot be removed", node_id),
            ));
        }
        if remove(&mut roots, node_id) {
            Ok(())
        } else {
            Err(SorterError::NodeNotFound {
                id: node_id.to_string(),
            })
        }
    }
}
