//! Rebuilds the "sorted by website" folder from a grouping.
//!
//! Every run fetches the tree, reuses or creates the main folder, deletes
//! its children and recreates one subfolder per domain. Store calls are
//! issued one at a time and nothing is rolled back on failure; the next
//! run's clear step removes whatever a failed run left behind.

use crate::domain::model::{
    BookmarkNode, DomainGroup, NewEntry, DEFAULT_MAIN_FOLDER_TITLE, DEFAULT_PREFERRED_PARENT_TITLE,
};
use crate::domain::ports::{BookmarkStore, ConfigProvider};
use crate::utils::error::{Result, SorterError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub main_folder_title: String,
    pub preferred_parent_title: String,
    pub target_parent_id: Option<String>,
}

impl SyncSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            main_folder_title: config.main_folder_title().to_string(),
            preferred_parent_title: config.preferred_parent_title().to_string(),
            target_parent_id: config.target_parent_id().map(str::to_string),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            main_folder_title: DEFAULT_MAIN_FOLDER_TITLE.to_string(),
            preferred_parent_title: DEFAULT_PREFERRED_PARENT_TITLE.to_string(),
            target_parent_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub folder_id: String,
    pub removed: usize,
    pub folders_created: usize,
    pub bookmarks_created: usize,
}

pub struct TreeSynchronizer<'a, S: BookmarkStore + ?Sized> {
    store: &'a S,
    settings: SyncSettings,
}

impl<'a, S: BookmarkStore + ?Sized> TreeSynchronizer<'a, S> {
    pub fn new(store: &'a S, settings: SyncSettings) -> Self {
        Self { store, settings }
    }

    pub async fn sync(&self, grouped: &[DomainGroup]) -> Result<SyncSummary> {
        let parent_id = self.locate_parent().await?;
        tracing::debug!("Using parent folder {}", parent_id);

        let main_id = self.locate_or_create_main_folder(&parent_id).await?;
        let removed = self.clear(&main_id).await?;

        let mut summary = SyncSummary {
            folder_id: main_id,
            removed,
            ..SyncSummary::default()
        };

        for group in grouped {
            let folder = self
                .store
                .create_entry(NewEntry::folder(&summary.folder_id, &group.domain))
                .await?;
            summary.folders_created += 1;

            for item in &group.items {
                self.store
                    .create_entry(NewEntry::bookmark(&folder.id, &item.title, &item.url))
                    .await?;
                summary.bookmarks_created += 1;
            }
        }

        tracing::info!(
            folder_id = %summary.folder_id,
            removed = summary.removed,
            folders = summary.folders_created,
            bookmarks = summary.bookmarks_created,
            "Rebuilt sorted folder"
        );
        Ok(summary)
    }

    /// Named child of the first root, else its second child, else its first
    /// child, else the root itself.
    async fn locate_parent(&self) -> Result<String> {
        if let Some(id) = &self.settings.target_parent_id {
            return Ok(id.clone());
        }

        let roots = self.store.fetch_tree().await?;
        let root = roots.first().ok_or(SorterError::EmptyTree)?;
        let children = root.children();

        let parent = children
            .iter()
            .find(|child| child.title_str() == self.settings.preferred_parent_title)
            .or_else(|| children.get(1))
            .or_else(|| children.first())
            .unwrap_or(root);
        Ok(parent.id.clone())
    }

    async fn locate_or_create_main_folder(&self, parent_id: &str) -> Result<String> {
        let siblings = self.store.list_children(parent_id).await?;
        if let Some(existing) = siblings
            .iter()
            .find(|node| node.is_folder() && node.title_str() == self.settings.main_folder_title)
        {
            tracing::debug!("Reusing folder {}", existing.id);
            return Ok(existing.id.clone());
        }

        let created: BookmarkNode = self
            .store
            .create_entry(NewEntry::folder(parent_id, &self.settings.main_folder_title))
            .await?;
        tracing::debug!("Created folder {}", created.id);
        Ok(created.id)
    }

    async fn clear(&self, folder_id: &str) -> Result<usize> {
        let children = self.store.list_children(folder_id).await?;
        for child in &children {
            self.store.delete_subtree(&child.id).await?;
        }
        Ok(children.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::model::BookmarkRecord;

    fn groups() -> Vec<DomainGroup> {
        let record = |id: &str, title: &str, url: &str| BookmarkRecord {
            id: id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            path: String::new(),
        };
        vec![
            DomainGroup {
                domain: "example.com".to_string(),
                items: vec![
                    record("10", "X", "https://a.example.com/x"),
                    record("11", "Y", "https://example.com/y"),
                ],
            },
            DomainGroup {
                domain: "other".to_string(),
                items: vec![record("12", "Z", "not-a-url")],
            },
        ]
    }

    fn root_with(children: Vec<BookmarkNode>) -> MemoryStore {
        MemoryStore::new(vec![BookmarkNode::folder("0", "").with_children(children)])
    }

    async fn parent_of(store: &MemoryStore, folder_id: &str) -> String {
        let roots = store.snapshot().await;
        fn search(nodes: &[BookmarkNode], id: &str) -> Option<String> {
            nodes.iter().find_map(|node| {
                if node.children().iter().any(|c| c.id == id) {
                    Some(node.id.clone())
                } else {
                    search(node.children(), id)
                }
            })
        }
        search(&roots, folder_id).unwrap()
    }

    #[tokio::test]
    async fn test_prefers_named_parent() {
        let store = root_with(vec![
            BookmarkNode::folder("1", "Bar"),
            BookmarkNode::folder("2", "Mobile"),
            BookmarkNode::folder("3", "Other bookmarks"),
        ]);

        let summary = TreeSynchronizer::new(&store, SyncSettings::default())
            .sync(&groups())
            .await
            .unwrap();

        assert_eq!(parent_of(&store, &summary.folder_id).await, "3");
    }

    #[tokio::test]
    async fn test_falls_back_to_second_then_first_then_root() {
        let second = root_with(vec![BookmarkNode::folder("1", "Bar"), BookmarkNode::folder("2", "Misc")]);
        let summary = TreeSynchronizer::new(&second, SyncSettings::default())
            .sync(&[])
            .await
            .unwrap();
        assert_eq!(parent_of(&second, &summary.folder_id).await, "2");

        let first = root_with(vec![BookmarkNode::folder("1", "Bar")]);
        let summary = TreeSynchronizer::new(&first, SyncSettings::default())
            .sync(&[])
            .await
            .unwrap();
        assert_eq!(parent_of(&first, &summary.folder_id).await, "1");

        let bare = root_with(Vec::new());
        let summary = TreeSynchronizer::new(&bare, SyncSettings::default())
            .sync(&[])
            .await
            .unwrap();
        assert_eq!(parent_of(&bare, &summary.folder_id).await, "0");
    }

    #[tokio::test]
    async fn test_explicit_target_parent_skips_lookup() {
        let store = MemoryStore::with_default_layout();
        let settings = SyncSettings {
            target_parent_id: Some("3".to_string()),
            ..SyncSettings::default()
        };

        let summary = TreeSynchronizer::new(&store, settings)
            .sync(&groups())
            .await
            .unwrap();

        assert_eq!(parent_of(&store, &summary.folder_id).await, "3");
    }

    #[tokio::test]
    async fn test_rebuild_follows_group_order() {
        let store = MemoryStore::with_default_layout();

        let summary = TreeSynchronizer::new(&store, SyncSettings::default())
            .sync(&groups())
            .await
            .unwrap();

        assert_eq!(summary.removed, 0);
        assert_eq!(summary.folders_created, 2);
        assert_eq!(summary.bookmarks_created, 3);

        let folders = store.list_children(&summary.folder_id).await.unwrap();
        let domains: Vec<&str> = folders.iter().map(|f| f.title_str()).collect();
        assert_eq!(domains, vec!["example.com", "other"]);

        let items = store.list_children(&folders[0].id).await.unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title_str()).collect();
        assert_eq!(titles, vec!["X", "Y"]);
        assert_eq!(items[1].url.as_deref(), Some("https://example.com/y"));
    }

    #[tokio::test]
    async fn test_second_run_replaces_instead_of_accumulating() {
        let store = MemoryStore::with_default_layout();
        let synchronizer = TreeSynchronizer::new(&store, SyncSettings::default());

        let first = synchronizer.sync(&groups()).await.unwrap();
        let after_first = store.list_children(&first.folder_id).await.unwrap();
        let second = synchronizer.sync(&groups()).await.unwrap();
        let after_second = store.list_children(&second.folder_id).await.unwrap();

        assert_eq!(first.folder_id, second.folder_id);
        assert_eq!(second.removed, 2);
        assert_eq!(store.list_children("2").await.unwrap().len(), 1);

        let shape = |nodes: &[BookmarkNode]| -> Vec<(String, usize)> {
            nodes
                .iter()
                .map(|n| (n.title_str().to_string(), n.children().len()))
                .collect()
        };
        assert_eq!(shape(&after_first), shape(&after_second));
    }

    #[tokio::test]
    async fn test_bookmark_with_main_title_is_not_reused() {
        let store = root_with(vec![
            BookmarkNode::folder("1", "Bar"),
            BookmarkNode::folder("2", "Other bookmarks").with_children(vec![
                BookmarkNode::bookmark("5", "Sorted by Website", "https://example.com/"),
            ]),
        ]);

        let summary = TreeSynchronizer::new(&store, SyncSettings::default())
            .sync(&[])
            .await
            .unwrap();

        assert_ne!(summary.folder_id, "5");
        assert_eq!(store.list_children("2").await.unwrap().len(), 2);
    }

    #[test]
    fn test_default_settings_match_config_defaults() {
        let config = crate::config::toml_config::TomlConfig::default();
        assert_eq!(SyncSettings::from_config(&config), SyncSettings::default());
    }

    #[tokio::test]
    async fn test_empty_tree_is_an_error() {
        let store = MemoryStore::new(Vec::new());
        let err = TreeSynchronizer::new(&store, SyncSettings::default())
            .sync(&groups())
            .await
            .unwrap_err();
        assert!(matches!(err, SorterError::EmptyTree));
    }
}
