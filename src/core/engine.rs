use crate::core::flatten::flatten_all;
use crate::core::grouper::group;
use crate::core::preview::render_preview;
use crate::core::resolver::{DomainResolver, SuffixOverrides};
use crate::core::sync::{SyncSettings, TreeSynchronizer};
use crate::core::{BookmarkStore, ConfigProvider, DomainGroup, PreviewOptions, PreviewReport};
use crate::utils::error::Result;

pub const STATUS_SCANNING: &str = "Scanning…";
pub const STATUS_PREVIEW_READY: &str = "Preview ready.";
pub const STATUS_FAILED: &str = "Something went wrong. See logs for details.";

type StatusListener = Box<dyn Fn(&str) + Send + Sync>;

/// What a user trigger reports back: a status line and, for previews, the
/// rendered report together with the groups it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub status: String,
    pub report: Option<String>,
    pub groups: Option<Vec<DomainGroup>>,
    pub succeeded: bool,
}

impl TriggerOutcome {
    fn failed() -> Self {
        Self {
            status: STATUS_FAILED.to_string(),
            report: None,
            groups: None,
            succeeded: false,
        }
    }
}

pub struct SorterEngine<S: BookmarkStore, C: ConfigProvider> {
    store: S,
    config: C,
    resolver: DomainResolver,
    on_status: StatusListener,
}

impl<S: BookmarkStore, C: ConfigProvider> SorterEngine<S, C> {
    pub fn new(store: S, config: C) -> Self {
        let resolver = DomainResolver::new(SuffixOverrides::new(config.suffix_overrides()));
        Self {
            store,
            config,
            resolver,
            on_status: Box::new(|status: &str| tracing::info!("{}", status)),
        }
    }

    pub fn with_status_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_status = Box::new(listener);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches a fresh snapshot and groups every bookmark in it.
    pub async fn grouping(&self, merge_subdomains: bool) -> Result<Vec<DomainGroup>> {
        let roots = self.store.fetch_tree().await?;
        let records = flatten_all(&roots);
        tracing::debug!("Flattened {} bookmarks from {} roots", records.len(), roots.len());

        Ok(group(records, &self.resolver, merge_subdomains))
    }

    /// Renders the report; folder paths are blanked in the returned groups
    /// unless `include_folder_path` is set.
    pub async fn preview(&self, opts: PreviewOptions) -> Result<PreviewReport> {
        let mut groups = self.grouping(opts.merge_subdomains).await?;
        let text = render_preview(&groups, &opts, &self.config.preview_limits());

        if !opts.include_folder_path {
            groups
                .iter_mut()
                .flat_map(|group| group.items.iter_mut())
                .for_each(|item| item.path.clear());
        }
        Ok(PreviewReport { text, groups })
    }

    /// Rebuilds the sorted folder and returns its id.
    pub async fn apply(&self, merge_subdomains: bool) -> Result<String> {
        let groups = self.grouping(merge_subdomains).await?;
        let synchronizer =
            TreeSynchronizer::new(&self.store, SyncSettings::from_config(&self.config));
        let summary = synchronizer.sync(&groups).await?;
        Ok(summary.folder_id)
    }

    pub async fn run_preview(&self, opts: PreviewOptions) -> TriggerOutcome {
        (self.on_status)(STATUS_SCANNING);

        let outcome = match self.preview(opts).await {
            Ok(report) => TriggerOutcome {
                status: STATUS_PREVIEW_READY.to_string(),
                report: Some(report.text),
                groups: Some(report.groups),
                succeeded: true,
            },
            Err(e) => {
                tracing::error!("Preview failed: {} (Category: {:?})", e, e.category());
                TriggerOutcome::failed()
            }
        };
        (self.on_status)(&outcome.status);
        outcome
    }

    pub async fn run_apply(&self, merge_subdomains: bool) -> TriggerOutcome {
        (self.on_status)(STATUS_SCANNING);

        let outcome = match self.apply(merge_subdomains).await {
            Ok(folder_id) => TriggerOutcome {
                status: format!("Done. Sorted folder id: {}", folder_id),
                report: None,
                groups: None,
                succeeded: true,
            },
            Err(e) => {
                tracing::error!("Apply failed: {} (Category: {:?})", e, e.category());
                TriggerOutcome::failed()
            }
        };
        (self.on_status)(&outcome.status);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::config::toml_config::TomlConfig;
    use crate::core::{BookmarkNode, NewEntry};
    use std::sync::{Arc, Mutex};

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::with_default_layout();
        for (title, url) in [
            ("X", "https://a.example.com/x"),
            ("Y", "https://example.com/y"),
            ("Z", "not-a-url"),
        ] {
            store
                .create_entry(NewEntry::bookmark("1", title, url))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_preview_does_not_mutate_store() {
        let store = seeded_store().await;
        let before = store.snapshot().await;
        let engine = SorterEngine::new(store.clone(), TomlConfig::default());

        let report = engine
            .preview(PreviewOptions {
                merge_subdomains: true,
                include_folder_path: true,
            })
            .await
            .unwrap();

        assert_eq!(report.groups.len(), 2);
        assert!(report.text.contains("example.com (2)"));
        assert!(report.text.contains("  - X [Bookmarks bar]"));
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_run_preview_reports_statuses() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let engine = SorterEngine::new(seeded_store().await, TomlConfig::default())
            .with_status_listener(move |status| sink.lock().unwrap().push(status.to_string()));

        let outcome = engine.run_preview(PreviewOptions::default()).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.status, STATUS_PREVIEW_READY);
        assert!(outcome.report.unwrap().starts_with("Found 3 domains"));
        assert_eq!(*seen.lock().unwrap(), vec![STATUS_SCANNING, STATUS_PREVIEW_READY]);
    }

    #[tokio::test]
    async fn test_preview_groups_follow_folder_path_option() {
        let engine = SorterEngine::new(seeded_store().await, TomlConfig::default());

        let without = engine.run_preview(PreviewOptions::default()).await;
        let groups = without.groups.unwrap();
        assert!(groups.iter().flat_map(|g| &g.items).all(|item| item.path.is_empty()));

        let with = engine
            .run_preview(PreviewOptions {
                merge_subdomains: false,
                include_folder_path: true,
            })
            .await;
        let groups = with.groups.unwrap();
        assert!(groups
            .iter()
            .flat_map(|g| &g.items)
            .all(|item| item.path == "Bookmarks bar"));
    }

    #[tokio::test]
    async fn test_run_apply_names_folder() {
        let engine = SorterEngine::new(seeded_store().await, TomlConfig::default());

        let outcome = engine.run_apply(true).await;

        assert!(outcome.succeeded);
        assert!(outcome.report.is_none());
        let folder_id = outcome.status.trim_start_matches("Done. Sorted folder id: ");
        let folders = engine.store().list_children(folder_id).await.unwrap();
        let titles: Vec<&str> = folders.iter().map(|f| f.title_str()).collect();
        assert_eq!(titles, vec!["example.com", "other"]);
    }

    #[tokio::test]
    async fn test_run_apply_on_empty_store_reports_generic_failure() {
        let store = MemoryStore::new(Vec::<BookmarkNode>::new());
        let engine = SorterEngine::new(store, TomlConfig::default());

        let outcome = engine.run_apply(false).await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.status, STATUS_FAILED);
    }

    #[tokio::test]
    async fn test_configured_suffixes_reach_the_resolver() {
        let store = MemoryStore::with_default_layout();
        store
            .create_entry(NewEntry::bookmark("1", "Shop", "https://www.loja.com.br/"))
            .await
            .unwrap();
        let config = TomlConfig::from_toml_str("[domains]\nextra_suffixes = [\"com.br\"]\n").unwrap();
        let engine = SorterEngine::new(store, config);

        let groups = engine.grouping(true).await.unwrap();
        assert_eq!(groups[0].domain, "loja.com.br");
    }
}
