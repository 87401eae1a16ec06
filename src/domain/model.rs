use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "(no title)";
pub const OTHER_DOMAIN: &str = "other";
pub const PATH_SEPARATOR: &str = " / ";
pub const DEFAULT_MAIN_FOLDER_TITLE: &str = "Sorted by Website";
pub const DEFAULT_PREFERRED_PARENT_TITLE: &str = "Other bookmarks";

/// Snapshot of one node in the external bookmark tree.
///
/// A node with a `url` is a bookmark, a node without one is a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    pub fn folder(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: None,
            children: Some(Vec::new()),
        }
    }

    pub fn bookmark(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: Some(url.into()),
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<BookmarkNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn children(&self) -> &[BookmarkNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Creation request handed to the store. No `url` means a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub parent_id: String,
    pub title: String,
    pub url: Option<String>,
}

impl NewEntry {
    pub fn folder(parent_id: &str, title: &str) -> Self {
        Self {
            parent_id: parent_id.to_string(),
            title: title.to_string(),
            url: None,
        }
    }

    pub fn bookmark(parent_id: &str, title: &str, url: &str) -> Self {
        Self {
            parent_id: parent_id.to_string(),
            title: title.to_string(),
            url: Some(url.to_string()),
        }
    }
}

/// A bookmark leaf plus the titles of the folders above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainGroup {
    pub domain: String,
    pub items: Vec<BookmarkRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    pub merge_subdomains: bool,
    pub include_folder_path: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewLimits {
    pub max_domains: usize,
    pub max_items_per_domain: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            max_domains: 25,
            max_items_per_domain: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub text: String,
    pub groups: Vec<DomainGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tree_dump_with_missing_fields() {
        let json = r#"[{"id":"0","children":[
            {"id":"1","title":"Bookmarks bar","children":[]},
            {"id":"5","title":"Rust","url":"https://www.rust-lang.org/"}
        ]}]"#;
        let roots: Vec<BookmarkNode> = serde_json::from_str(json).unwrap();

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].title, None);
        assert!(roots[0].is_folder());
        assert_eq!(roots[0].children().len(), 2);
        assert!(!roots[0].children()[1].is_folder());
        assert!(roots[0].children()[1].children().is_empty());
    }

    #[test]
    fn test_new_entry_kinds() {
        assert_eq!(NewEntry::folder("1", "Docs").url, None);
        assert_eq!(
            NewEntry::bookmark("1", "Docs", "https://docs.rs").url.as_deref(),
            Some("https://docs.rs")
        );
    }
}
