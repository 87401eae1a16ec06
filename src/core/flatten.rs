use crate::domain::model::{BookmarkNode, BookmarkRecord, PATH_SEPARATOR, UNTITLED};

/// Flattens one root into its bookmark records, depth first.
///
/// A record's path lists the non-empty titles of its ancestor folders and
/// never its own title.
pub fn flatten(root: &BookmarkNode) -> Vec<BookmarkRecord> {
    let mut records = Vec::new();
    walk(root, &mut Vec::new(), &mut records);
    records
}

/// Flattens every root in order and concatenates the results.
pub fn flatten_all(roots: &[BookmarkNode]) -> Vec<BookmarkRecord> {
    roots.iter().flat_map(flatten).collect()
}

fn walk<'a>(node: &'a BookmarkNode, path: &mut Vec<&'a str>, out: &mut Vec<BookmarkRecord>) {
    if let Some(url) = &node.url {
        let title = match node.title_str() {
            "" => UNTITLED,
            title => title,
        };
        out.push(BookmarkRecord {
            id: node.id.clone(),
            title: title.to_string(),
            url: url.clone(),
            path: path.join(PATH_SEPARATOR),
        });
    }

    let title = node.title_str();
    let pushed = !title.is_empty();
    if pushed {
        path.push(title);
    }
    for child in node.children() {
        walk(child, path, out);
    }
    if pushed {
        path.pop();
    }
}
