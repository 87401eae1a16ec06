//! Plain-text summary of a grouping, truncated to the configured limits.

use crate::domain::model::{DomainGroup, PreviewLimits, PreviewOptions};

pub fn render_preview(
    grouped: &[DomainGroup],
    opts: &PreviewOptions,
    limits: &PreviewLimits,
) -> String {
    let mut lines = vec![format!(
        "Found {} domains (showing up to {} domains, {} bookmarks each)",
        grouped.len(),
        limits.max_domains,
        limits.max_items_per_domain
    )];

    for group in grouped.iter().take(limits.max_domains) {
        lines.push(String::new());
        lines.push(format!("{} ({})", group.domain, group.items.len()));

        for item in group.items.iter().take(limits.max_items_per_domain) {
            if opts.include_folder_path && !item.path.is_empty() {
                lines.push(format!("  - {} [{}]", item.title, item.path));
            } else {
                lines.push(format!("  - {}", item.title));
            }
        }

        let hidden_items = group.items.len().saturating_sub(limits.max_items_per_domain);
        if hidden_items > 0 {
            lines.push(format!("  +{} more", hidden_items));
        }
    }

    let hidden_domains = grouped.len().saturating_sub(limits.max_domains);
    if hidden_domains > 0 {
        lines.push(String::new());
        lines.push(format!("+{} more domains", hidden_domains));
    }

    lines.join("\n")
}
