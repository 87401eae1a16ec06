use crate::core::resolver::DomainResolver;
use crate::domain::model::{BookmarkRecord, DomainGroup};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use std::collections::HashMap;

thread_local! {
    static ROOT_COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Orders strings with the Unicode root collation.
///
/// Accents and case are secondary and tertiary differences, so "Éditions"
/// sorts between "apple" and "Zebra". Strings the collator treats as equal
/// fall back to byte order, keeping the result a total order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
        })
        .then_with(|| a.cmp(b))
}

/// Buckets records by domain key, sorting groups by domain and items by title.
pub fn group(
    records: Vec<BookmarkRecord>,
    resolver: &DomainResolver,
    should_merge: bool,
) -> Vec<DomainGroup> {
    let mut buckets: HashMap<String, Vec<BookmarkRecord>> = HashMap::new();
    for record in records {
        let domain = resolver.domain_key_for(&record.url, should_merge);
        buckets.entry(domain).or_default().push(record);
    }

    let mut groups: Vec<DomainGroup> = buckets
        .into_iter()
        .map(|(domain, mut items)| {
            items.sort_by(|a, b| locale_cmp(&a.title, &b.title));
            DomainGroup { domain, items }
        })
        .collect();
    groups.sort_by(|a, b| locale_cmp(&a.domain, &b.domain));

    tracing::debug!("Grouped bookmarks into {} domains", groups.len());
    groups
}
