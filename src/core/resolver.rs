//! Hostname extraction and the subdomain merge heuristic.
//!
//! The merge keeps the last two labels of a hostname, or the last three when
//! the last two form a known multi-label suffix such as `co.uk`. This only
//! approximates the public suffix list.

use crate::domain::model::OTHER_DOMAIN;
use std::collections::HashSet;
use url::Url;

pub const DEFAULT_SUFFIX_OVERRIDES: &[&str] = &[
    "co.uk", "ac.uk", "org.uk", "com.au", "net.au", "org.au", "co.jp", "ne.jp", "or.jp", "co.kr",
    "or.kr", "co.nz", "org.nz",
];

/// Two-label suffixes that should keep one more label when merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixOverrides {
    suffixes: HashSet<String>,
}

impl SuffixOverrides {
    pub fn new<I, T>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut overrides = Self {
            suffixes: HashSet::new(),
        };
        overrides.extend(suffixes);
        overrides
    }

    pub fn extend<I, T>(&mut self, suffixes: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.suffixes.extend(
            suffixes
                .into_iter()
                .map(|s| s.as_ref().trim().trim_matches('.').to_lowercase())
                .filter(|s| !s.is_empty()),
        );
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

impl Default for SuffixOverrides {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX_OVERRIDES)
    }
}

/// Lowercase hostname of `url`, or an empty string when it has none.
pub fn hostname_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_lowercase))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct DomainResolver {
    overrides: SuffixOverrides,
}

impl DomainResolver {
    pub fn new(overrides: SuffixOverrides) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &SuffixOverrides {
        &self.overrides
    }

    pub fn merge_domain(&self, hostname: &str) -> String {
        let labels: Vec<&str> = hostname.split('.').filter(|l| !l.is_empty()).collect();
        if labels.len() <= 2 {
            return hostname.to_string();
        }

        let n = labels.len();
        let last_two = labels[n - 2..].join(".");
        if self.overrides.contains(&last_two) && n >= 3 {
            labels[n - 3..].join(".")
        } else {
            last_two
        }
    }

    pub fn domain_key_for(&self, url: &str, should_merge: bool) -> String {
        let hostname = hostname_of(url);
        if hostname.is_empty() {
            return OTHER_DOMAIN.to_string();
        }
        if should_merge {
            self.merge_domain(&hostname)
        } else {
            hostname
        }
    }
}
