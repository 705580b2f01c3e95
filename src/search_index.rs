//! Substring search index over condition names and fact values
//!
//! Every condition contributes its lowercased name and each lowercased fact
//! value. Fact labels are not searchable. A query matches when its lowercased
//! form is a substring of any of those haystacks; no tokenising, no fuzzy
//! matching, no ranking. Results come back in catalog order.

use serde::Serialize;

use crate::catalog::{Catalog, Category};

/// Searchable text of one condition.
#[derive(Debug, Clone)]
struct IndexEntry {
    position: usize, // into Catalog::all_conditions()
    category: Category,
    name: String,
    values: Vec<String>,
}

impl IndexEntry {
    fn matches(&self, needle: &str) -> bool {
        self.name.contains(needle) || self.values.iter().any(|v| v.contains(needle))
    }
}

/// Case-insensitive substring index, built once from a catalog.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

/// Match position plus category, so callers need not look it up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMatch {
    pub position: usize,
    pub category: Category,
}

impl SearchIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let start = std::time::Instant::now();

        let entries: Vec<IndexEntry> = catalog
            .all_conditions()
            .iter()
            .enumerate()
            .map(|(position, condition)| IndexEntry {
                position,
                category: condition.category,
                name: normalize(&condition.name),
                values: condition.facts.iter().map(|f| normalize(&f.value)).collect(),
            })
            .collect();

        tracing::info!(
            "Search index built in {:?} ({} conditions, {} fact values)",
            start.elapsed(),
            entries.len(),
            entries.iter().map(|e| e.values.len()).sum::<usize>()
        );

        Self { entries }
    }

    /// Catalog positions whose name or any fact value contains `query`.
    ///
    /// The query is used as given; trimming and the empty-query state are the
    /// caller's concern. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<IndexMatch> {
        let needle = normalize(query);
        self.entries
            .iter()
            .filter(|e| e.matches(&needle))
            .map(|e| IndexMatch { position: e.position, category: e.category })
            .collect()
    }

    pub fn stats(&self) -> SearchIndexStats {
        SearchIndexStats {
            condition_count: self.entries.len(),
            value_count: self.entries.iter().map(|e| e.values.len()).sum(),
            indexed_bytes: self
                .entries
                .iter()
                .map(|e| e.name.len() + e.values.iter().map(String::len).sum::<usize>())
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchIndexStats {
    pub condition_count: usize,
    pub value_count: usize,
    pub indexed_bytes: usize,
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
}
