//! ViewFilter
//!
//! Derives the visible subset of conditions for the dashboard from a
//! navigation selection or a search query. Results are disposable borrows of
//! the catalog; nothing here mutates it.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Category, Condition, ReferenceTable, TableName};
use crate::error::{GuideError, Result};
use crate::search_index::SearchIndex;
use crate::sections::{GroupMembers, NavPage, CRITICAL_POINT};

/// A search result: the condition plus the category it was found under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub category: Category,
    pub condition: &'a Condition,
}

/// Outcome of a search. `EmptyQuery` means nothing was typed yet and is
/// distinct from `Results(vec![])`, which means nothing matched.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    EmptyQuery,
    Results(Vec<SearchHit<'a>>),
}

impl<'a> SearchOutcome<'a> {
    pub fn is_empty_query(&self) -> bool {
        matches!(self, SearchOutcome::EmptyQuery)
    }

    /// Hits, or an empty slice for `EmptyQuery`.
    pub fn hits(&self) -> &[SearchHit<'a>] {
        match self {
            SearchOutcome::EmptyQuery => &[],
            SearchOutcome::Results(hits) => hits,
        }
    }
}

/// Titled run of conditions on a dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup<'a> {
    pub title: Option<&'static str>,
    pub conditions: Vec<&'a Condition>,
}

/// Everything a dashboard page shows besides the chrome.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView<'a> {
    Overview {
        questions: &'a ReferenceTable,
        morphology: &'a ReferenceTable,
        critical_point: &'static str,
    },
    Conditions {
        category: Category,
        groups: Vec<ConditionGroup<'a>>,
    },
    QuickReference {
        pearls: &'a ReferenceTable,
        red_flags: &'a ReferenceTable,
        lab_tests: &'a ReferenceTable,
        treatments: &'a ReferenceTable,
    },
    /// The search page; its content comes from [`ViewFilter::search`].
    Search,
}

/// Read-only filter over one catalog and its search index.
#[derive(Debug, Clone, Copy)]
pub struct ViewFilter<'a> {
    catalog: &'a Catalog,
    index: &'a SearchIndex,
}

impl<'a> ViewFilter<'a> {
    pub fn new(catalog: &'a Catalog, index: &'a SearchIndex) -> Self {
        Self { catalog, index }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Conditions of `category`, in catalog order.
    pub fn by_category(&self, category: Category) -> Vec<&'a Condition> {
        self.catalog.conditions_by_category(category)
    }

    /// Whole-catalog, case-insensitive substring search over names and fact
    /// values. The query is matched exactly as typed; only the empty string
    /// is `EmptyQuery`.
    pub fn search(&self, query: &str) -> SearchOutcome<'a> {
        if query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let all = self.catalog.all_conditions();
        let hits: Vec<SearchHit<'a>> = self
            .index
            .search(query)
            .into_iter()
            .filter_map(|m| {
                all.get(m.position).map(|condition| SearchHit {
                    category: m.category,
                    condition,
                })
            })
            .collect();

        debug!(query, hits = hits.len(), "search");
        SearchOutcome::Results(hits)
    }

    /// Resolve the declared content of a navigation page.
    pub fn page(&self, page: NavPage) -> Result<PageView<'a>> {
        let catalog = self.catalog;
        let table = move |name: TableName| catalog.table(name);

        Ok(match page {
            NavPage::Overview => PageView::Overview {
                questions: table(TableName::DiagnosticQuestions)?,
                morphology: table(TableName::LesionMorphology)?,
                critical_point: CRITICAL_POINT,
            },
            NavPage::QuickReference => PageView::QuickReference {
                pearls: table(TableName::ClinicalPearls)?,
                red_flags: table(TableName::RedFlags)?,
                lab_tests: table(TableName::LabTests)?,
                treatments: table(TableName::Treatments)?,
            },
            NavPage::Search => PageView::Search,
            NavPage::Benign | NavPage::Infectious | NavPage::Other | NavPage::Malignant => {
                let category = page
                    .category()
                    .ok_or_else(|| GuideError::invalid_key("category page", page.label()))?;
                let mut groups = Vec::new();
                for group in page.groups() {
                    let conditions = match group.members {
                        GroupMembers::Category(category) => self.by_category(category),
                        GroupMembers::Ids(ids) => ids
                            .iter()
                            .map(|id| catalog.condition(id))
                            .collect::<Result<Vec<_>>>()?,
                    };
                    groups.push(ConditionGroup { title: group.title, conditions });
                }
                PageView::Conditions { category, groups }
            }
        })
    }

    /// (category, names) listing shown under the empty search prompt.
    pub fn listing(&self) -> Vec<(Category, Vec<&'a str>)> {
        Category::ALL
            .into_iter()
            .map(|c| {
                let names = self.by_category(c).into_iter().map(|x| x.name.as_str()).collect();
                (c, names)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_matched_literally() {
        let catalog = Catalog::neonatal().unwrap();
        let index = SearchIndex::build(&catalog);
        let filter = ViewFilter::new(&catalog, &index);

        // a lone space is a real query, and every condition has a multi-word fact
        let blank = filter.search(" ");
        assert!(!blank.is_empty_query());
        assert_eq!(blank.hits().len(), 21);

        // trailing space is part of the needle
        assert!(filter.search("milia ").hits().is_empty());
        assert_eq!(filter.search("milia").hits().len(), 1);
    }

    #[test]
    fn test_other_page_has_two_groups() {
        let catalog = Catalog::neonatal().unwrap();
        let index = SearchIndex::build(&catalog);
        let filter = ViewFilter::new(&catalog, &index);
        match filter.page(NavPage::Other).unwrap() {
            PageView::Conditions { category, groups } => {
                assert_eq!(category, Category::Other);
                assert_eq!(groups.len(), 2);
                assert_eq!(groups[0].conditions.len(), 4);
                assert_eq!(groups[1].conditions.len(), 2);
            }
            other => panic!("unexpected page view {other:?}"),
        }
    }

    #[test]
    fn test_listing_counts() {
        let catalog = Catalog::neonatal().unwrap();
        let index = SearchIndex::build(&catalog);
        let filter = ViewFilter::new(&catalog, &index);
        let counts: Vec<usize> = filter.listing().iter().map(|(_, n)| n.len()).collect();
        assert_eq!(counts, [8, 4, 6, 3]);
    }
}
