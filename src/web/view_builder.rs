// Catalog and ViewFilter results -> template view models

use crate::assets::DirImageLoader;
use crate::catalog::{Condition, ReferenceTable, Severity, TableName};
use crate::sections::NavPage;
use crate::view::{ConditionGroup, SearchOutcome, ViewFilter};

use super::view_models::{
    BannerView, CategoryListing, ConditionCard, FactView, GroupView, MorphologyCard, NavLink,
    RowView, SearchResultsView, TableView,
};

/// URL prefix the router serves the image directory under.
pub const IMAGE_ROUTE: &str = "/images";

pub struct ViewBuilder<'a> {
    images: &'a DirImageLoader,
}

impl<'a> ViewBuilder<'a> {
    pub fn new(images: &'a DirImageLoader) -> Self {
        Self { images }
    }

    pub fn nav(active: NavPage) -> Vec<NavLink> {
        NavPage::ALL
            .into_iter()
            .map(|page| NavLink {
                label: page.label(),
                href: page.path(),
                active: page == active,
            })
            .collect()
    }

    pub fn banner(page: NavPage) -> Option<BannerView> {
        page.banner().map(|b| BannerView { class: b.tone.css_class(), text: b.text })
    }

    /// Card for one condition. The image link is only emitted when the file
    /// is actually present.
    pub fn card(&self, condition: &Condition) -> ConditionCard {
        let image_url = self.images.exists(&condition.image_ref).then(|| {
            format!("{}/{}", IMAGE_ROUTE, urlencoding::encode(&condition.image_ref))
        });

        ConditionCard {
            id: condition.id.clone(),
            name: condition.name.clone(),
            category_class: condition.category.css_class(),
            category_title: condition.category.title(),
            image_url,
            caption: condition.figure_caption(),
            facts: condition
                .facts
                .iter()
                .map(|f| FactView {
                    label: f.label.clone(),
                    value: f.value.clone(),
                    warning: f.severity == Severity::Warning,
                })
                .collect(),
        }
    }

    pub fn groups(&self, groups: &[ConditionGroup<'_>]) -> Vec<GroupView> {
        groups
            .iter()
            .map(|g| GroupView {
                title: g.title.map(str::to_string),
                cards: g.conditions.iter().map(|c| self.card(c)).collect(),
            })
            .collect()
    }

    pub fn table(table: &ReferenceTable) -> TableView {
        TableView {
            title: table.title.clone(),
            headers: table.headers.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| RowView { cells: row.cells.clone(), warning: row.is_warning() })
                .collect(),
            alert: table.name == TableName::RedFlags,
        }
    }

    pub fn morphology_cards(table: &ReferenceTable) -> Vec<MorphologyCard> {
        table
            .rows
            .iter()
            .map(|row| {
                let cell = |i: usize| row.cells.get(i).cloned().unwrap_or_default();
                MorphologyCard { lesion: cell(0), description: cell(1), examples: cell(2) }
            })
            .collect()
    }

    pub fn search_results(&self, filter: &ViewFilter<'_>, query: &str) -> SearchResultsView {
        let outcome = filter.search(query);
        let listing = match outcome {
            SearchOutcome::EmptyQuery => filter
                .listing()
                .into_iter()
                .map(|(category, names)| CategoryListing {
                    title: category.title(),
                    count: names.len(),
                    names: names.into_iter().map(str::to_string).collect(),
                })
                .collect(),
            SearchOutcome::Results(_) => Vec::new(),
        };

        SearchResultsView {
            query: query.to_string(),
            empty_query: outcome.is_empty_query(),
            total_conditions: filter.catalog().len(),
            listing,
            cards: outcome.hits().iter().map(|hit| self.card(hit.condition)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::search_index::SearchIndex;

    #[test]
    fn test_nav_marks_active_page() {
        let nav = ViewBuilder::nav(NavPage::Other);
        assert_eq!(nav.len(), 7);
        let active: Vec<_> = nav.iter().filter(|l| l.active).map(|l| l.label).collect();
        assert_eq!(active, ["Other Conditions"]);
    }

    #[test]
    fn test_card_without_image_dir() {
        let catalog = Catalog::neonatal().unwrap();
        let loader = DirImageLoader::new("/nonexistent/neoderm");
        let builder = ViewBuilder::new(&loader);
        let card = builder.card(catalog.condition("hsv").unwrap());
        assert!(card.image_url.is_none());
        assert!(card.facts.iter().any(|f| f.warning && f.css_class() == "fact-warning"));
        assert!(card.caption.starts_with("Figure 10: "));
    }

    #[test]
    fn test_cards_carry_every_fact_in_order() {
        let catalog = Catalog::neonatal().unwrap();
        let loader = DirImageLoader::new("/nonexistent/neoderm");
        let builder = ViewBuilder::new(&loader);

        for condition in catalog.all_conditions() {
            let card = builder.card(condition);
            let shown: Vec<(&str, &str, bool)> = card
                .facts
                .iter()
                .map(|f| (f.label.as_str(), f.value.as_str(), f.warning))
                .collect();
            let authored: Vec<(&str, &str, bool)> = condition
                .facts
                .iter()
                .map(|f| (f.label.as_str(), f.value.as_str(), f.is_warning()))
                .collect();
            assert_eq!(shown, authored, "{}", condition.id);
        }
    }

    #[test]
    fn test_table_view_marks_warning_rows() {
        let catalog = Catalog::neonatal().unwrap();
        let view = ViewBuilder::table(catalog.table(TableName::Treatments).unwrap());
        let flagged: Vec<&str> = view
            .rows
            .iter()
            .filter(|r| r.warning)
            .map(|r| r.cells[0].as_str())
            .collect();
        assert_eq!(flagged, ["HSV infection"]);
        assert_eq!(view.rows[3].css_class(), "row-warning");
        assert_eq!(view.rows[0].css_class(), "row");
    }

    #[test]
    fn test_card_with_image() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::neonatal().unwrap();
        let milia = catalog.condition("milia").unwrap();
        std::fs::write(dir.path().join(&milia.image_ref), b"not decoded here").unwrap();

        let loader = DirImageLoader::new(dir.path());
        let card = ViewBuilder::new(&loader).card(milia);
        assert_eq!(card.image_url, Some(format!("/images/{}", milia.image_ref)));
    }

    #[test]
    fn test_search_results_states() {
        let catalog = Catalog::neonatal().unwrap();
        let index = SearchIndex::build(&catalog);
        let filter = ViewFilter::new(&catalog, &index);
        let loader = DirImageLoader::new("/nonexistent/neoderm");
        let builder = ViewBuilder::new(&loader);

        let empty = builder.search_results(&filter, "");
        assert!(empty.empty_query);
        assert_eq!(empty.total_conditions, 21);
        assert_eq!(empty.listing.len(), 4);
        let counts: Vec<(&str, usize)> = empty.listing.iter().map(|l| (l.title, l.count)).collect();
        assert_eq!(counts, [("Benign", 8), ("Infectious", 4), ("Other", 6), ("Malignant", 3)]);
        assert!(empty.listing.iter().all(|l| l.names.len() == l.count));

        let none = builder.search_results(&filter, "zzz-no-match");
        assert!(!none.empty_query);
        assert_eq!(none.summary(), "No matching conditions found");

        let some = builder.search_results(&filter, "candida");
        assert!(some.summary().starts_with("Found "));
        assert!(some.cards.iter().any(|c| c.name == "Congenital Cutaneous Candidiasis"));
    }
}
