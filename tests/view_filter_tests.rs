// ViewFilter integration tests
//
// Category partition, search semantics and the declared navigation pages.
// Run with: cargo test --test view_filter_tests

use std::collections::HashSet;

use neoderm_guide::sections::DOCUMENT_SECTIONS;
use neoderm_guide::view::PageView;
use neoderm_guide::{Catalog, Category, Condition, NavPage, SearchIndex, SearchOutcome, ViewFilter};

fn fixture() -> (Catalog, SearchIndex) {
    let catalog = Catalog::neonatal().unwrap();
    let index = SearchIndex::build(&catalog);
    (catalog, index)
}

fn names<'a>(outcome: &SearchOutcome<'a>) -> Vec<&'a str> {
    outcome.hits().iter().map(|h| h.condition.name.as_str()).collect()
}

#[test]
fn test_categories_partition_catalog() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);

    let mut seen = HashSet::new();
    let mut total = 0;
    for category in Category::ALL {
        for condition in filter.by_category(category) {
            assert_eq!(condition.category, category);
            assert!(seen.insert(condition.id.as_str()), "duplicate {}", condition.id);
            total += 1;
        }
    }
    assert_eq!(total, catalog.all_conditions().len());
    assert_eq!(total, 21);
}

#[test]
fn test_by_category_is_stable() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);
    for category in Category::ALL {
        assert_eq!(filter.by_category(category), filter.by_category(category));
    }
}

#[test]
fn test_search_candida() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);
    let outcome = filter.search("candida");
    assert!(names(&outcome).contains(&"Congenital Cutaneous Candidiasis"));
}

#[test]
fn test_empty_query_is_distinct_from_no_matches() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);

    let empty = filter.search("");
    assert_eq!(empty, SearchOutcome::EmptyQuery);

    let none = filter.search("zzz-no-match");
    assert_eq!(none, SearchOutcome::Results(Vec::new()));
    assert_ne!(empty, none);
}

#[test]
fn test_search_is_case_insensitive() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);
    let upper = filter.search("HSV");
    let lower = filter.search("hsv");
    assert_eq!(upper, lower);
    assert!(names(&lower).contains(&"Herpes Simplex Virus (HSV)"));
}

#[test]
fn test_search_results_in_catalog_order() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);

    let outcome = filter.search("a");
    let positions: Vec<usize> = outcome
        .hits()
        .iter()
        .map(|h| {
            catalog
                .all_conditions()
                .iter()
                .position(|c| c.id == h.condition.id)
                .unwrap()
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(outcome.hits().iter().all(|h| h.category == h.condition.category));
}

#[test]
fn test_labels_are_not_searchable() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);
    // only ever a fact label
    assert!(filter.search("Inheritance").hits().is_empty());
}

#[test]
fn test_category_pages_match_by_category() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);

    for page in [NavPage::Benign, NavPage::Infectious, NavPage::Malignant] {
        let PageView::Conditions { category, groups } = filter.page(page).unwrap() else {
            panic!("{page:?} is not a conditions page");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].conditions, filter.by_category(category));
    }
}

#[test]
fn test_other_page_groups_cover_category() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);

    let PageView::Conditions { groups, .. } = filter.page(NavPage::Other).unwrap() else {
        panic!("other is not a conditions page");
    };
    let titles: Vec<Option<&str>> = groups.iter().map(|g| g.title).collect();
    assert_eq!(
        titles,
        [Some("Scaling & Blistering Rashes"), Some("Vascular Birthmarks & Serious Lesions")]
    );

    let grouped: HashSet<&str> = groups
        .iter()
        .flat_map(|g| g.conditions.iter().map(|c| c.id.as_str()))
        .collect();
    let declared: HashSet<&str> = filter
        .by_category(Category::Other)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(grouped, declared);
}

#[test]
fn test_reference_pages() {
    let (catalog, index) = fixture();
    let filter = ViewFilter::new(&catalog, &index);

    match filter.page(NavPage::QuickReference).unwrap() {
        PageView::QuickReference { pearls, red_flags, lab_tests, treatments } => {
            assert_eq!(pearls.title, "Clinical Pearls");
            assert_eq!(red_flags.title, "Red Flags Requiring Immediate Action");
            assert_eq!(lab_tests.arity(), 3);
            assert_eq!(treatments.arity(), 2);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(filter.page(NavPage::Search).unwrap(), PageView::Search);
}

#[test]
fn test_document_and_dashboard_share_condition_set() {
    let (catalog, _) = fixture();
    let printed: HashSet<&str> = DOCUMENT_SECTIONS
        .iter()
        .flat_map(|s| s.condition_ids())
        .collect();
    let all: HashSet<&str> = catalog.all_conditions().iter().map(|c: &Condition| c.id.as_str()).collect();
    assert_eq!(printed, all);
}
