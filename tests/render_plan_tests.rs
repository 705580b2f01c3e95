// Render plan integration tests
//
// Document structure, figure numbering, graceful image degradation and
// content fidelity of the printed guide's block sequence.
// Run with: cargo test --test render_plan_tests

use std::collections::HashSet;
use std::sync::Arc;

use neoderm_guide::plan::TableStyle;
use neoderm_guide::{
    Block, Catalog, Category, DocumentConfig, ImageHandle, ImageLoader, NullLoader, RenderPlan,
    RenderPlanBuilder,
};

/// Resolves every image except the ones listed.
struct StubLoader {
    missing: HashSet<&'static str>,
}

impl StubLoader {
    fn all() -> Self {
        Self { missing: HashSet::new() }
    }

    fn without(image_ref: &'static str) -> Self {
        Self { missing: HashSet::from([image_ref]) }
    }
}

impl ImageLoader for StubLoader {
    fn load_image(&self, image_ref: &str) -> Option<ImageHandle> {
        if self.missing.contains(image_ref) {
            return None;
        }
        Some(ImageHandle {
            image_ref: image_ref.to_string(),
            width: 400,
            height: 300,
            jpeg: Arc::from(&b"\xff\xd8\xff\xd9"[..]),
        })
    }
}

fn build(catalog: &Catalog, loader: &dyn ImageLoader) -> RenderPlan {
    RenderPlanBuilder::new(catalog, &DocumentConfig::default(), loader)
        .build()
        .unwrap()
}

#[test]
fn test_plan_lists_21_conditions_in_figure_order() {
    let catalog = Catalog::neonatal().unwrap();
    let plan = build(&catalog, &NullLoader);

    let ids = plan.condition_ids();
    assert_eq!(ids.len(), 21);
    let expected: Vec<&str> = catalog.all_conditions().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, expected);

    let captions: Vec<&str> = plan
        .iter()
        .filter_map(|b| match b {
            Block::Caption { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(captions.len(), 21);
    for (i, caption) in captions.iter().enumerate() {
        assert!(caption.starts_with(&format!("Figure {}: ", i + 1)), "{caption}");
    }
}

#[test]
fn test_section_order() {
    let catalog = Catalog::neonatal().unwrap();
    let plan = build(&catalog, &NullLoader);

    let headings: Vec<&str> = plan
        .iter()
        .filter_map(|b| match b {
            Block::SectionHeading { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        headings,
        [
            "1. Overview and Diagnostic Approach",
            "2. Benign Skin Disorders (No Treatment Required)",
            "3. Infectious Causes of Rashes",
            "4. Rashes by Clinical Presentation",
            "5. Birthmarks and Vascular Lesions",
            "6. Malignant Transformation Risk",
            "7. Diagnostic Workup",
            "8. Treatment Summary",
            "9. Quick Reference Tables",
        ]
    );

    assert!(matches!(plan.blocks[0], Block::Cover { .. }));
    assert!(matches!(plan.blocks[1], Block::PageBreak));
    assert!(matches!(plan.blocks[2], Block::TableOfContents { .. }));
}

#[test]
fn test_condition_entry_layout() {
    let catalog = Catalog::neonatal().unwrap();
    let plan = build(&catalog, &StubLoader::all());

    let start = plan
        .iter()
        .position(|b| matches!(b, Block::ConditionHeading { condition_id, .. } if condition_id == "milia"))
        .unwrap();
    let kinds: Vec<&str> = plan.blocks[start..start + 4].iter().map(Block::kind).collect();
    assert_eq!(kinds, ["condition_heading", "image", "caption", "fact_table"]);
}

#[test]
fn test_missing_image_is_omitted_not_fatal() {
    let catalog = Catalog::neonatal().unwrap();
    let hsv = catalog.condition("hsv").unwrap();
    let plan = build(&catalog, &StubLoader::without("10_hsv.jpeg"));
    assert_eq!(hsv.image_ref, "10_hsv.jpeg");

    let images = plan.iter().filter(|b| matches!(b, Block::Image { .. })).count();
    assert_eq!(images, 20);

    let start = plan
        .iter()
        .position(|b| matches!(b, Block::ConditionHeading { condition_id, .. } if condition_id == "hsv"))
        .unwrap();
    let kinds: Vec<&str> = plan.blocks[start..start + 3].iter().map(Block::kind).collect();
    assert_eq!(kinds, ["condition_heading", "caption", "fact_table"]);
    assert_eq!(plan.fact_rows("hsv").unwrap().len(), hsv.facts.len());
}

#[test]
fn test_fact_tables_match_catalog_verbatim() {
    let catalog = Catalog::neonatal().unwrap();
    let plan = build(&catalog, &NullLoader);

    for condition in catalog.all_conditions() {
        let rows = plan.fact_rows(&condition.id).unwrap();
        let rendered: Vec<(&str, &str)> =
            rows.iter().map(|r| (r.label.as_str(), r.value.as_str())).collect();
        let authored: Vec<(&str, &str)> = condition
            .facts
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(rendered, authored, "{}", condition.id);
        assert!(rows.iter().zip(&condition.facts).all(|(r, f)| r.severity == f.severity));
    }
}

#[test]
fn test_reference_tables_copied_as_stored() {
    let catalog = Catalog::neonatal().unwrap();
    let plan = build(&catalog, &NullLoader);

    let mut seen = 0;
    for block in &plan {
        if let Block::ReferenceTable { table, headers, rows, style } = block {
            let stored = catalog.table(*table).unwrap();
            assert_eq!(headers, &stored.headers);
            assert_eq!(rows, &stored.rows);
            assert_eq!(*style, TableStyle::for_table(*table));
            seen += 1;
        }
    }
    assert_eq!(seen, 6);
}

#[test]
fn test_rebuild_is_deterministic() {
    let catalog = Catalog::neonatal().unwrap();
    let first = build(&catalog, &StubLoader::all());
    let second = build(&catalog, &StubLoader::all());
    assert_eq!(first, second);
}

#[test]
fn test_fact_table_style_by_category() {
    let catalog = Catalog::neonatal().unwrap();
    let plan = build(&catalog, &NullLoader);

    for block in &plan {
        if let Block::FactTable { condition_id, style, .. } = block {
            let category = catalog.condition(condition_id).unwrap().category;
            let alert = matches!(category, Category::Infectious | Category::Malignant);
            assert_eq!(*style == TableStyle::Alert, alert, "{condition_id}");
        }
    }
}

#[test]
fn test_cover_counts_photographs() {
    let catalog = Catalog::neonatal().unwrap();
    let plan = build(&catalog, &NullLoader);
    match &plan.blocks[0] {
        Block::Cover { title, highlight, .. } => {
            assert_eq!(title, "Neonatal Rash and Dermatologic Problems");
            assert_eq!(highlight, "Featuring 21 clinical photographs from the original textbook");
        }
        other => panic!("expected cover, got {}", other.kind()),
    }
}
