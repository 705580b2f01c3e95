// Document output integration tests
//
// Parses the generated PDF back with lopdf and checks structure, text
// content, embedded figures and the atomic file writes of both exports.
// Run with: cargo test --test pdf_output_tests

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use lopdf::content::Content;
use lopdf::{Document, Object};

use neoderm_guide::{
    Catalog, DirImageLoader, DocumentConfig, GuideError, MarkdownFormatter, NullLoader,
    PdfRenderer, RenderPlan, RenderPlanBuilder,
};

fn plan_with(loader: &dyn neoderm_guide::ImageLoader, config: &DocumentConfig) -> RenderPlan {
    let catalog = Catalog::neonatal().unwrap();
    RenderPlanBuilder::new(&catalog, config, loader).build().unwrap()
}

/// Every text-showing operation in page order: (font resource, text).
fn text_runs(doc: &Document) -> Vec<(String, String)> {
    let mut runs = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let mut font = String::new();
        for op in &content.operations {
            match op.operator.as_str() {
                "Tf" => {
                    if let Some(Object::Name(name)) = op.operands.first() {
                        font = String::from_utf8_lossy(name).into_owned();
                    }
                }
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        runs.push((font.clone(), String::from_utf8_lossy(bytes).into_owned()));
                    }
                }
                _ => {}
            }
        }
    }
    runs
}

fn write_fixture_images(dir: &Path, catalog: &Catalog, skip: &str) {
    let img = RgbImage::from_pixel(40, 30, Rgb([200, 120, 110]));
    for condition in catalog.all_conditions() {
        if condition.id == skip {
            continue;
        }
        img.save_with_format(dir.join(&condition.image_ref), ImageFormat::Jpeg)
            .unwrap();
    }
}

#[test]
fn test_document_parses_with_metadata() {
    let config = DocumentConfig::default();
    let bytes = PdfRenderer::render_bytes(&plan_with(&NullLoader, &config), &config).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    assert!(doc.get_pages().len() >= 10);

    let info_ref = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_ref).unwrap();
    let title = info.get(b"Title").unwrap().as_str().unwrap();
    assert_eq!(title, b"Neonatal Rash and Dermatologic Problems");
    assert!(info.get(b"CreationDate").is_ok());
}

#[test]
fn test_condition_names_appear_in_order() {
    let config = DocumentConfig::default();
    let bytes = PdfRenderer::render_bytes(&plan_with(&NullLoader, &config), &config).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let runs = text_runs(&doc);

    let catalog = Catalog::neonatal().unwrap();
    let mut from = 0;
    for condition in catalog.all_conditions() {
        let offset = runs[from..]
            .iter()
            .position(|(font, text)| font == "F4" && text == &condition.name)
            .unwrap_or_else(|| panic!("{} not found after run {}", condition.name, from));
        from += offset + 1;
    }
}

#[test]
fn test_warning_facts_are_bold() {
    let config = DocumentConfig::default();
    let bytes = PdfRenderer::render_bytes(&plan_with(&NullLoader, &config), &config).unwrap();
    let runs = text_runs(&Document::load_mem(&bytes).unwrap());

    let warning = runs
        .iter()
        .find(|(_, text)| text.starts_with("Start acyclovir early"))
        .unwrap();
    assert_eq!(warning.0, "F2");
}

#[test]
fn test_figures_embedded_and_missing_one_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::neonatal().unwrap();
    write_fixture_images(dir.path(), &catalog, "milia");

    let config = DocumentConfig::default();
    let loader = DirImageLoader::new(dir.path());
    let plan = plan_with(&loader, &config);
    let bytes = PdfRenderer::render_bytes(&plan, &config).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    let images = doc
        .objects
        .values()
        .filter(|o| match o {
            Object::Stream(s) => s.dict.get(b"Subtype").and_then(|v| v.as_name()).ok() == Some(&b"Image"[..]),
            _ => false,
        })
        .count();
    assert_eq!(images, 20);

    // the condition without a photograph still prints its caption
    let runs = text_runs(&doc);
    assert!(runs.iter().any(|(_, t)| t.starts_with("Figure 4:")));
}

#[test]
fn test_write_to_path_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("guide.pdf");
    let config = DocumentConfig::default();

    PdfRenderer::write_to_path(&plan_with(&NullLoader, &config), &config, &out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    // no temporary siblings left behind
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no-such-dir").join("guide.pdf");
    let config = DocumentConfig::default();

    let err = PdfRenderer::write_to_path(&plan_with(&NullLoader, &config), &config, &out)
        .unwrap_err();
    assert!(matches!(err, GuideError::OutputSink { .. }));
    assert!(!out.exists());
}

#[test]
fn test_markdown_write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no-such-dir").join("guide.md");
    let config = DocumentConfig::default();

    let err = MarkdownFormatter::default()
        .write_to_path(&plan_with(&NullLoader, &config), &out)
        .unwrap_err();
    assert!(matches!(err, GuideError::OutputSink { .. }));
    assert!(!out.exists());
}

#[test]
fn test_markdown_write_replaces_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("guide.md");
    std::fs::write(&out, "stale export").unwrap();
    let config = DocumentConfig::default();

    MarkdownFormatter::default()
        .write_to_path(&plan_with(&NullLoader, &config), &out)
        .unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("---\ntitle: "));
    assert!(!text.contains("stale export"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_flagged_reference_row_is_bold() {
    let config = DocumentConfig::default();
    let bytes = PdfRenderer::render_bytes(&plan_with(&NullLoader, &config), &config).unwrap();
    let runs = text_runs(&Document::load_mem(&bytes).unwrap());

    let flagged = runs
        .iter()
        .find(|(_, text)| text.starts_with("Start acyclovir early, even before"))
        .unwrap();
    assert_eq!(flagged.0, "F2");

    // its row label and the neighbouring rows stay regular
    let label = runs.iter().find(|(_, text)| text == "HSV infection").unwrap();
    assert_eq!(label.0, "F1");
    let plain = runs
        .iter()
        .find(|(_, text)| text.starts_with("Local wound care"))
        .unwrap();
    assert_eq!(plain.0, "F1");
}
