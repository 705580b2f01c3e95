//! PDF adapter
//!
//! Lays the plan out onto Letter or A4 pages with the standard Times faces
//! and assembles the document object graph with lopdf: one content stream per
//! page, a shared resource dictionary (fonts plus JPEG XObjects), the page
//! tree, the catalog and an info dictionary.
//!
//! The finished file is written through a temporary sibling and renamed into
//! place, so a failed run never leaves a truncated document behind.

mod layout;
mod metrics;

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info};

use self::layout::{Align, Canvas, Rgb, BLACK, WHITE};
use self::metrics::{text_width, to_win_ansi, wrap, Font};
use super::sink::write_atomic;
use super::{render_plan, PresentationAdapter};
use crate::assets::ImageHandle;
use crate::catalog::{Severity, TableName, TableRow};
use crate::config::DocumentConfig;
use crate::error::{GuideError, Result};
use crate::plan::{Block, FactRow, PlanMetadata, RenderPlan, TableStyle, TextStyle};
use crate::sections::TocEntry;

// ============================================================================
// Palette and geometry
// ============================================================================

const NAVY: Rgb = Rgb::hex(0x1F4E79);
const BLUE: Rgb = Rgb::hex(0x2E75B6);
const RED: Rgb = Rgb::hex(0xC00000);
const SLATE: Rgb = Rgb::hex(0x4A4A4A);
const CAPTION_GREY: Rgb = Rgb::hex(0x333333);
const GRID: Rgb = Rgb::hex(0x808080);
const STRIPE: Rgb = Rgb::hex(0xF5F5F5);
const ALERT_STRIPE: Rgb = Rgb::hex(0xFFF0F0);
const CALLOUT_FILL: Rgb = Rgb::hex(0xF0F7FF);

const POINTS_PER_INCH: f32 = 72.0;
const TABLE_MAX_WIDTH: f32 = 6.5 * POINTS_PER_INCH;
const FIGURE_WIDTH: f32 = 2.5 * POINTS_PER_INCH;
const KEEP_WITH_NEXT: f32 = 40.0;

const CELL_SIZE: f32 = 9.0;
const CELL_LEADING: f32 = 11.0;
const HEADER_SIZE: f32 = 10.0;
const HEADER_LEADING: f32 = 12.0;
const CELL_PADDING: f32 = 5.0;

const CALLOUT_INDENT: f32 = 15.0;
const CALLOUT_PADDING: f32 = 8.0;

/// Column widths in inches, scaled to the available width when drawn.
fn column_inches(table: TableName) -> &'static [f32] {
    match table {
        TableName::DiagnosticQuestions => &[1.8, 2.2, 2.5],
        TableName::LesionMorphology => &[1.3, 1.0, 4.2],
        TableName::LabTests => &[1.8, 2.0, 2.7],
        TableName::Treatments => &[2.0, 4.5],
        TableName::ClinicalPearls => &[2.2, 4.3],
        TableName::RedFlags => &[2.5, 4.0],
    }
}

const FACT_COLUMN_INCHES: [f32; 2] = [1.5, 5.0];

#[derive(Debug, Clone, Copy)]
struct ParagraphStyle {
    font: Font,
    size: f32,
    leading: f32,
    color: Rgb,
    align: Align,
    space_before: f32,
    space_after: f32,
    indent: f32,
}

impl ParagraphStyle {
    const fn new(font: Font, size: f32, leading: f32, color: Rgb) -> Self {
        Self {
            font,
            size,
            leading,
            color,
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
            indent: 0.0,
        }
    }

    const fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    const fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    const fn indented(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }
}

fn paragraph_style(style: TextStyle) -> ParagraphStyle {
    use ParagraphStyle as P;
    match style {
        TextStyle::Title => P::new(Font::Bold, 24.0, 30.0, NAVY).centered().spacing(0.0, 12.0),
        TextStyle::CoverSubtitle => {
            P::new(Font::Bold, 18.0, 22.0, BLUE).centered().spacing(0.0, 12.0)
        }
        TextStyle::SourceLine => P::new(Font::Regular, 14.0, 18.0, SLATE).centered().spacing(0.0, 24.0),
        TextStyle::CoverText => P::new(Font::Regular, 12.0, 16.0, BLACK).centered().spacing(0.0, 8.0),
        TextStyle::Section => P::new(Font::Bold, 16.0, 20.0, NAVY).spacing(18.0, 12.0),
        TextStyle::Subsection => P::new(Font::Bold, 13.0, 16.0, BLUE).spacing(12.0, 8.0),
        TextStyle::ConditionName => P::new(Font::BoldItalic, 13.0, 16.0, BLUE).spacing(12.0, 6.0),
        TextStyle::Body => P::new(Font::Regular, 11.0, 14.0, BLACK).spacing(0.0, 8.0),
        TextStyle::Caption => {
            P::new(Font::Italic, 10.0, 12.0, CAPTION_GREY).centered().spacing(4.0, 12.0)
        }
        TextStyle::TocEntry => P::new(Font::Bold, 12.0, 20.0, BLACK),
        TextStyle::TocSubEntry => P::new(Font::Regular, 11.0, 18.0, BLACK).indented(20.0),
    }
}

fn baseline(top: f32, size: f32, leading: f32) -> f32 {
    top - (leading - size) / 2.0 - size * 0.8
}

/// One table cell: text plus the face and colour it is drawn in.
struct Cell {
    text: String,
    font: Font,
    color: Rgb,
}

impl Cell {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), font: Font::Regular, color: BLACK }
    }

    fn emphasised(text: &str, severity: Severity) -> Self {
        match severity {
            Severity::Warning => Self { text: text.to_string(), font: Font::Bold, color: RED },
            Severity::Normal => Self::plain(text),
        }
    }

    fn fact_value(row: &FactRow) -> Self {
        Self::emphasised(&row.value, row.severity)
    }

    /// Leading cell stays plain; the rest carry the row's severity.
    fn reference_row(row: &TableRow) -> Vec<Self> {
        row.cells
            .iter()
            .enumerate()
            .map(|(i, text)| if i == 0 { Self::plain(text) } else { Self::emphasised(text, row.severity) })
            .collect()
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Presentation adapter producing PDF bytes.
pub struct PdfRenderer {
    doc: Document,
    canvas: Canvas,
    metadata: PlanMetadata,
    pages_id: ObjectId,
    xobjects: Dictionary,
    image_names: HashMap<String, String>, // image_ref -> XObject name
}

impl PdfRenderer {
    pub fn new(config: &DocumentConfig, metadata: PlanMetadata) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            canvas: Canvas::new(config),
            metadata,
            pages_id,
            xobjects: Dictionary::new(),
            image_names: HashMap::new(),
        }
    }

    /// Render `plan` to an in-memory PDF.
    pub fn render_bytes(plan: &RenderPlan, config: &DocumentConfig) -> Result<Vec<u8>> {
        render_plan(plan, Self::new(config, plan.metadata.clone()))
    }

    /// Render `plan` and write it to `path`. The file appears complete or
    /// not at all.
    pub fn write_to_path(plan: &RenderPlan, config: &DocumentConfig, path: &Path) -> Result<()> {
        let bytes = Self::render_bytes(plan, config)?;
        write_atomic(path, &bytes)
    }

    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    fn paragraph(&mut self, text: &str, style: ParagraphStyle, keep_with_next: f32) {
        let width = self.canvas.content_width() - style.indent;
        let lines = wrap(text, style.font, style.size, width);

        if !self.canvas.at_top() {
            self.canvas.advance(style.space_before);
        }
        self.canvas.ensure(style.leading + keep_with_next);

        for line in &lines {
            self.canvas.ensure(style.leading);
            let x = match style.align {
                Align::Left => self.canvas.left() + style.indent,
                Align::Center => {
                    let w = text_width(line, style.font, style.size);
                    self.canvas.left() + (self.canvas.content_width() - w).max(0.0) / 2.0
                }
            };
            let y = baseline(self.canvas.cursor(), style.size, style.leading);
            self.canvas.text(x, y, style.font, style.size, style.color, line);
            self.canvas.advance(style.leading);
        }
        self.canvas.advance(style.space_after);
    }

    fn heading(&mut self, text: &str, style: TextStyle) {
        self.paragraph(text, paragraph_style(style), KEEP_WITH_NEXT);
    }

    fn cover(&mut self, block: &Block) {
        let Block::Cover { title, subtitle, source_line, description, highlight } = block else {
            return;
        };
        self.canvas.advance(2.0 * POINTS_PER_INCH);
        self.paragraph(title, paragraph_style(TextStyle::Title), 0.0);
        self.canvas.advance(24.0);
        self.paragraph(&subtitle.to_uppercase(), paragraph_style(TextStyle::CoverSubtitle), 0.0);
        self.paragraph(source_line, paragraph_style(TextStyle::SourceLine), 0.0);
        self.canvas.advance(48.0);
        let text = paragraph_style(TextStyle::CoverText);
        self.paragraph(description, text, 0.0);
        self.paragraph(highlight, ParagraphStyle { font: Font::Bold, ..text }, 0.0);
    }

    fn table_of_contents(&mut self, heading: &str, entries: &[TocEntry]) {
        self.heading(heading, TextStyle::Section);
        for entry in entries {
            let style = if entry.level <= 1 { TextStyle::TocEntry } else { TextStyle::TocSubEntry };
            self.paragraph(entry.text, paragraph_style(style), 0.0);
        }
    }

    fn callout(&mut self, label: &str, text: &str) {
        let style = paragraph_style(TextStyle::Body);
        let box_width = self.canvas.content_width() - 2.0 * CALLOUT_INDENT;
        // headroom for the bold label
        let inner = box_width - 2.0 * CALLOUT_PADDING - 4.0;
        let lines = wrap(&format!("{label} {text}"), style.font, style.size, inner);
        let height = lines.len() as f32 * style.leading + 2.0 * CALLOUT_PADDING;

        if !self.canvas.at_top() {
            self.canvas.advance(6.0);
        }
        self.canvas.ensure(height);

        let x = self.canvas.left() + CALLOUT_INDENT;
        let top = self.canvas.cursor();
        self.canvas.fill_rect(x, top - height, box_width, height, CALLOUT_FILL);

        let mut line_top = top - CALLOUT_PADDING;
        for (i, line) in lines.iter().enumerate() {
            let y = baseline(line_top, style.size, style.leading);
            let text_x = x + CALLOUT_PADDING;
            match line.strip_prefix(label) {
                Some(rest) if i == 0 => {
                    self.canvas.text(text_x, y, Font::Bold, style.size, BLACK, label);
                    let offset = text_width(label, Font::Bold, style.size);
                    self.canvas.text(text_x + offset, y, style.font, style.size, BLACK, rest);
                }
                _ => self.canvas.text(text_x, y, style.font, style.size, BLACK, line),
            }
            line_top -= style.leading;
        }
        self.canvas.advance(height + 10.0);
    }

    // ------------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------------

    fn xobject_name(&mut self, image: &ImageHandle) -> String {
        if let Some(name) = self.image_names.get(&image.image_ref) {
            return name.clone();
        }
        let name = format!("Im{}", self.image_names.len() + 1);
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(image.width as i64),
                "Height" => Object::Integer(image.height as i64),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
                "Filter" => "DCTDecode",
            },
            image.jpeg.to_vec(),
        );
        let id = self.doc.add_object(stream);
        self.xobjects.set(name.clone(), id);
        self.image_names.insert(image.image_ref.clone(), name.clone());
        name
    }

    fn figure(&mut self, image: &ImageHandle) {
        let width = FIGURE_WIDTH.min(self.canvas.content_width());
        let height = image.scaled_height(width);
        if height <= 0.0 {
            return;
        }
        let name = self.xobject_name(image);

        if !self.canvas.at_top() {
            self.canvas.advance(4.0);
        }
        self.canvas.ensure(height);
        let x = self.canvas.left() + (self.canvas.content_width() - width) / 2.0;
        let y = self.canvas.cursor() - height;
        self.canvas.image(&name, x, y, width, height);
        self.canvas.advance(height);
        debug!(image = %image.image_ref, "figure placed");
    }

    // ------------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------------

    fn column_widths(&self, inches: &[f32]) -> Vec<f32> {
        let natural: f32 = inches.iter().sum::<f32>() * POINTS_PER_INCH;
        let target = TABLE_MAX_WIDTH.min(self.canvas.content_width());
        let scale = if natural > 0.0 { target / natural } else { 1.0 };
        inches.iter().map(|w| w * POINTS_PER_INCH * scale).collect()
    }

    fn table(&mut self, widths: &[f32], headers: &[String], rows: &[Vec<Cell>], style: TableStyle) {
        let (header_fill, stripe) = match style {
            TableStyle::Standard => (NAVY, STRIPE),
            TableStyle::Accent => (BLUE, STRIPE),
            TableStyle::Alert => (RED, ALERT_STRIPE),
        };
        let header: Vec<Cell> = headers
            .iter()
            .map(|h| Cell { text: h.clone(), font: Font::Bold, color: WHITE })
            .collect();
        let header_height = self.row_height(widths, &header, HEADER_SIZE, HEADER_LEADING);

        if !self.canvas.at_top() {
            self.canvas.advance(6.0);
        }
        let first = rows
            .first()
            .map(|r| self.row_height(widths, r, CELL_SIZE, CELL_LEADING))
            .unwrap_or(0.0);
        self.canvas.ensure(header_height + first);
        self.row(widths, &header, header_fill, HEADER_SIZE, HEADER_LEADING);

        for (i, cells) in rows.iter().enumerate() {
            let height = self.row_height(widths, cells, CELL_SIZE, CELL_LEADING);
            if self.canvas.ensure(height) {
                self.row(widths, &header, header_fill, HEADER_SIZE, HEADER_LEADING);
            }
            let fill = if i % 2 == 0 { WHITE } else { stripe };
            self.row(widths, cells, fill, CELL_SIZE, CELL_LEADING);
        }
        self.canvas.advance(12.0);
    }

    fn row_height(&self, widths: &[f32], cells: &[Cell], size: f32, leading: f32) -> f32 {
        let lines = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| wrap(&cell.text, cell.font, size, w - 2.0 * CELL_PADDING).len())
            .max()
            .unwrap_or(1);
        lines as f32 * leading + 2.0 * CELL_PADDING
    }

    fn row(&mut self, widths: &[f32], cells: &[Cell], fill: Rgb, size: f32, leading: f32) {
        let height = self.row_height(widths, cells, size, leading);
        let total: f32 = widths.iter().sum();
        let top = self.canvas.cursor();
        let mut x = self.canvas.left() + (self.canvas.content_width() - total).max(0.0) / 2.0;

        self.canvas.fill_rect(x, top - height, total, height, fill);
        for (cell, width) in cells.iter().zip(widths) {
            let mut line_top = top - CELL_PADDING;
            for line in wrap(&cell.text, cell.font, size, width - 2.0 * CELL_PADDING) {
                let y = baseline(line_top, size, leading);
                self.canvas.text(x + CELL_PADDING, y, cell.font, size, cell.color, &line);
                line_top -= leading;
            }
            self.canvas.stroke_rect(x, top - height, *width, height, 0.5, GRID);
            x += width;
        }
        self.canvas.advance(height);
    }

    // ------------------------------------------------------------------------
    // Assembly
    // ------------------------------------------------------------------------

    fn assemble(mut self) -> Result<Vec<u8>> {
        let (width, height) = (self.canvas.width, self.canvas.height);
        let page_count = self.canvas.page_count();
        let page_contents = self.canvas.into_pages();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            fonts.set(
                font.resource(),
                Object::Dictionary(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                }),
            );
        }
        let resources_id = self.doc.add_object(dictionary! {
            "Font" => Object::Dictionary(fonts),
            "XObject" => Object::Dictionary(self.xobjects),
        });

        let mut kids: Vec<Object> = Vec::with_capacity(page_contents.len());
        for page in page_contents {
            let content = Content { operations: page.operations };
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![Object::Integer(0), Object::Integer(0), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(page_count as i64),
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let created = Utc::now().format("D:%Y%m%d%H%M%S+00'00'").to_string();
        let info_id = self.doc.add_object(dictionary! {
            "Title" => text_string(&self.metadata.title),
            "Author" => text_string(&self.metadata.author),
            "Subject" => text_string(&self.metadata.subject),
            "Creator" => text_string("neoderm_guide"),
            "Producer" => text_string("lopdf"),
            "CreationDate" => text_string(&created),
        });
        self.doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| GuideError::Render(e.to_string()))?;

        info!(pages = page_count, images = self.image_names.len(), "PDF assembled");
        Ok(bytes)
    }
}

fn text_string(text: &str) -> Object {
    Object::String(to_win_ansi(text), StringFormat::Literal)
}

impl PresentationAdapter for PdfRenderer {
    type Output = Vec<u8>;

    fn render(&mut self, block: &Block) -> Result<()> {
        match block {
            Block::Cover { .. } => self.cover(block),
            Block::TableOfContents { heading, entries } => self.table_of_contents(heading, entries),
            Block::SectionHeading { text } => self.heading(text, TextStyle::Section),
            Block::SubsectionHeading { text } => self.heading(text, TextStyle::Subsection),
            Block::ConditionHeading { name, .. } => self.heading(name, TextStyle::ConditionName),
            Block::Paragraph { text, style } => self.paragraph(text, paragraph_style(*style), 0.0),
            Block::Callout { label, text } => self.callout(label, text),
            Block::Image { image } => self.figure(image),
            Block::Caption { text } => self.paragraph(text, paragraph_style(TextStyle::Caption), 0.0),
            Block::FactTable { headers, rows, style, .. } => {
                let widths = self.column_widths(&FACT_COLUMN_INCHES);
                let cells: Vec<Vec<Cell>> = rows
                    .iter()
                    .map(|row| vec![Cell { font: Font::Bold, ..Cell::plain(&row.label) }, Cell::fact_value(row)])
                    .collect();
                self.table(&widths, headers, &cells, *style);
            }
            Block::ReferenceTable { table, headers, rows, style } => {
                let widths = self.column_widths(column_inches(*table));
                let cells: Vec<Vec<Cell>> = rows.iter().map(Cell::reference_row).collect();
                self.table(&widths, headers, &cells, *style);
            }
            Block::PageBreak => self.canvas.break_page(),
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.assemble()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullLoader;
    use crate::catalog::Catalog;
    use crate::plan::RenderPlanBuilder;

    fn plan(config: &DocumentConfig) -> RenderPlan {
        let catalog = Catalog::neonatal().unwrap();
        RenderPlanBuilder::new(&catalog, config, &NullLoader).build().unwrap()
    }

    #[test]
    fn test_render_bytes_parses() {
        let config = DocumentConfig::default();
        let bytes = PdfRenderer::render_bytes(&plan(&config), &config).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 5);
    }

    #[test]
    fn test_a4_media_box() {
        let config = DocumentConfig { page_size: crate::config::PageSize::A4, ..Default::default() };
        let bytes = PdfRenderer::render_bytes(&plan(&config), &config).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[3].as_float().unwrap(), 842.0);
    }

    #[test]
    fn test_column_widths_fit_content() {
        let config = DocumentConfig {
            margins: crate::config::Margins::uniform(144.0),
            ..Default::default()
        };
        let renderer = PdfRenderer::new(&config, plan(&config).metadata);
        let widths = renderer.column_widths(&FACT_COLUMN_INCHES);
        let total: f32 = widths.iter().sum();
        assert!((total - (612.0 - 288.0)).abs() < 0.01);
        assert!(widths[0] < widths[1]);
    }
}
