//! Page flow for the PDF adapter.
//!
//! `Canvas` owns a top-down cursor in PDF user space (origin bottom-left) and
//! one operation list per page. Callers reserve vertical space with
//! [`Canvas::ensure`] before drawing; anything that does not fit moves to a
//! fresh page.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use super::metrics::{to_win_ansi, Font};
use crate::config::{DocumentConfig, Margins};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub(crate) const fn hex(rgb: u32) -> Self {
        Rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    fn operands(&self) -> Vec<Object> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

pub(crate) const BLACK: Rgb = Rgb::hex(0x000000);
pub(crate) const WHITE: Rgb = Rgb::hex(0xffffff);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
}

/// Drawing operations of one page.
#[derive(Debug, Default)]
pub(crate) struct PageContent {
    pub operations: Vec<Operation>,
}

#[derive(Debug)]
pub(crate) struct Canvas {
    pub width: f32,
    pub height: f32,
    margins: Margins,
    pages: Vec<PageContent>,
    cursor: f32,
}

impl Canvas {
    pub(crate) fn new(config: &DocumentConfig) -> Self {
        let (width, height) = config.page_size.dimensions();
        Self {
            width,
            height,
            margins: config.margins,
            pages: vec![PageContent::default()],
            cursor: height - config.margins.top,
        }
    }

    pub(crate) fn left(&self) -> f32 {
        self.margins.left
    }

    pub(crate) fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// Current top of the free area.
    pub(crate) fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Vertical space left above the bottom margin.
    pub(crate) fn remaining(&self) -> f32 {
        self.cursor - self.margins.bottom
    }

    /// True when nothing has been placed on the current page yet.
    pub(crate) fn at_top(&self) -> bool {
        self.cursor >= self.height - self.margins.top
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Start a new page unless the current one is still empty.
    pub(crate) fn break_page(&mut self) {
        if self.at_top() {
            return;
        }
        self.pages.push(PageContent::default());
        self.cursor = self.height - self.margins.top;
    }

    /// Make sure `height` points fit; otherwise continue on a new page.
    /// Returns true if a page break happened.
    pub(crate) fn ensure(&mut self, height: f32) -> bool {
        if height <= self.remaining() || self.at_top() {
            return false;
        }
        self.break_page();
        true
    }

    pub(crate) fn advance(&mut self, dy: f32) {
        // space never carries over onto the next page
        self.cursor = (self.cursor - dy).max(self.margins.bottom);
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        let last = self.pages.len() - 1;
        &mut self.pages[last].operations
    }

    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("rg", color.operands()));
        ops.push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    pub(crate) fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line: f32, color: Rgb) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("w", vec![line.into()]));
        ops.push(Operation::new("RG", color.operands()));
        ops.push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// One run of text with its baseline at `y`.
    pub(crate) fn text(&mut self, x: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        if text.is_empty() {
            return;
        }
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource().as_bytes().to_vec()), size.into()],
        ));
        ops.push(Operation::new("rg", color.operands()));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Paint image XObject `name` into the box with lower-left corner (x, y).
    pub(crate) fn image(&mut self, name: &str, x: f32, y: f32, w: f32, h: f32) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![w.into(), 0.0.into(), 0.0.into(), h.into(), x.into(), y.into()],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
        ops.push(Operation::new("Q", vec![]));
    }

    pub(crate) fn into_pages(self) -> Vec<PageContent> {
        self.pages
    }
}
