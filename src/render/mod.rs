//! Presentation adapters for the printed guide.
//!
//! Each adapter maps RenderPlan blocks onto one output medium by dispatching
//! on the block kind. No adapter decides what content appears; that is fixed
//! by the plan.
//!
//! - `pdf`: paginated PDF through lopdf
//! - `markdown`: Markdown export (also feeds the dashboard's `/guide` page)
//! - `json`: the plan itself, serialised

pub mod json;
pub mod markdown;
pub mod pdf;
mod sink;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use pdf::PdfRenderer;

use crate::error::Result;
use crate::plan::{Block, RenderPlan};

/// Appends one block at a time to an output surface.
pub trait PresentationAdapter {
    type Output;

    fn render(&mut self, block: &Block) -> Result<()>;

    fn finish(self) -> Result<Self::Output>;
}

/// Feed every block of `plan`, in order, through `adapter`.
pub fn render_plan<A: PresentationAdapter>(plan: &RenderPlan, mut adapter: A) -> Result<A::Output> {
    for block in plan {
        adapter.render(block)?;
    }
    adapter.finish()
}
