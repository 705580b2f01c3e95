//! Neonatal dermatology study guide
//!
//! One immutable catalog of 21 neonatal skin conditions and six reference
//! tables feeds two outputs:
//!
//! - the printed guide: `plan` turns the catalog plus the declared section
//!   plan into an ordered block list, which `render` lays out as PDF,
//!   Markdown or JSON
//! - the dashboard (feature `api`): `view` derives the visible conditions for
//!   a navigation page or search query, `web` renders them with askama and
//!   `api_server` serves both the pages and a JSON API
//!
//! Neither path mutates the catalog. Missing images are dropped with a
//! warning; they never fail a run.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod plan;
pub mod render;
pub mod search_index;
pub mod sections;
pub mod view;

#[cfg(feature = "api")]
pub mod web;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use assets::{DirImageLoader, ImageHandle, ImageLoader, MissingAsset, NullLoader};
pub use catalog::{Catalog, Category, Condition, Fact, ReferenceTable, Severity, TableName, TableRow};
pub use config::{DocumentConfig, Margins, PageSize, ServerConfig};
pub use error::{GuideError, Result};
pub use plan::{Block, RenderPlan, RenderPlanBuilder};
pub use render::{JsonFormatter, MarkdownFormatter, PdfRenderer, PresentationAdapter};
pub use search_index::SearchIndex;
pub use sections::NavPage;
pub use view::{SearchOutcome, ViewFilter};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
