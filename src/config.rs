//! Configuration for the document builder and the dashboard server.
//!
//! Recognised options only. Every field has a default; a JSON file named by
//! `GUIDE_CONFIG` may override any of them, and individual environment
//! variables override the file:
//!
//! | Variable                | Field             |
//! |-------------------------|-------------------|
//! | `GUIDE_OUTPUT`          | `output_path`     |
//! | `GUIDE_MARKDOWN_OUTPUT` | `markdown_output` |
//! | `GUIDE_IMAGE_DIR`       | `image_dir`       |
//! | `GUIDE_PAGE_SIZE`       | `page_size`       |
//! | `GUIDE_TITLE`           | `title`           |
//! | `GUIDE_AUTHOR`          | `author`          |
//!
//! Nothing here changes which content is rendered, only how and where.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

const POINTS_PER_INCH: f32 = 72.0;

// ============================================================================
// Page geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// (width, height) in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageSize::Letter => "Letter",
            PageSize::A4 => "A4",
        })
    }
}

impl FromStr for PageSize {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            other => Err(GuideError::InvalidConfig(format!(
                "unknown page size '{other}' (expected Letter or A4)"
            ))),
        }
    }
}

impl TryFrom<String> for PageSize {
    type Error = GuideError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PageSize> for String {
    fn from(size: PageSize) -> Self {
        size.to_string()
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(points: f32) -> Self {
        Self { top: points, right: points, bottom: points, left: points }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(0.75 * POINTS_PER_INCH)
    }
}

// ============================================================================
// Document configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub title: String,
    pub subtitle: String,
    pub source_line: String,
    pub author: String,
    pub subject: String,
    pub page_size: PageSize,
    pub margins: Margins,
    pub image_dir: PathBuf,
    pub output_path: PathBuf,
    pub markdown_output: Option<PathBuf>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Neonatal Rash and Dermatologic Problems".to_string(),
            subtitle: "Study Guide with Clinical Photographs".to_string(),
            source_line: "Based on Gomella's Neonatology, Chapter 80".to_string(),
            author: "Study Guide".to_string(),
            subject: "Neonatal Dermatology".to_string(),
            page_size: PageSize::Letter,
            margins: Margins::default(),
            image_dir: PathBuf::from("images"),
            output_path: PathBuf::from("Neonatal_Dermatology_Study_Guide.pdf"),
            markdown_output: None,
        }
    }
}

impl DocumentConfig {
    /// Defaults, then `GUIDE_CONFIG` file, then environment overrides.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("GUIDE_CONFIG") {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GuideError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            GuideError::InvalidConfig(format!("{}: {e}", path.display()))
        })
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("GUIDE_OUTPUT") {
            self.output_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("GUIDE_MARKDOWN_OUTPUT") {
            self.markdown_output = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("GUIDE_IMAGE_DIR") {
            self.image_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("GUIDE_PAGE_SIZE") {
            self.page_size = v.parse()?;
        }
        if let Some(v) = lookup("GUIDE_TITLE") {
            self.title = v;
        }
        if let Some(v) = lookup("GUIDE_AUTHOR") {
            self.author = v;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let (w, h) = self.page_size.dimensions();
        let m = &self.margins;
        let negative = [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0);
        if negative || m.left + m.right >= w || m.top + m.bottom >= h {
            return Err(GuideError::InvalidConfig(format!(
                "margins {m:?} leave no room on a {} page",
                self.page_size
            )));
        }
        Ok(())
    }

    /// Width available to content between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_size.dimensions().0 - self.margins.left - self.margins.right
    }
}

// ============================================================================
// Server configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub image_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000, image_dir: PathBuf::from("images") }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `PORT` falls back to 3000 when unset or unparsable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            image_dir: lookup("GUIDE_IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.image_dir),
        }
    }
}
