//! Error taxonomy for the study guide pipeline.
//!
//! - `InvalidKey`: lookup of an undeclared category, table, condition or page
//! - `InvalidContent`: the literal catalog broke one of its invariants
//! - `OutputSink`: the final document could not be created or written
//! - `Pdf` / `Render`: the in-memory document could not be assembled
//!
//! Missing images are not errors: see [`crate::assets::MissingAsset`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("unknown {kind} '{key}'")]
    InvalidKey { kind: &'static str, key: String },

    #[error("invalid catalog content: {0}")]
    InvalidContent(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot write document to {}: {source}", path.display())]
    OutputSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("cannot serialise document: {0}")]
    Render(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuideError {
    pub fn invalid_key(kind: &'static str, key: impl Into<String>) -> Self {
        GuideError::InvalidKey { kind, key: key.into() }
    }

    pub fn output_sink(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GuideError::OutputSink { path: path.into(), source }
    }

    /// True for errors caused by asking for something that was never declared.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, GuideError::InvalidKey { .. })
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
