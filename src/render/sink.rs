//! Atomic file output shared by the document adapters.
//!
//! Bytes go to a temporary sibling of the target, are synced, then renamed
//! over it. A failure at any step leaves the target untouched and the
//! temporary file is removed when it drops.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{GuideError, Result};

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let sink = |e| GuideError::output_sink(path, e);

    let mut tmp = NamedTempFile::new_in(dir).map_err(sink)?;
    tmp.write_all(bytes).map_err(sink)?;
    tmp.as_file().sync_all().map_err(sink)?;
    tmp.persist(path).map_err(|e| sink(e.error))?;

    info!(path = %path.display(), bytes = bytes.len(), "output written");
    Ok(())
}
