//! Image assets
//!
//! `load_image(ref)` resolves a condition's logical image reference to decoded
//! pixels. Absence is a normal outcome: loaders return `None`, log a
//! [`MissingAsset`] at warn level and let the caller omit the figure.
//!
//! Decoded images are normalised to baseline RGB JPEG so the PDF writer can
//! embed them as DCTDecode XObjects regardless of the source format.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, ImageReader};
use serde::Serialize;
use tracing::{debug, warn};

/// Decoded image ready for embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageHandle {
    pub image_ref: String,
    pub width: u32,
    pub height: u32,
    /// Baseline JPEG, RGB. Not serialised.
    #[serde(skip)]
    pub jpeg: Arc<[u8]>,
}

impl ImageHandle {
    /// Height when drawn `width` points wide.
    pub fn scaled_height(&self, width: f32) -> f32 {
        if self.width == 0 {
            return 0.0;
        }
        width * self.height as f32 / self.width as f32
    }
}

/// An image that could not be located or decoded. Logged, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAsset {
    pub image_ref: String,
    pub reason: String,
}

impl MissingAsset {
    fn new(image_ref: &str, reason: impl fmt::Display) -> Self {
        Self {
            image_ref: image_ref.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for MissingAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image '{}' unavailable: {}", self.image_ref, self.reason)
    }
}

/// Resolves logical image references.
pub trait ImageLoader: Send + Sync {
    fn load_image(&self, image_ref: &str) -> Option<ImageHandle>;
}

// ============================================================================
// Filesystem loader
// ============================================================================

/// Loads images from one flat directory.
#[derive(Debug, Clone)]
pub struct DirImageLoader {
    root: PathBuf,
}

impl DirImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when `image_ref` names a plain file under the root.
    pub fn exists(&self, image_ref: &str) -> bool {
        is_plain_name(image_ref) && self.root.join(image_ref).is_file()
    }

    fn try_load(&self, image_ref: &str) -> Result<ImageHandle, MissingAsset> {
        if !is_plain_name(image_ref) {
            return Err(MissingAsset::new(image_ref, "not a plain file name"));
        }
        let path = self.root.join(image_ref);
        if !path.is_file() {
            return Err(MissingAsset::new(
                image_ref,
                format_args!("{} not found", path.display()),
            ));
        }

        let decoded = ImageReader::open(&path)
            .map_err(|e| MissingAsset::new(image_ref, e))?
            .with_guessed_format()
            .map_err(|e| MissingAsset::new(image_ref, e))?
            .decode()
            .map_err(|e| MissingAsset::new(image_ref, e))?;

        let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
        let mut jpeg = Cursor::new(Vec::new());
        rgb.write_to(&mut jpeg, ImageFormat::Jpeg)
            .map_err(|e| MissingAsset::new(image_ref, e))?;

        debug!(image_ref, width = rgb.width(), height = rgb.height(), "image loaded");
        Ok(ImageHandle {
            image_ref: image_ref.to_string(),
            width: rgb.width(),
            height: rgb.height(),
            jpeg: Arc::from(jpeg.into_inner()),
        })
    }
}

impl ImageLoader for DirImageLoader {
    fn load_image(&self, image_ref: &str) -> Option<ImageHandle> {
        match self.try_load(image_ref) {
            Ok(handle) => Some(handle),
            Err(missing) => {
                warn!(
                    image_ref = %missing.image_ref,
                    reason = %missing.reason,
                    "MissingAsset: figure will be omitted"
                );
                None
            }
        }
    }
}

/// Loader that never resolves anything. Used where only the block structure
/// matters (JSON plan, Markdown preview).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLoader;

impl ImageLoader for NullLoader {
    fn load_image(&self, _image_ref: &str) -> Option<ImageHandle> {
        None
    }
}

fn is_plain_name(image_ref: &str) -> bool {
    !image_ref.is_empty()
        && !image_ref.contains(['/', '\\'])
        && image_ref != "."
        && image_ref != ".."
}
