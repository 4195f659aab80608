//! Thumbnail rendering collaborator.
//!
//! Previews are for display only; splitting never looks at them. Real
//! rasterizers plug in through [`ThumbnailRenderer`].

use rayon::prelude::*;

use crate::error::{Error, Result};

use super::options::{ErrorMode, LoadOptions};
use super::source::SourceDocument;

/// A rasterized page preview (8-bit grayscale, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Page index (1-based)
    pub page: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel data, `width * height` bytes
    pub pixels: Vec<u8>,
}

impl Thumbnail {
    /// Size of the pixel buffer in bytes.
    pub fn size(&self) -> usize {
        self.pixels.len()
    }
}

/// Largest preview buffer a renderer will allocate (an 8192 x 8192 page).
pub const MAX_THUMBNAIL_PIXELS: u64 = 8192 * 8192;

/// Pixel count for a `width` x `height` preview, refusing oversized pages.
pub fn pixel_count(page: u32, width: u32, height: u32) -> Result<usize> {
    u64::from(width)
        .checked_mul(u64::from(height))
        .filter(|&n| n <= MAX_THUMBNAIL_PIXELS)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            Error::Other(format!(
                "page {} preview of {}x{} pixels is too large",
                page, width, height
            ))
        })
}

/// Renders one page of a source document at a fixed scale.
pub trait ThumbnailRenderer: Send + Sync {
    /// Render page `page` (1-based) at `scale` relative to 72 dpi.
    fn render(&self, doc: &SourceDocument, page: u32, scale: f32) -> Result<Thumbnail>;
}

/// Produces blank previews with the correct page proportions.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderRenderer {
    /// Fill value for every pixel
    pub background: u8,
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self { background: 0xFF }
    }
}

impl ThumbnailRenderer for PlaceholderRenderer {
    fn render(&self, doc: &SourceDocument, page: u32, scale: f32) -> Result<Thumbnail> {
        let (width, height) = doc.page_geometry(page)?.scaled(scale);
        let len = pixel_count(page, width, height)?;
        Ok(Thumbnail {
            page,
            width,
            height,
            pixels: vec![self.background; len],
        })
    }
}

/// Render previews for every page, ordered by page index.
///
/// In lenient mode a failing page is logged and left out of the result.
pub fn render_thumbnails(
    doc: &SourceDocument,
    renderer: &dyn ThumbnailRenderer,
    options: &LoadOptions,
) -> Result<Vec<Thumbnail>> {
    let scale = options.thumbnail_scale;
    let pages: Vec<u32> = doc.surfaces().map(|s| s.index()).collect();

    let rendered: Vec<(u32, Result<Thumbnail>)> = if options.parallel {
        pages
            .par_iter()
            .map(|&page| (page, renderer.render(doc, page, scale)))
            .collect()
    } else {
        pages
            .iter()
            .map(|&page| (page, renderer.render(doc, page, scale)))
            .collect()
    };

    let mut thumbnails = Vec::with_capacity(rendered.len());
    for (page, result) in rendered {
        match result {
            Ok(thumb) => thumbnails.push(thumb),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed rendering page {}: {}", page, e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(thumbnails)
}
