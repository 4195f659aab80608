//! Document Loader: opens an uploaded PDF, counts its pages and hands out
//! lazily rendered page surfaces for the sorting grid.

mod backend;
mod options;
mod source;
mod thumbnail;

pub use backend::{LopdfBackend, PageId, PdfBackend};
pub use options::{ErrorMode, LoadOptions};
pub use source::{DocumentLoader, PageSurface, PageSurfaces, SourceDocument};
pub use thumbnail::{
    pixel_count, render_thumbnails, PlaceholderRenderer, Thumbnail, ThumbnailRenderer,
    MAX_THUMBNAIL_PIXELS,
};
