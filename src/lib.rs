//! # lessonpack
//!
//! Sort the pages of a PDF into a teaching pack and an exercise pack, then
//! save both as standalone documents linked from one resource record.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lessonpack::{
//!     Bucket, LessonPack, MemoryResourceStore, MemoryStorage, ResourceDetails,
//!     ResourceMaterializer,
//! };
//!
//! fn main() -> lessonpack::Result<()> {
//!     let mut session = LessonPack::new().open("worksheet.pdf")?;
//!
//!     session.move_pages(&[1, 2], Bucket::Teaching)?;
//!     session.move_pages(&[3, 4, 5, 6], Bucket::Exercise)?;
//!
//!     let storage = MemoryStorage::new();
//!     let records = MemoryResourceStore::new();
//!     let materializer = ResourceMaterializer::new(&storage, &records);
//!     let stored = session.save(&materializer, &ResourceDetails::new("Fractions"))?;
//!     println!("saved {}", stored.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page sorting**: click/drag gestures reduced into bucket assignments
//! - **Verbatim splitting**: derived packs keep page content, size and rotation
//! - **Pluggable persistence**: object storage and record store are traits
//! - **Parallel thumbnails**: Rayon renders page previews concurrently
//! - **Scheduling**: turn a saved resource into per-day calendar events

pub mod detect;
pub mod error;
pub mod loader;
pub mod materialize;
pub mod model;
pub mod schedule;
pub mod session;
pub mod split;

// Re-export commonly used types
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use loader::{
    render_thumbnails, DocumentLoader, ErrorMode, LoadOptions, PageSurface, PlaceholderRenderer,
    SourceDocument, Thumbnail, ThumbnailRenderer,
};
pub use materialize::{
    ExtraSource, JsonResourceStore, LocalStorage, MaterializeOptions, MemoryResourceStore,
    MemoryStorage, ObjectStorage, ResourceMaterializer, ResourceStore,
};
pub use model::{
    Bucket, DerivedDocument, NewResource, Page, PageGeometry, ResourceDetails, StoredResource,
    DEFAULT_SUBJECT, DEFAULT_TITLE,
};
pub use schedule::{assignment_events, Child, EventDraft};
pub use session::{
    AssignmentStore, AssignmentSummary, DragPayload, SavePlan, Selection, Session, SortEvent,
    SortState, StepOutput,
};
pub use split::{DocumentSplitter, PageList, SplitOptions};

use std::io::Read;
use std::path::Path;

/// Load a PDF file for sorting.
///
/// # Example
///
/// ```no_run
/// use lessonpack::load_file;
///
/// let doc = load_file("worksheet.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    DocumentLoader::new().load_file(path)
}

/// Load a PDF file with custom options.
pub fn load_file_with_options<P: AsRef<Path>>(
    path: P,
    options: LoadOptions,
) -> Result<SourceDocument> {
    DocumentLoader::with_options(options).load_file(path)
}

/// Load a PDF from bytes.
pub fn load_bytes(data: &[u8]) -> Result<SourceDocument> {
    DocumentLoader::new().load_bytes(data)
}

/// Load a PDF from a reader.
pub fn load_reader<R: Read>(reader: R) -> Result<SourceDocument> {
    DocumentLoader::new().load_reader(reader)
}

/// Build a standalone PDF from the given 1-based pages of a file.
///
/// # Example
///
/// ```no_run
/// use lessonpack::{split_file, PageList};
///
/// let pages = PageList::parse("1,3,5-7").unwrap();
/// let pack = split_file("worksheet.pdf", pages.as_slice()).unwrap();
/// std::fs::write("pack.pdf", &pack.bytes).unwrap();
/// ```
pub fn split_file<P: AsRef<Path>>(path: P, pages: &[u32]) -> Result<DerivedDocument> {
    let source = load_file(path)?;
    DocumentSplitter::new().split(&source, pages)
}

/// Builder for opening sorting sessions.
///
/// # Example
///
/// ```no_run
/// use lessonpack::LessonPack;
///
/// let session = LessonPack::new()
///     .lenient()
///     .with_thumbnail_scale(0.25)
///     .open("worksheet.pdf")?;
/// println!("{}", session.summary());
/// # Ok::<(), lessonpack::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LessonPack {
    load_options: LoadOptions,
}

impl LessonPack {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip pages whose thumbnails fail to render instead of failing.
    pub fn lenient(mut self) -> Self {
        self.load_options = self.load_options.lenient();
        self
    }

    /// Disable parallel thumbnail rendering.
    pub fn sequential(mut self) -> Self {
        self.load_options = self.load_options.sequential();
        self
    }

    /// Set the thumbnail scale.
    pub fn with_thumbnail_scale(mut self, scale: f32) -> Self {
        self.load_options = self.load_options.with_thumbnail_scale(scale);
        self
    }

    /// Load options in effect.
    pub fn load_options(&self) -> &LoadOptions {
        &self.load_options
    }

    /// Open a file and start a session.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Session> {
        let source = DocumentLoader::with_options(self.load_options.clone()).load_file(path)?;
        Ok(Session::open(source))
    }

    /// Start a session from uploaded bytes.
    pub fn open_bytes(&self, data: impl Into<Vec<u8>>) -> Result<Session> {
        let source = DocumentLoader::with_options(self.load_options.clone()).load_bytes(data)?;
        Ok(Session::open(source))
    }

    /// Render thumbnails for every page of `source` with these options.
    pub fn thumbnails(
        &self,
        source: &SourceDocument,
        renderer: &dyn ThumbnailRenderer,
    ) -> Result<Vec<Thumbnail>> {
        render_thumbnails(source, renderer, &self.load_options)
    }
}
