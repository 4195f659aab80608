//! Source documents and the loader that produces them.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::detect::{sniff_bytes, sniff_path, PdfHeader};
use crate::error::{Error, Result};
use crate::model::PageGeometry;

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::options::LoadOptions;
use super::thumbnail::{Thumbnail, ThumbnailRenderer};

/// Opens uploaded PDFs.
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    options: LoadOptions,
}

impl DocumentLoader {
    /// Create a loader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom options.
    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Options this loader was configured with.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load a PDF file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<SourceDocument> {
        let path = path.as_ref();
        sniff_path(path)?;
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        self.load_named(bytes, name)
    }

    /// Load a PDF file without blocking the async runtime.
    #[cfg(feature = "async")]
    pub async fn load_file_async<P: AsRef<Path>>(&self, path: P) -> Result<SourceDocument> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        self.load_named(bytes, name)
    }

    /// Load a PDF from bytes.
    pub fn load_bytes(&self, bytes: impl Into<Vec<u8>>) -> Result<SourceDocument> {
        self.load_named(bytes.into(), None)
    }

    /// Load a PDF from a reader.
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<SourceDocument> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.load_named(data, None)
    }

    fn load_named(&self, bytes: Vec<u8>, name: Option<String>) -> Result<SourceDocument> {
        let header = sniff_bytes(&bytes)?;
        let backend = LopdfBackend::load_bytes(&bytes)?;

        if backend.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let page_ids = backend.pages();
        if page_ids.is_empty() {
            return Err(Error::PdfParse("document has no pages".to_string()));
        }

        log::debug!(
            "loaded {} ({}, {} pages, {} bytes)",
            name.as_deref().unwrap_or("<upload>"),
            header,
            page_ids.len(),
            bytes.len()
        );

        Ok(SourceDocument {
            name,
            header,
            bytes,
            backend,
            page_ids,
        })
    }
}

/// The uploaded document being sorted. Never mutated after loading.
pub struct SourceDocument {
    name: Option<String>,
    header: PdfHeader,
    bytes: Vec<u8>,
    backend: LopdfBackend,
    page_ids: BTreeMap<u32, PageId>,
}

impl SourceDocument {
    /// Number of pages (N); pages are addressed as 1..=N.
    pub fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    /// Check if `index` addresses a page of this document.
    pub fn contains(&self, index: u32) -> bool {
        self.page_ids.contains_key(&index)
    }

    /// File name, when loaded from disk.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Version declared in the file header.
    pub fn version(&self) -> &str {
        &self.header.version
    }

    /// Original bytes as uploaded.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size and rotation of a page.
    pub fn page_geometry(&self, index: u32) -> Result<PageGeometry> {
        self.backend.page_geometry(self.page_id(index)?)
    }

    /// Decompressed content stream of a page.
    pub fn page_content(&self, index: u32) -> Result<Vec<u8>> {
        self.backend.page_content(self.page_id(index)?)
    }

    /// Lazy sequence of page surfaces in page order.
    pub fn surfaces(&self) -> PageSurfaces<'_> {
        PageSurfaces {
            doc: self,
            next: 1,
        }
    }

    pub(crate) fn backend(&self) -> &LopdfBackend {
        &self.backend
    }

    fn page_id(&self, index: u32) -> Result<PageId> {
        self.page_ids
            .get(&index)
            .copied()
            .ok_or(Error::InvalidPageIndex {
                page: index,
                page_count: self.page_count(),
            })
    }
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("name", &self.name)
            .field("version", &self.header.version)
            .field("pages", &self.page_count())
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// A page that can be rendered on demand.
#[derive(Debug, Clone, Copy)]
pub struct PageSurface<'a> {
    doc: &'a SourceDocument,
    index: u32,
}

impl<'a> PageSurface<'a> {
    /// Page index (1-based).
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Page size and rotation.
    pub fn geometry(&self) -> Result<PageGeometry> {
        self.doc.page_geometry(self.index)
    }

    /// Rasterize this page with the given renderer.
    pub fn render(&self, renderer: &dyn ThumbnailRenderer, scale: f32) -> Result<Thumbnail> {
        renderer.render(self.doc, self.index, scale)
    }
}

/// Iterator over [`PageSurface`]s; nothing is rendered while iterating.
#[derive(Debug, Clone)]
pub struct PageSurfaces<'a> {
    doc: &'a SourceDocument,
    next: u32,
}

impl<'a> Iterator for PageSurfaces<'a> {
    type Item = PageSurface<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.doc.page_count() {
            return None;
        }
        let surface = PageSurface {
            doc: self.doc,
            index: self.next,
        };
        self.next += 1;
        Some(surface)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.doc.page_count() + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PageSurfaces<'_> {}
