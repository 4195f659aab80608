//! Page extraction by deletion.
//!
//! The parsed source is cloned and every page that is not kept is removed
//! from the page tree. Kept pages are never re-encoded: their content
//! streams, fonts and images are copied verbatim, and attributes inherited
//! from intermediate `Pages` nodes keep resolving because the tree shape is
//! preserved. Orphaned objects are pruned afterwards.

use crate::error::{Error, Result};
use crate::loader::SourceDocument;
use crate::model::{Bucket, DerivedDocument};

/// Options for building derived documents.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Drop objects no longer reachable from the kept pages
    pub prune: bool,

    /// Flate-compress streams that are stored uncompressed
    pub compress: bool,
}

impl SplitOptions {
    /// Create new split options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable pruning of unreachable objects.
    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            prune: true,
            compress: false,
        }
    }
}

/// Builds standalone PDFs from a subset of source pages.
#[derive(Debug, Clone, Default)]
pub struct DocumentSplitter {
    options: SplitOptions,
}

impl DocumentSplitter {
    /// Create a splitter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter with custom options.
    pub fn with_options(options: SplitOptions) -> Self {
        Self { options }
    }

    /// Copy `pages` (1-based source indices) into a new document.
    ///
    /// The list is sorted ascending and de-duplicated first, so output order
    /// always follows source order. Fails with [`Error::PageRange`] if any
    /// index is outside the source and with [`Error::EmptySplit`] if no
    /// pages are given; the source is never modified.
    pub fn split(&self, source: &SourceDocument, pages: &[u32]) -> Result<DerivedDocument> {
        let mut keep = pages.to_vec();
        keep.sort_unstable();
        keep.dedup();

        if keep.is_empty() {
            return Err(Error::EmptySplit);
        }

        let page_count = source.page_count();
        if let Some(&bad) = keep.iter().find(|&&p| p == 0 || p > page_count) {
            return Err(Error::PageRange {
                page: bad,
                page_count,
            });
        }

        let mut doc = source.backend().raw_doc().clone();

        let drop: Vec<u32> = (1..=page_count)
            .filter(|p| keep.binary_search(p).is_err())
            .collect();
        if !drop.is_empty() {
            doc.delete_pages(&drop);
        }

        if self.options.prune {
            let pruned = doc.prune_objects();
            log::debug!("pruned {} unreachable objects", pruned.len());
        }
        if self.options.compress {
            doc.compress();
        }

        let remaining = doc.get_pages().len();
        if remaining != keep.len() {
            return Err(Error::PdfParse(format!(
                "page tree kept {} pages, expected {}",
                remaining,
                keep.len()
            )));
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        log::debug!(
            "split {} of {} pages ({} bytes)",
            keep.len(),
            page_count,
            bytes.len()
        );

        Ok(DerivedDocument::new(keep, bytes))
    }

    /// Split the pages of one bucket, tagging the result with the bucket.
    pub fn split_bucket(
        &self,
        source: &SourceDocument,
        bucket: Bucket,
        pages: &[u32],
    ) -> Result<DerivedDocument> {
        Ok(self.split(source, pages)?.for_bucket(bucket))
    }
}
