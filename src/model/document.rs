//! Documents produced by the splitter.

use super::Bucket;

/// A standalone PDF built from a subset of source pages.
#[derive(Debug, Clone)]
pub struct DerivedDocument {
    /// Bucket the pages were taken from, if produced for a sorting session
    pub bucket: Option<Bucket>,

    /// Source page indices, ascending; output page `n` is `pages[n - 1]`
    pub pages: Vec<u32>,

    /// Serialized PDF
    pub bytes: Vec<u8>,
}

impl DerivedDocument {
    /// Create a derived document.
    pub fn new(pages: Vec<u32>, bytes: Vec<u8>) -> Self {
        Self {
            bucket: None,
            pages,
            bytes,
        }
    }

    /// Tag the document with the bucket it was built for.
    pub fn for_bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    /// Number of pages in the output.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Source page that became output page `output_page` (1-indexed).
    pub fn source_page(&self, output_page: u32) -> Option<u32> {
        if output_page == 0 {
            return None;
        }
        self.pages.get((output_page - 1) as usize).copied()
    }

    /// Size of the serialized PDF in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// MIME type used when uploading.
    pub fn mime_type(&self) -> &'static str {
        "application/pdf"
    }
}
