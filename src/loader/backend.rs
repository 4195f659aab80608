//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the page-level queries the loader
//! needs, isolating the concrete PDF library (lopdf) from the session and
//! the thumbnail pipeline.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::PageGeometry;

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Page trees deeper than this are treated as cyclic.
const MAX_TREE_DEPTH: usize = 32;

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return the page size and rotation, resolving inherited attributes.
    fn page_geometry(&self, page: PageId) -> Result<PageGeometry>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// PDF version string from the header.
    fn version(&self) -> String;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Direct access to the underlying `lopdf::Document`.
    ///
    /// The splitter clones this to build derived documents.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Look up an attribute on a page dictionary, walking up `Parent` links
    /// for inheritable keys (MediaBox, Rotate, Resources, CropBox).
    fn inherited<'a>(&'a self, page: PageId, key: &[u8]) -> Option<&'a Object> {
        let mut current: ObjectId = page;
        for _ in 0..MAX_TREE_DEPTH {
            let dict = self.doc.get_dictionary(current).ok()?;
            if let Ok(value) = dict.get(key) {
                return Some(self.resolve(value));
            }
            current = parent_of(dict)?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }

    fn stream_bytes(&self, id: ObjectId) -> Option<Vec<u8>> {
        let stream = self.doc.get_object(id).ok()?.as_stream().ok()?;
        if stream.dict.has(b"Filter") {
            stream.decompressed_content().ok()
        } else {
            Some(stream.content.clone())
        }
    }
}

fn parent_of(dict: &Dictionary) -> Option<ObjectId> {
    dict.get(b"Parent").and_then(Object::as_reference).ok()
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_geometry(&self, page: PageId) -> Result<PageGeometry> {
        let mut geometry = match self.inherited(page, b"MediaBox") {
            Some(Object::Array(rect)) if rect.len() >= 4 => {
                let coords: Vec<f32> = rect
                    .iter()
                    .take(4)
                    .map(|o| object_number(self.resolve(o)).unwrap_or(0.0))
                    .collect();
                PageGeometry::new(
                    (coords[2] - coords[0]).abs(),
                    (coords[3] - coords[1]).abs(),
                )
            }
            _ => PageGeometry::letter(),
        };

        if let Some(rotate) = self.inherited(page, b"Rotate").and_then(|o| o.as_i64().ok()) {
            geometry = geometry.with_rotation(rotate);
        }

        Ok(geometry)
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without Contents is blank
            Err(_) => return Ok(Vec::new()),
        };

        match self.resolve(contents) {
            Object::Stream(s) => Ok(if s.dict.has(b"Filter") {
                s.decompressed_content()
                    .map_err(|e| Error::PdfParse(e.to_string()))?
            } else {
                s.content.clone()
            }),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Some(data) = self.stream_bytes(*r) {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

/// Helper: extract a number from an integer or real object.
fn object_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_number() {
        assert_eq!(object_number(&Object::Integer(42)), Some(42.0));
        assert_eq!(object_number(&Object::Real(1.5)), Some(1.5));
        assert_eq!(object_number(&Object::Null), None);
    }

    #[test]
    fn test_load_garbage_fails() {
        assert!(LopdfBackend::load_bytes(b"%PDF-1.4\nnot really").is_err());
    }
}
