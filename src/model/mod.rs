//! Data model shared by the loader, the sorting session and the materializer.
//!
//! Pages are identified by their 1-based position in the uploaded source
//! document; everything downstream (buckets, derived packs, stored resource
//! records) refers back to those positions.

mod bucket;
mod document;
mod page;
mod resource;

pub use bucket::Bucket;
pub use document::DerivedDocument;
pub use page::{Page, PageGeometry};
pub use resource::{
    NewResource, ResourceDetails, StoredResource, DEFAULT_SUBJECT, DEFAULT_TITLE,
};
