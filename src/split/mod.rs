//! Document Splitter: builds standalone PDFs from a subset of source pages.

mod pages;
mod splitter;

pub use pages::PageList;
pub use splitter::{DocumentSplitter, SplitOptions};
