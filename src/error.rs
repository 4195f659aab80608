//! Error types for lessonpack.

use std::io;
use thiserror::Error;

use crate::model::Bucket;

/// Result type alias for lessonpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, sorting, splitting or saving packs.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version in the header is malformed.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing or serializing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A move or selection referenced a page that is not in the loaded document.
    #[error("Page {page} is not in the loaded document ({page_count} pages)")]
    InvalidPageIndex { page: u32, page_count: u32 },

    /// The splitter was given a page outside the source document.
    #[error("Page {page} is out of range (document has {page_count} pages)")]
    PageRange { page: u32, page_count: u32 },

    /// Pages can only be moved into a terminal bucket.
    #[error("Cannot move pages into the {0} bucket")]
    InvalidTarget(Bucket),

    /// The splitter was invoked without any pages.
    #[error("No pages selected for split")]
    EmptySplit,

    /// Save was requested while pages are still unassigned.
    #[error("{unassigned} page(s) still unassigned")]
    SaveNotReady { unassigned: usize },

    /// The session already produced a resource; reload to sort another upload.
    #[error("Already saved as resource {0}")]
    AlreadySaved(String),

    /// Both buckets were empty, nothing would be stored.
    #[error("Nothing to save: both packs are empty")]
    NothingToSave,

    /// The object storage collaborator rejected an upload.
    #[error("Upload of {path} failed: {reason}")]
    Upload { path: String, reason: String },

    /// The resource record collaborator failed.
    #[error("Resource record error: {0}")]
    Record(String),

    /// A page list string could not be parsed.
    #[error("Invalid page list: {0}")]
    InvalidPageList(String),

    /// A resource could not be scheduled.
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an upload failure for the given storage path.
    pub fn upload(path: impl Into<String>, reason: impl ToString) -> Self {
        Error::Upload {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure came from an external collaborator (storage or records)
    /// rather than from the page state or the document itself.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Error::Upload { .. } | Error::Record(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Record(err.to_string())
    }
}
