//! Turns a finished sorting session into uploaded packs and one resource record.

use crate::error::{Error, Result};
use crate::loader::SourceDocument;
use crate::model::{Bucket, DerivedDocument, NewResource, ResourceDetails, StoredResource};
use crate::session::SavePlan;
use crate::split::{DocumentSplitter, SplitOptions};

use super::records::ResourceStore;
use super::storage::ObjectStorage;
use super::token::PathTokens;

/// Owner prefix used when none is configured.
pub const DEFAULT_OWNER: &str = "local";

/// Options for persisting packs.
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// First path segment of every upload (the account the packs belong to)
    pub owner: String,

    /// How derived documents are built
    pub split: SplitOptions,
}

impl MaterializeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the owner prefix.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Set split options.
    pub fn with_split_options(mut self, split: SplitOptions) -> Self {
        self.split = split;
        self
    }
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            split: SplitOptions::default(),
        }
    }
}

/// Content for a resource added without sorting.
#[derive(Debug, Clone, Copy)]
pub enum ExtraSource<'a> {
    /// An external link stored as-is
    Link(&'a str),
    /// A document uploaded whole
    Pdf(&'a SourceDocument),
}

/// Splits, uploads and records packs.
pub struct ResourceMaterializer<'a> {
    storage: &'a dyn ObjectStorage,
    records: &'a dyn ResourceStore,
    splitter: DocumentSplitter,
    options: MaterializeOptions,
    tokens: PathTokens,
}

impl<'a> ResourceMaterializer<'a> {
    /// Create a materializer with default options.
    pub fn new(storage: &'a dyn ObjectStorage, records: &'a dyn ResourceStore) -> Self {
        Self::with_options(storage, records, MaterializeOptions::default())
    }

    /// Create a materializer with custom options.
    pub fn with_options(
        storage: &'a dyn ObjectStorage,
        records: &'a dyn ResourceStore,
        options: MaterializeOptions,
    ) -> Self {
        Self {
            storage,
            records,
            splitter: DocumentSplitter::with_options(options.split.clone()),
            options,
            tokens: PathTokens::new(),
        }
    }

    /// Options in use.
    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Persist the packs described by `plan` and record one resource.
    ///
    /// Every non-empty bucket is split before anything is uploaded, so a
    /// bad page index never leaves a partial upload behind. The two uploads
    /// run concurrently; the record is only inserted after both succeed.
    pub fn materialize(
        &self,
        source: &SourceDocument,
        plan: &SavePlan,
        details: &ResourceDetails,
    ) -> Result<StoredResource> {
        if plan.is_empty() {
            return Err(Error::NothingToSave);
        }

        let teaching = self.split_if_any(source, Bucket::Teaching, plan)?;
        let exercise = self.split_if_any(source, Bucket::Exercise, plan)?;

        let token = self.tokens.next_path();
        let (teaching_url, exercise_url) = rayon::join(
            || self.upload_pack(&token, teaching.as_ref()),
            || self.upload_pack(&token, exercise.as_ref()),
        );
        let teaching_url = teaching_url?;
        let exercise_url = exercise_url?;

        let record = NewResource::from_details(details.clone(), teaching_url, exercise_url)
            .with_owner(self.options.owner.clone());
        let stored = self.records.insert(record)?;

        log::info!(
            "saved resource {} ({} teaching / {} exercise pages)",
            stored.id,
            plan.teaching.len(),
            plan.exercise.len()
        );
        Ok(stored)
    }

    /// Record a resource that skips sorting: a link, or a whole document
    /// stored as the exercise pack.
    pub fn add_extra(
        &self,
        details: &ResourceDetails,
        source: ExtraSource<'_>,
    ) -> Result<StoredResource> {
        if details.title.trim().is_empty() {
            return Err(Error::Other("a title is required".into()));
        }

        let exercise_url = match source {
            ExtraSource::Link(link) => {
                let link = link.trim();
                if link.is_empty() {
                    return Err(Error::Other("provide a link or a PDF".into()));
                }
                link.to_string()
            }
            ExtraSource::Pdf(doc) => {
                let all: Vec<u32> = (1..=doc.page_count()).collect();
                let derived = self.splitter.split(doc, &all)?;
                let path = self.storage_path(&self.tokens.next_path(), "extra");
                self.store(&path, &derived)?
            }
        };

        let record = NewResource::from_details(details.clone(), None, Some(exercise_url))
            .with_owner(self.options.owner.clone());
        self.records.insert(record)
    }

    fn split_if_any(
        &self,
        source: &SourceDocument,
        bucket: Bucket,
        plan: &SavePlan,
    ) -> Result<Option<DerivedDocument>> {
        let pages = plan.pages(bucket);
        if pages.is_empty() {
            return Ok(None);
        }
        self.splitter.split_bucket(source, bucket, pages).map(Some)
    }

    fn upload_pack(&self, token: &str, doc: Option<&DerivedDocument>) -> Result<Option<String>> {
        let Some(doc) = doc else {
            return Ok(None);
        };
        let label = doc.bucket.unwrap_or(Bucket::Exercise).as_str();
        let path = self.storage_path(token, label);
        self.store(&path, doc).map(Some)
    }

    fn store(&self, path: &str, doc: &DerivedDocument) -> Result<String> {
        self.storage
            .upload(path, &doc.bytes, doc.mime_type())
            .map_err(|e| match e {
                Error::Upload { .. } => e,
                other => Error::upload(path, other),
            })
    }

    fn storage_path(&self, token: &str, label: &str) -> String {
        format!("{}/{}-{}.pdf", self.options.owner, token, label)
    }
}
