//! Page Assignment Store.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Bucket, Page};

/// Authoritative bucket for every page of the loaded document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentStore {
    // buckets[i] is the bucket of page i + 1
    buckets: Vec<Bucket>,
}

impl AssignmentStore {
    /// Create a store with pages `1..=page_count` unassigned.
    pub fn new(page_count: u32) -> Self {
        let mut store = Self::default();
        store.initialize(page_count);
        store
    }

    /// Reset so that pages `1..=page_count` are all unassigned.
    pub fn initialize(&mut self, page_count: u32) {
        self.buckets = vec![Bucket::Unassigned; page_count as usize];
    }

    /// Number of pages in the loaded document.
    pub fn page_count(&self) -> u32 {
        self.buckets.len() as u32
    }

    /// Check if `index` addresses a page of the loaded document.
    pub fn contains(&self, index: u32) -> bool {
        index >= 1 && index <= self.page_count()
    }

    /// Bucket of a single page.
    pub fn bucket_of(&self, index: u32) -> Option<Bucket> {
        if !self.contains(index) {
            return None;
        }
        self.buckets.get((index - 1) as usize).copied()
    }

    /// Move a batch of pages into `target`.
    ///
    /// Either every page moves or none does: an index outside the document
    /// fails with [`Error::InvalidPageIndex`] before anything changes.
    /// Pages can move between the two terminal buckets but never back to
    /// `unassigned`. Returns the pages whose bucket actually changed.
    pub fn move_pages(&mut self, pages: &[u32], target: Bucket) -> Result<Vec<u32>> {
        if !target.is_terminal() {
            return Err(Error::InvalidTarget(target));
        }
        self.validate(pages)?;

        let mut moved = Vec::new();
        for &page in pages {
            let slot = &mut self.buckets[(page - 1) as usize];
            if *slot != target {
                *slot = target;
                moved.push(page);
            }
        }
        moved.sort_unstable();
        moved.dedup();

        log::debug!("moved {:?} to {}", moved, target);
        Ok(moved)
    }

    /// Fail with [`Error::InvalidPageIndex`] on the first page not in the document.
    pub fn validate(&self, pages: &[u32]) -> Result<()> {
        match pages.iter().find(|&&p| !self.contains(p)) {
            Some(&page) => Err(Error::InvalidPageIndex {
                page,
                page_count: self.page_count(),
            }),
            None => Ok(()),
        }
    }

    /// Count of pages still unassigned.
    pub fn unassigned_count(&self) -> usize {
        self.count(Bucket::Unassigned)
    }

    /// Count of pages in `bucket`.
    pub fn count(&self, bucket: Bucket) -> usize {
        self.buckets.iter().filter(|&&b| b == bucket).count()
    }

    /// Pages in `bucket`, ascending by source index.
    pub fn pages_in(&self, bucket: Bucket) -> Vec<u32> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|&(_, b)| *b == bucket)
            .map(|(i, _)| i as u32 + 1)
            .collect()
    }

    /// Every page with its bucket, in source order.
    pub fn pages(&self) -> Vec<Page> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, &bucket)| Page {
                index: i as u32 + 1,
                bucket,
            })
            .collect()
    }

    /// Save is allowed only once nothing is left unassigned.
    pub fn is_ready(&self) -> bool {
        !self.buckets.is_empty() && self.unassigned_count() == 0
    }

    /// Snapshot of the per-bucket counters.
    pub fn summary(&self) -> AssignmentSummary {
        AssignmentSummary {
            total: self.page_count(),
            unassigned: self.unassigned_count(),
            teaching: self.count(Bucket::Teaching),
            exercise: self.count(Bucket::Exercise),
        }
    }
}

/// Counters shown next to the sorting grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentSummary {
    pub total: u32,
    pub unassigned: usize,
    pub teaching: usize,
    pub exercise: usize,
}

impl std::fmt::Display for AssignmentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unassigned: {} / {}", self.unassigned, self.total)
    }
}
