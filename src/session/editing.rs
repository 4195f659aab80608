//! The editing session that owns the source document and its sort state.

use crate::error::{Error, Result};
use crate::loader::SourceDocument;
use crate::materialize::ResourceMaterializer;
use crate::model::{Bucket, ResourceDetails, StoredResource};

use super::event::{SavePlan, SortEvent, SortState, StepOutput};
use super::selection::{DragPayload, Selection};
use super::store::{AssignmentStore, AssignmentSummary};

/// One upload being sorted into packs.
///
/// Every state change goes through [`Session::dispatch`], so a failed event
/// (or a failed save) leaves assignments exactly as they were.
#[derive(Debug)]
pub struct Session {
    source: SourceDocument,
    state: SortState,
    saved: Option<StoredResource>,
}

impl Session {
    /// Start sorting `source`; every page begins unassigned.
    pub fn open(source: SourceDocument) -> Self {
        let state = SortState::new(source.page_count());
        Self {
            source,
            state,
            saved: None,
        }
    }

    /// Replace the document and start over.
    pub fn reload(&mut self, source: SourceDocument) {
        log::debug!("reloading session with {} pages", source.page_count());
        self.state = SortState::new(source.page_count());
        self.source = source;
        self.saved = None;
    }

    /// Apply one event.
    pub fn dispatch(&mut self, event: SortEvent) -> Result<StepOutput> {
        let step = self.state.reduce(&event)?;
        self.state = step.state;
        Ok(step.output)
    }

    /// Plain or modified click on a page.
    pub fn click(&mut self, page: u32, additive: bool) -> Result<()> {
        self.dispatch(SortEvent::PageClicked { page, additive })
            .map(|_| ())
    }

    /// Payload for a drag starting on `page`.
    pub fn drag_start(&mut self, page: u32) -> Result<DragPayload> {
        match self.dispatch(SortEvent::DragStarted { page })? {
            StepOutput::Payload(payload) => Ok(payload),
            _ => Ok(DragPayload::default()),
        }
    }

    /// Drop a payload on a bucket; returns the pages that changed bucket.
    pub fn drop_on(&mut self, payload: DragPayload, bucket: Bucket) -> Result<Vec<u32>> {
        match self.dispatch(SortEvent::DroppedOnBucket { payload, bucket })? {
            StepOutput::Moved(pages) => Ok(pages),
            _ => Ok(Vec::new()),
        }
    }

    /// Move pages directly, without going through a gesture.
    ///
    /// Unlike a drop, a page outside the document is an error here.
    pub fn move_pages(&mut self, pages: &[u32], bucket: Bucket) -> Result<Vec<u32>> {
        self.store().validate(pages)?;
        if pages.is_empty() {
            return Ok(Vec::new());
        }
        self.drop_on(DragPayload::new(pages.to_vec()), bucket)
    }

    /// Re-check readiness and persist both packs plus one resource record.
    ///
    /// On failure nothing about the sort changes, so the caller can retry.
    /// After a success every further save is refused until [`Session::reload`].
    pub fn save(
        &mut self,
        materializer: &ResourceMaterializer<'_>,
        details: &ResourceDetails,
    ) -> Result<StoredResource> {
        if let Some(saved) = &self.saved {
            return Err(Error::AlreadySaved(saved.id.clone()));
        }
        let plan = self.state.save_plan()?;
        let stored = materializer.materialize(&self.source, &plan, details)?;
        self.saved = Some(stored.clone());
        Ok(stored)
    }

    /// Pages planned for saving, if every page is sorted.
    pub fn save_plan(&self) -> Result<SavePlan> {
        self.state.save_plan()
    }

    /// Whether the save action should be enabled.
    pub fn can_save(&self) -> bool {
        self.saved.is_none() && self.state.store().is_ready()
    }

    /// End the session, dropping the source document.
    pub fn finish(self) -> Option<StoredResource> {
        self.saved
    }

    /// Source document.
    pub fn source(&self) -> &SourceDocument {
        &self.source
    }

    /// Current sort state.
    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Page assignments.
    pub fn store(&self) -> &AssignmentStore {
        self.state.store()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        self.state.selection()
    }

    /// Count of pages still unassigned.
    pub fn unassigned_count(&self) -> usize {
        self.store().unassigned_count()
    }

    /// Pages in `bucket`, ascending.
    pub fn pages_in(&self, bucket: Bucket) -> Vec<u32> {
        self.store().pages_in(bucket)
    }

    /// Pages still shown on the unassigned grid.
    pub fn visible_pages(&self) -> Vec<u32> {
        self.pages_in(Bucket::Unassigned)
    }

    /// Indicator counters.
    pub fn summary(&self) -> AssignmentSummary {
        self.store().summary()
    }

    /// Resource produced by the last successful save.
    pub fn saved(&self) -> Option<&StoredResource> {
        self.saved.as_ref()
    }
}
