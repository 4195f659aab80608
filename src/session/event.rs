//! Sorting events and the reducer that applies them.
//!
//! UI toolkits translate their gestures into [`SortEvent`]s; [`SortState::reduce`]
//! is a pure function from (state, event) to the next state plus whatever
//! the caller has to act on.

use crate::error::{Error, Result};
use crate::model::Bucket;

use super::selection::{DragPayload, Selection};
use super::store::AssignmentStore;

/// A user gesture on the sorting screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortEvent {
    /// A page thumbnail was clicked; `additive` is set when Ctrl/Cmd was held.
    PageClicked { page: u32, additive: bool },
    /// A drag began on a page thumbnail.
    DragStarted { page: u32 },
    /// A drag payload was dropped on a bucket target.
    DroppedOnBucket { payload: DragPayload, bucket: Bucket },
    /// The save button was pressed.
    SaveRequested,
}

/// Pages to split per bucket, both ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavePlan {
    pub teaching: Vec<u32>,
    pub exercise: Vec<u32>,
}

impl SavePlan {
    /// Pages planned for `bucket`.
    pub fn pages(&self, bucket: Bucket) -> &[u32] {
        match bucket {
            Bucket::Teaching => &self.teaching,
            Bucket::Exercise => &self.exercise,
            Bucket::Unassigned => &[],
        }
    }

    /// Check if neither pack has pages.
    pub fn is_empty(&self) -> bool {
        self.teaching.is_empty() && self.exercise.is_empty()
    }
}

/// What the caller should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput {
    /// Nothing beyond the state change.
    None,
    /// Attach this payload to the drag.
    Payload(DragPayload),
    /// These pages changed bucket and leave the unassigned grid.
    Moved(Vec<u32>),
    /// The drop carried nothing usable and was ignored.
    Ignored,
    /// Every page is sorted; split and upload these.
    Ready(SavePlan),
}

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: SortState,
    pub output: StepOutput,
}

/// Page assignments plus the transient selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    store: AssignmentStore,
    selection: Selection,
}

impl SortState {
    /// Fresh state for a document with `page_count` pages.
    pub fn new(page_count: u32) -> Self {
        Self {
            store: AssignmentStore::new(page_count),
            selection: Selection::new(),
        }
    }

    /// Page assignments.
    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Pages planned for saving, if every page is sorted.
    pub fn save_plan(&self) -> Result<SavePlan> {
        let unassigned = self.store.unassigned_count();
        if unassigned > 0 || self.store.page_count() == 0 {
            return Err(Error::SaveNotReady { unassigned });
        }
        Ok(SavePlan {
            teaching: self.store.pages_in(Bucket::Teaching),
            exercise: self.store.pages_in(Bucket::Exercise),
        })
    }

    /// Apply `event` without touching `self`.
    pub fn reduce(&self, event: &SortEvent) -> Result<Step> {
        let mut next = self.clone();
        let output = match event {
            SortEvent::PageClicked { page, additive } => {
                next.store.validate(&[*page])?;
                next.selection.click(*page, *additive);
                StepOutput::None
            }
            SortEvent::DragStarted { page } => {
                next.store.validate(&[*page])?;
                StepOutput::Payload(next.selection.drag_payload(*page))
            }
            SortEvent::DroppedOnBucket { payload, bucket } => {
                if !bucket.is_terminal() {
                    return Err(Error::InvalidTarget(*bucket));
                }
                if payload.is_empty() {
                    StepOutput::Ignored
                } else {
                    match next.store.move_pages(payload.pages(), *bucket) {
                        Ok(moved) => {
                            next.selection.clear();
                            StepOutput::Moved(moved)
                        }
                        Err(Error::InvalidPageIndex { page, .. }) => {
                            log::warn!("ignoring drop with stale page {}", page);
                            // move_pages validates first, so the store is untouched
                            StepOutput::Ignored
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
            SortEvent::SaveRequested => StepOutput::Ready(next.save_plan()?),
        };
        Ok(Step {
            state: next,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_on(pages: &[u32], bucket: Bucket) -> SortEvent {
        SortEvent::DroppedOnBucket {
            payload: DragPayload::new(pages.to_vec()),
            bucket,
        }
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let state = SortState::new(3);
        let step = state.reduce(&drop_on(&[1], Bucket::Teaching)).unwrap();
        assert_eq!(state.store().unassigned_count(), 3);
        assert_eq!(step.state.store().unassigned_count(), 2);
        assert_eq!(step.output, StepOutput::Moved(vec![1]));
    }

    #[test]
    fn test_drop_clears_selection() {
        let state = SortState::new(4);
        let state = state
            .reduce(&SortEvent::PageClicked {
                page: 2,
                additive: false,
            })
            .unwrap()
            .state;
        let state = state
            .reduce(&SortEvent::PageClicked {
                page: 3,
                additive: true,
            })
            .unwrap()
            .state;

        let step = state.reduce(&SortEvent::DragStarted { page: 3 }).unwrap();
        let payload = match step.output {
            StepOutput::Payload(p) => p,
            other => panic!("expected payload, got {:?}", other),
        };
        assert_eq!(payload.pages(), &[2, 3]);

        let step = step
            .state
            .reduce(&SortEvent::DroppedOnBucket {
                payload,
                bucket: Bucket::Exercise,
            })
            .unwrap();
        assert!(step.state.selection().is_empty());
        assert_eq!(step.state.store().pages_in(Bucket::Exercise), vec![2, 3]);
    }

    #[test]
    fn test_empty_or_stale_drop_is_ignored() {
        let state = SortState::new(2);
        let step = state.reduce(&drop_on(&[], Bucket::Teaching)).unwrap();
        assert_eq!(step.output, StepOutput::Ignored);

        let step = state.reduce(&drop_on(&[1, 7], Bucket::Teaching)).unwrap();
        assert_eq!(step.output, StepOutput::Ignored);
        assert_eq!(step.state, state);
    }

    #[test]
    fn test_click_unknown_page_fails() {
        let state = SortState::new(2);
        assert!(matches!(
            state.reduce(&SortEvent::PageClicked {
                page: 3,
                additive: false
            }),
            Err(Error::InvalidPageIndex { page: 3, .. })
        ));
    }

    #[test]
    fn test_save_requires_all_sorted() {
        let state = SortState::new(3);
        let state = state.reduce(&drop_on(&[1], Bucket::Teaching)).unwrap().state;
        assert!(matches!(
            state.reduce(&SortEvent::SaveRequested),
            Err(Error::SaveNotReady { unassigned: 2 })
        ));

        let state = state.reduce(&drop_on(&[3, 2], Bucket::Exercise)).unwrap().state;
        let step = state.reduce(&SortEvent::SaveRequested).unwrap();
        assert_eq!(
            step.output,
            StepOutput::Ready(SavePlan {
                teaching: vec![1],
                exercise: vec![2, 3],
            })
        );
    }

    #[test]
    fn test_drop_on_unassigned_rejected() {
        let state = SortState::new(1);
        assert!(matches!(
            state.reduce(&drop_on(&[1], Bucket::Unassigned)),
            Err(Error::InvalidTarget(Bucket::Unassigned))
        ));
    }
}
