//! Sorting session: page assignments, selection and the gesture reducer.

mod editing;
mod event;
mod selection;
mod store;

pub use editing::Session;
pub use event::{SavePlan, SortEvent, SortState, Step, StepOutput};
pub use selection::{DragPayload, Selection};
pub use store::{AssignmentStore, AssignmentSummary};
