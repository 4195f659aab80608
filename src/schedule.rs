//! Assigning a saved resource to a child's calendar.
//!
//! An assignment covers every day of a date range; each day becomes one
//! untimed event row referencing the resource.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{StoredResource, DEFAULT_SUBJECT};

/// The child a resource is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: Option<String>,
    pub name: String,
    pub grade: Option<String>,
}

impl Child {
    /// A child known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            grade: None,
        }
    }

    /// Set the record id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the grade.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }
}

/// One calendar event row, ready for the event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub title: String,
    pub child: String,
    pub child_id: Option<String>,
    pub grade: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub resource_id: String,
}

/// One event per day from `start` to `end`, both inclusive.
pub fn assignment_events(
    resource: &StoredResource,
    child: &Child,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<EventDraft>> {
    if child.name.trim().is_empty() {
        return Err(Error::InvalidAssignment("a child is required".into()));
    }
    if end < start {
        return Err(Error::InvalidAssignment(format!(
            "end date {} is before start date {}",
            end, start
        )));
    }

    let subject = if resource.resource.subject.trim().is_empty() {
        DEFAULT_SUBJECT.to_string()
    } else {
        resource.resource.subject.clone()
    };

    let mut events = Vec::new();
    let mut day = start;
    loop {
        events.push(EventDraft {
            owner: resource.resource.owner.clone(),
            title: resource.resource.title.clone(),
            child: child.name.clone(),
            child_id: child.id.clone(),
            grade: child.grade.clone().unwrap_or_default(),
            date: day,
            start_time: String::new(),
            end_time: String::new(),
            subject: subject.clone(),
            resource_id: resource.id.clone(),
        });
        if day == end {
            break;
        }
        day = day
            .succ_opt()
            .ok_or_else(|| Error::InvalidAssignment(format!("no day after {}", day)))?;
    }

    log::debug!(
        "assigned {} to {} for {} day(s)",
        resource.id,
        child.name,
        events.len()
    );
    Ok(events)
}
