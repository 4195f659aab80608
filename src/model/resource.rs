//! Resource records: one per completed sort-and-split session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when the save dialog is left empty.
pub const DEFAULT_TITLE: &str = "Lesson Pack";

/// Subject used when none is chosen.
pub const DEFAULT_SUBJECT: &str = "General";

/// User-entered details attached to a saved pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDetails {
    pub title: String,
    pub subject: String,
    pub grade: Option<String>,
    pub notes: String,
}

impl ResourceDetails {
    /// Create details with the given title and default subject.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the grade tag.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    /// Set free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Replace blank fields with their defaults; a blank grade becomes `None`.
    pub fn normalized(self) -> Self {
        let title = self.title.trim();
        let subject = self.subject.trim();
        Self {
            title: if title.is_empty() { DEFAULT_TITLE } else { title }.to_string(),
            subject: if subject.is_empty() { DEFAULT_SUBJECT } else { subject }.to_string(),
            grade: self
                .grade
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty()),
            notes: self.notes.trim().to_string(),
        }
    }
}

impl Default for ResourceDetails {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            grade: None,
            notes: String::new(),
        }
    }
}

/// A resource about to be inserted into the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    /// Owner the storage paths were namespaced under
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub title: String,
    pub subject: String,
    pub grade: Option<String>,
    pub notes: String,
    pub teaching_pack_url: Option<String>,
    pub exercise_pack_url: Option<String>,
}

impl NewResource {
    /// Build a record from normalized details and the uploaded locations.
    pub fn from_details(
        details: ResourceDetails,
        teaching_pack_url: Option<String>,
        exercise_pack_url: Option<String>,
    ) -> Self {
        let details = details.normalized();
        Self {
            owner: None,
            title: details.title,
            subject: details.subject,
            grade: details.grade,
            notes: details.notes,
            teaching_pack_url,
            exercise_pack_url,
        }
    }

    /// Set the owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Number of pack locations referenced (0..=2).
    pub fn location_count(&self) -> usize {
        self.teaching_pack_url.iter().count() + self.exercise_pack_url.iter().count()
    }
}

/// A resource as returned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResource {
    pub id: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub resource: NewResource,
}

impl StoredResource {
    /// Check if a teaching pack is linked.
    pub fn has_teaching_pack(&self) -> bool {
        self.resource.teaching_pack_url.is_some()
    }

    /// Check if an exercise pack is linked.
    pub fn has_exercise_pack(&self) -> bool {
        self.resource.exercise_pack_url.is_some()
    }
}
