//! Page classification buckets.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Which pack a page belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Not sorted yet
    #[default]
    Unassigned,
    /// Teaching material
    Teaching,
    /// Exercise material
    Exercise,
}

impl Bucket {
    /// Buckets a page can be moved into.
    pub const TERMINAL: [Bucket; 2] = [Bucket::Teaching, Bucket::Exercise];

    /// Check if pages may be dropped into this bucket.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Bucket::Unassigned)
    }

    /// Lowercase name used in paths, logs and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Unassigned => "unassigned",
            Bucket::Teaching => "teaching",
            Bucket::Exercise => "exercise",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unassigned" => Ok(Bucket::Unassigned),
            "teaching" | "teach" => Ok(Bucket::Teaching),
            "exercise" | "exercises" => Ok(Bucket::Exercise),
            other => Err(Error::Other(format!("Unknown bucket: {}", other))),
        }
    }
}
