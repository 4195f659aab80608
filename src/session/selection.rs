//! Selection Set and drag payloads.

use std::collections::BTreeSet;

/// Pages highlighted for the next batch move. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pages: BTreeSet<u32>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `page`.
    ///
    /// Clicking a selected page deselects it. Otherwise a plain click makes
    /// `page` the only selection and a modified click adds it. Returns
    /// whether `page` is selected afterwards.
    pub fn click(&mut self, page: u32, additive: bool) -> bool {
        if self.pages.remove(&page) {
            return false;
        }
        if !additive {
            self.pages.clear();
        }
        self.pages.insert(page);
        true
    }

    /// What a drag starting on `origin` carries: the whole selection when
    /// `origin` is selected, otherwise just `origin`. The selection itself
    /// is left alone either way.
    pub fn drag_payload(&self, origin: u32) -> DragPayload {
        if self.pages.contains(&origin) {
            DragPayload(self.pages.iter().copied().collect())
        } else {
            DragPayload(vec![origin])
        }
    }

    /// Drop every selected page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Check if `page` is selected.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    /// Selected pages, ascending.
    pub fn pages(&self) -> Vec<u32> {
        self.pages.iter().copied().collect()
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Pages carried by a drag gesture.
///
/// On the wire (drag-and-drop transfer data) a payload is a comma-separated
/// list such as `"1,3,4"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPayload(Vec<u32>);

impl DragPayload {
    /// Payload carrying exactly `pages`.
    pub fn new(pages: impl Into<Vec<u32>>) -> Self {
        Self(pages.into())
    }

    /// Decode transfer data. Anything unparsable yields an empty payload,
    /// which a drop treats as a no-op.
    pub fn decode(transfer: &str) -> Self {
        let transfer = transfer.trim();
        if transfer.is_empty() {
            return Self::default();
        }
        let parsed: Result<Vec<u32>, _> = transfer
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect();
        match parsed {
            Ok(pages) => Self(pages),
            Err(e) => {
                log::warn!("ignoring drag payload {:?}: {}", transfer, e);
                Self::default()
            }
        }
    }

    /// Encode as transfer data.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Carried pages in gesture order.
    pub fn pages(&self) -> &[u32] {
        &self.0
    }

    /// Check if the payload carries nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
