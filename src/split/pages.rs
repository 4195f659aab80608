//! Page list parsing for command line input.

use crate::error::{Error, Result};

/// Sorted, de-duplicated list of 1-based page indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageList(Vec<u32>);

impl PageList {
    /// Build from any order; sorts and removes duplicates.
    pub fn from_pages(pages: impl IntoIterator<Item = u32>) -> Self {
        let mut pages: Vec<u32> = pages.into_iter().collect();
        pages.sort_unstable();
        pages.dedup();
        Self(pages)
    }

    /// Parse a page list string (e.g., "3", "1-4", "1,3,5-7").
    ///
    /// An empty string yields an empty list. Page 0 and reversed ranges are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }

        let mut pages = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some((start, end)) = part.split_once('-') {
                let start = parse_page(start)?;
                let end = parse_page(end)?;
                if end < start {
                    return Err(Error::InvalidPageList(format!(
                        "range {} runs backwards",
                        part
                    )));
                }
                pages.extend(start..=end);
            } else {
                pages.push(parse_page(part)?);
            }
        }

        Ok(Self::from_pages(pages))
    }

    /// Page indices, ascending.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pages in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn parse_page(s: &str) -> Result<u32> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(0) => Err(Error::InvalidPageList("pages are numbered from 1".into())),
        Ok(page) => Ok(page),
        Err(_) => Err(Error::InvalidPageList(format!("not a page number: {:?}", s))),
    }
}

impl std::fmt::Display for PageList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        f.write_str(&parts.join(","))
    }
}
