//! Resource record collaborator.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::model::{NewResource, StoredResource};

use super::token::PathTokens;

/// Persists resource records.
pub trait ResourceStore: Send + Sync {
    /// Insert a record and return it as stored.
    fn insert(&self, resource: NewResource) -> Result<StoredResource>;

    /// All records, newest first.
    fn list(&self) -> Result<Vec<StoredResource>>;

    /// Look up one record by id.
    fn get(&self, id: &str) -> Result<Option<StoredResource>> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }
}

fn stamp(tokens: &PathTokens, resource: NewResource) -> StoredResource {
    StoredResource {
        id: tokens.next().to_string(),
        uploaded_at: Utc::now(),
        resource,
    }
}

fn newest_first(records: &mut [StoredResource]) {
    records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
}

/// In-process record store.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    records: Mutex<Vec<StoredResource>>,
    tokens: PathTokens,
}

impl MemoryResourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if no record was stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceStore for MemoryResourceStore {
    fn insert(&self, resource: NewResource) -> Result<StoredResource> {
        let stored = stamp(&self.tokens, resource);
        self.records
            .lock()
            .map_err(|_| Error::Record("record lock poisoned".into()))?
            .push(stored.clone());
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<StoredResource>> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| Error::Record("record lock poisoned".into()))?
            .clone();
        newest_first(&mut records);
        Ok(records)
    }
}

/// Records kept in a single JSON file (an array of resources).
#[derive(Debug)]
pub struct JsonResourceStore {
    path: PathBuf,
    lock: Mutex<()>,
    tokens: PathTokens,
}

impl JsonResourceStore {
    /// Use the JSON file at `path`; it is created on first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            tokens: PathTokens::new(),
        }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<StoredResource>> {
        match std::fs::read(&self.path) {
            Ok(data) if data.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(Error::Record(format!("{}: {}", self.path.display(), e))),
        }
    }

    fn write_all(&self, records: &[StoredResource]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&tmp, &json)?;
            std::fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| Error::Record(format!("{}: {}", self.path.display(), e)))
    }
}

impl ResourceStore for JsonResourceStore {
    fn insert(&self, resource: NewResource) -> Result<StoredResource> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Record("record lock poisoned".into()))?;
        let mut records = self.read_all()?;
        let stored = stamp(&self.tokens, resource);
        records.push(stored.clone());
        self.write_all(&records)?;
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<StoredResource>> {
        let mut records = self.read_all()?;
        newest_first(&mut records);
        Ok(records)
    }
}
