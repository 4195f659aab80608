//! Object storage collaborator.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Binary object store with overwrite-if-exists uploads.
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `path`, replacing anything already there, and
    /// return the public URL of the stored object.
    fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String>;

    /// Public URL for `path`, whether or not it exists yet.
    fn public_url(&self, path: &str) -> String;
}

/// In-process storage, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored at `path`.
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().ok()?.get(path).cloned()
    }

    /// Stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    /// Check if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStorage for MemoryStorage {
    fn upload(&self, path: &str, bytes: &[u8], _content_type: &str) -> Result<String> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| Error::upload(path, "storage lock poisoned"))?;
        objects.insert(path.to_string(), bytes.to_vec());
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{}", path)
    }
}

/// Storage rooted in a local directory; URLs are `file://` URLs.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Store objects under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `path` below the root, refusing absolute paths and `..`.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let clean = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(Error::upload(path, "path must be relative and stay inside the storage root"));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStorage for LocalStorage {
    fn upload(&self, path: &str, bytes: &[u8], _content_type: &str) -> Result<String> {
        let target = self.resolve(path)?;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, bytes)
        };
        write().map_err(|e| Error::upload(path, e))?;
        log::debug!("stored {} ({} bytes)", target.display(), bytes.len());
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("file://{}", self.root.join(path).display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_upsert() {
        let storage = MemoryStorage::new();
        let url = storage.upload("u/1-teaching.pdf", b"one", "application/pdf").unwrap();
        assert_eq!(url, "memory://u/1-teaching.pdf");
        storage.upload("u/1-teaching.pdf", b"two", "application/pdf").unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("u/1-teaching.pdf").unwrap(), b"two");
    }

    #[test]
    fn test_local_storage_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let url = storage.upload("me/5-exercise.pdf", b"%PDF-1.4", "application/pdf").unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("me/5-exercise.pdf"));

        storage.upload("me/5-exercise.pdf", b"%PDF-1.7", "application/pdf").unwrap();
        let stored = std::fs::read(dir.path().join("me/5-exercise.pdf")).unwrap();
        assert_eq!(stored, b"%PDF-1.7");
    }

    #[test]
    fn test_local_storage_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.upload("../evil.pdf", b"x", "application/pdf").is_err());
        assert!(storage.upload("/etc/evil.pdf", b"x", "application/pdf").is_err());
        assert!(storage.upload("", b"x", "application/pdf").is_err());
    }
}
