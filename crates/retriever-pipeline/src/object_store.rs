//! Object store adapters

use retriever_domain::traits::{ObjectStore, ObjectStoreError};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Object store backed by a directory tree
///
/// Each bucket is a directory directly under `root`; keys are paths relative
/// to their bucket.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory holding the buckets
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        let bucket_path = Path::new(bucket);
        let key_path = Path::new(key);

        // One plain directory name for the bucket, plain segments for the key
        let mut bucket_parts = bucket_path.components();
        match (bucket_parts.next(), bucket_parts.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return None,
        }
        if key.is_empty() || !key_path.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }

        Some(self.root.join(bucket_path).join(key_path))
    }
}

impl ObjectStore for FsObjectStore {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let not_found = || ObjectStoreError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };

        let path = self.resolve(bucket, key).ok_or_else(not_found)?;
        debug!("Reading object from {}", path.display());

        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(ObjectStoreError::Transient(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Object store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MemoryObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an object, replacing any previous contents
    pub fn insert(
        &mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) {
        self.objects.insert((bucket.into(), key.into()), body.into());
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| ObjectStoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}
