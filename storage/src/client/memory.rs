//! In-memory object storage.

use super::traits::ObjectStorage;
use super::types::{ObjectMetadata, ObjectStorageError, PutObject, StorageObject};
use crate::metadata::UserMetadata;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

type Bucket = BTreeMap<String, StorageObject>;

/// In-memory implementation of `ObjectStorage`, one ordered map per bucket.
///
/// Clones share the same underlying store.
#[derive(Clone, Debug, Default)]
pub struct MemoryObjectStorage {
    buckets: Arc<RwLock<HashMap<String, Bucket>>>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects stored in `bucket`.
    pub fn len(&self, bucket: &str) -> usize {
        self.buckets
            .read()
            .expect("lock poisoned")
            .get(bucket)
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, bucket: &str) -> bool {
        self.len(bucket) == 0
    }

    pub fn clear(&self) {
        self.buckets.write().expect("lock poisoned").clear();
    }
}

impl ObjectStorage for MemoryObjectStorage {
    async fn put(
        &self,
        bucket: &str,
        object: PutObject,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        object.check_content_length()?;

        let metadata = ObjectMetadata {
            content_length: object.content.len() as u64,
            content_type: object.content_type,
            user_metadata: object.user_metadata,
        };
        let stored = StorageObject {
            metadata: metadata.clone(),
            content: object.content,
        };

        self.buckets
            .write()
            .expect("lock poisoned")
            .entry(bucket.to_owned())
            .or_default()
            .insert(object.key, stored);
        Ok(metadata)
    }

    async fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<StorageObject>, ObjectStorageError> {
        let buckets = self.buckets.read().expect("lock poisoned");
        Ok(buckets.get(bucket).and_then(|b| b.get(key)).cloned())
    }

    async fn set_user_metadata(
        &self,
        bucket: &str,
        key: &str,
        user_metadata: UserMetadata,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        let mut buckets = self.buckets.write().expect("lock poisoned");
        let stored = buckets
            .get_mut(bucket)
            .and_then(|b| b.get_mut(key))
            .ok_or_else(|| ObjectStorageError::NotFound(key.to_owned()))?;

        stored.metadata.user_metadata = user_metadata;
        Ok(stored.metadata.clone())
    }

    async fn get_metadata_by_keys(
        &self,
        bucket: &str,
        keys: &BTreeSet<String>,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        let buckets = self.buckets.read().expect("lock poisoned");
        let Some(objects) = buckets.get(bucket) else {
            return Ok(Vec::new());
        };
        Ok(keys
            .iter()
            .filter_map(|key| objects.get(key))
            .map(|object| object.metadata.clone())
            .collect())
    }

    async fn get_metadata_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        let buckets = self.buckets.read().expect("lock poisoned");
        Ok(buckets
            .get(bucket)
            .into_iter()
            .flat_map(|objects| objects.iter())
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, object)| object.metadata.clone())
            .collect())
    }

    async fn get_keys(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<BTreeSet<String>, ObjectStorageError> {
        let buckets = self.buckets.read().expect("lock poisoned");
        Ok(buckets
            .get(bucket)
            .into_iter()
            .flat_map(|objects| objects.keys())
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete(&self, bucket: &str, keys: &BTreeSet<String>) -> Result<(), ObjectStorageError> {
        let mut buckets = self.buckets.write().expect("lock poisoned");
        if let Some(objects) = buckets.get_mut(bucket) {
            for key in keys {
                objects.remove(key);
            }
        }
        Ok(())
    }

    async fn could_connect(&self, _bucket: &str) -> bool {
        true
    }
}
