//! Shared fixtures for the storage integration tests.
//!
//! - `RecordingObjectStorage` wraps the in-memory client and records every
//!   call, so tests can assert on what reached the backend.
//! - `FailingObjectStorage` fails every call, for error pass-through tests.

use attachments_storage::UserMetadata;
use attachments_storage::client::{
    MemoryObjectStorage, ObjectMetadata, ObjectStorage, ObjectStorageError, PutObject,
    StorageObject,
};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

pub const BUCKET: &str = "bucket";

/// A call that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Put {
        key: String,
        content_type: String,
        content_length: Option<u64>,
        user_metadata: UserMetadata,
    },
    Get(String),
    SetUserMetadata(String),
    MetadataByKeys(BTreeSet<String>),
    MetadataByPrefix(String),
    Keys(String),
    Delete(BTreeSet<String>),
}

#[derive(Clone, Default)]
pub struct RecordingObjectStorage {
    inner: MemoryObjectStorage,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().expect("lock poisoned").clear();
    }

    pub fn inner(&self) -> &MemoryObjectStorage {
        &self.inner
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

impl ObjectStorage for RecordingObjectStorage {
    async fn put(
        &self,
        bucket: &str,
        object: PutObject,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        self.record(Call::Put {
            key: object.key.clone(),
            content_type: object.content_type.clone(),
            content_length: object.content_length,
            user_metadata: object.user_metadata.clone(),
        });
        self.inner.put(bucket, object).await
    }

    async fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<StorageObject>, ObjectStorageError> {
        self.record(Call::Get(key.to_owned()));
        self.inner.get(bucket, key).await
    }

    async fn set_user_metadata(
        &self,
        bucket: &str,
        key: &str,
        user_metadata: UserMetadata,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        self.record(Call::SetUserMetadata(key.to_owned()));
        self.inner.set_user_metadata(bucket, key, user_metadata).await
    }

    async fn get_metadata_by_keys(
        &self,
        bucket: &str,
        keys: &BTreeSet<String>,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        self.record(Call::MetadataByKeys(keys.clone()));
        self.inner.get_metadata_by_keys(bucket, keys).await
    }

    async fn get_metadata_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        self.record(Call::MetadataByPrefix(prefix.to_owned()));
        self.inner.get_metadata_by_prefix(bucket, prefix).await
    }

    async fn get_keys(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<BTreeSet<String>, ObjectStorageError> {
        self.record(Call::Keys(prefix.to_owned()));
        self.inner.get_keys(bucket, prefix).await
    }

    async fn delete(&self, bucket: &str, keys: &BTreeSet<String>) -> Result<(), ObjectStorageError> {
        self.record(Call::Delete(keys.clone()));
        self.inner.delete(bucket, keys).await
    }

    async fn could_connect(&self, bucket: &str) -> bool {
        self.inner.could_connect(bucket).await
    }
}

#[derive(Clone, Default)]
pub struct FailingObjectStorage;

fn unavailable() -> ObjectStorageError {
    ObjectStorageError::Config("backend unavailable".to_owned())
}

impl ObjectStorage for FailingObjectStorage {
    async fn put(&self, _: &str, _: PutObject) -> Result<ObjectMetadata, ObjectStorageError> {
        Err(unavailable())
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<StorageObject>, ObjectStorageError> {
        Err(unavailable())
    }

    async fn set_user_metadata(
        &self,
        _: &str,
        _: &str,
        _: UserMetadata,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        Err(unavailable())
    }

    async fn get_metadata_by_keys(
        &self,
        _: &str,
        _: &BTreeSet<String>,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        Err(unavailable())
    }

    async fn get_metadata_by_prefix(
        &self,
        _: &str,
        _: &str,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        Err(unavailable())
    }

    async fn get_keys(&self, _: &str, _: &str) -> Result<BTreeSet<String>, ObjectStorageError> {
        Err(unavailable())
    }

    async fn delete(&self, _: &str, _: &BTreeSet<String>) -> Result<(), ObjectStorageError> {
        Err(unavailable())
    }

    async fn could_connect(&self, _: &str) -> bool {
        false
    }
}
