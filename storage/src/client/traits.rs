//! Object storage trait definitions.

use super::types::{ObjectMetadata, ObjectStorageError, PutObject, StorageObject};
use crate::metadata::UserMetadata;
use std::collections::BTreeSet;
use std::future::Future;

/// Generic interface for an object store addressed by bucket and key.
///
/// Absence is reported through `Option` and empty collections, never through
/// [`ObjectStorageError::NotFound`], except for [`set_user_metadata`] which has
/// nothing to update when the object is missing.
///
/// [`set_user_metadata`]: ObjectStorage::set_user_metadata
pub trait ObjectStorage: Clone + Send + Sync + 'static {
    /// Stores the object, replacing any previous one under the same key, and
    /// returns the metadata the backend now reports for it.
    fn put(
        &self,
        bucket: &str,
        object: PutObject,
    ) -> impl Future<Output = Result<ObjectMetadata, ObjectStorageError>> + Send;

    fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<StorageObject>, ObjectStorageError>> + Send;

    /// Replaces the attribute map of an existing object, keeping its content.
    fn set_user_metadata(
        &self,
        bucket: &str,
        key: &str,
        user_metadata: UserMetadata,
    ) -> impl Future<Output = Result<ObjectMetadata, ObjectStorageError>> + Send;

    /// Missing keys are skipped, so the result may be shorter than `keys`.
    fn get_metadata_by_keys(
        &self,
        bucket: &str,
        keys: &BTreeSet<String>,
    ) -> impl Future<Output = Result<Vec<ObjectMetadata>, ObjectStorageError>> + Send;

    fn get_metadata_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<ObjectMetadata>, ObjectStorageError>> + Send;

    fn get_keys(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> impl Future<Output = Result<BTreeSet<String>, ObjectStorageError>> + Send;

    /// Deleting a key that does not exist succeeds.
    fn delete(
        &self,
        bucket: &str,
        keys: &BTreeSet<String>,
    ) -> impl Future<Output = Result<(), ObjectStorageError>> + Send;

    /// Whether the bucket can be reached with the current configuration.
    fn could_connect(&self, bucket: &str) -> impl Future<Output = bool> + Send;
}
