//! Repository trait definitions.

use crate::client::ObjectStorageError;
use crate::metadata::{BaseFileMetadata, FileMetadata, UserMetadata};
use crate::types::{FileData, FileObject};
use std::collections::BTreeSet;
use std::future::Future;

/// Storage of plain files under caller-chosen keys.
pub trait FileRepository: Clone + Send + Sync + 'static {
    /// Writes content and metadata under `key`, consuming the file.
    fn put(
        &self,
        key: &str,
        file: FileObject,
    ) -> impl Future<Output = Result<BaseFileMetadata, ObjectStorageError>> + Send;

    /// Replaces the attribute map of the file at `key` without re-uploading it.
    fn set_user_metadata(
        &self,
        key: &str,
        user_metadata: UserMetadata,
    ) -> impl Future<Output = Result<BaseFileMetadata, ObjectStorageError>> + Send;
}

/// Storage of form-data files with lookup, listing and bulk deletion.
pub trait FormDataFileRepository: Clone + Send + Sync + 'static {
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<FileData>, ObjectStorageError>> + Send;

    fn put(
        &self,
        key: &str,
        file: FileData,
    ) -> impl Future<Output = Result<FileMetadata, ObjectStorageError>> + Send;

    /// Metadata of the keys that exist; missing keys are left out.
    fn get_metadata_by_keys(
        &self,
        keys: &BTreeSet<String>,
    ) -> impl Future<Output = Result<Vec<FileMetadata>, ObjectStorageError>> + Send;

    fn get_metadata_by_prefix(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<FileMetadata>, ObjectStorageError>> + Send;

    fn get_keys(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<BTreeSet<String>, ObjectStorageError>> + Send;

    fn delete(
        &self,
        keys: &BTreeSet<String>,
    ) -> impl Future<Output = Result<(), ObjectStorageError>> + Send;
}
