//! Form-data file repository.

use super::traits::FormDataFileRepository;
use crate::client::{ObjectMetadata, ObjectStorage, ObjectStorageError, PutObject, StorageObject};
use crate::metadata::{FileMetadata, UserMetadataView};
use crate::types::FileData;
use std::collections::BTreeSet;

/// [`FormDataFileRepository`] storing every file in one bucket of an
/// [`ObjectStorage`].
#[derive(Clone, Debug)]
pub struct BucketFormDataFileRepository<C> {
    bucket: String,
    client: C,
}

impl<C: ObjectStorage> BucketFormDataFileRepository<C> {
    pub fn new(bucket: impl Into<String>, client: C) -> Self {
        Self {
            bucket: bucket.into(),
            client,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn to_file_data(object: StorageObject) -> FileData {
    FileData::new(object.metadata.into(), object.content)
}

fn to_file_metadata_list(metadata: Vec<ObjectMetadata>) -> Vec<FileMetadata> {
    metadata.into_iter().map(FileMetadata::from).collect()
}

impl<C: ObjectStorage> FormDataFileRepository for BucketFormDataFileRepository<C> {
    #[tracing::instrument(name = "get_file", skip_all, fields(bucket = %self.bucket, key))]
    async fn get(&self, key: &str) -> Result<Option<FileData>, ObjectStorageError> {
        let object = self.client.get(&self.bucket, key).await?;
        Ok(object.map(to_file_data))
    }

    #[tracing::instrument(name = "put_file", skip_all, fields(bucket = %self.bucket, key))]
    async fn put(&self, key: &str, file: FileData) -> Result<FileMetadata, ObjectStorageError> {
        let FileData {
            mut metadata,
            content,
        } = file;
        metadata.set_id(Some(key.to_owned()));

        // the backend measures the content, a caller-side length is not sent
        let object = PutObject::new(key, content, metadata.content_type)
            .with_user_metadata(metadata.user_metadata);
        self.client
            .put(&self.bucket, object)
            .await
            .map(FileMetadata::from)
    }

    #[tracing::instrument(
        name = "get_files_metadata",
        skip_all,
        fields(bucket = %self.bucket, count = keys.len())
    )]
    async fn get_metadata_by_keys(
        &self,
        keys: &BTreeSet<String>,
    ) -> Result<Vec<FileMetadata>, ObjectStorageError> {
        let metadata = self.client.get_metadata_by_keys(&self.bucket, keys).await?;
        Ok(to_file_metadata_list(metadata))
    }

    #[tracing::instrument(
        name = "get_files_metadata_by_prefix",
        skip_all,
        fields(bucket = %self.bucket, prefix)
    )]
    async fn get_metadata_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<FileMetadata>, ObjectStorageError> {
        let metadata = self
            .client
            .get_metadata_by_prefix(&self.bucket, prefix)
            .await?;
        Ok(to_file_metadata_list(metadata))
    }

    #[tracing::instrument(
        name = "get_keys_by_prefix",
        skip_all,
        fields(bucket = %self.bucket, prefix)
    )]
    async fn get_keys(&self, prefix: &str) -> Result<BTreeSet<String>, ObjectStorageError> {
        self.client.get_keys(&self.bucket, prefix).await
    }

    #[tracing::instrument(
        name = "delete_files_by_keys",
        skip_all,
        fields(bucket = %self.bucket, count = keys.len())
    )]
    async fn delete(&self, keys: &BTreeSet<String>) -> Result<(), ObjectStorageError> {
        self.client.delete(&self.bucket, keys).await
    }
}
