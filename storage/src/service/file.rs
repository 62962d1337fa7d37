//! Plain-file storage service.

use crate::error::FileStorageError;
use crate::key_provider::{DefaultFormDataFileKeyProvider, FormDataFileKeyProvider};
use crate::metadata::{BaseFileMetadata, UserMetadata};
use crate::repository::FileRepository;
use crate::types::FileObject;
use tracing::info;

/// Saves plain files and updates their attributes, by key or by
/// process-instance and file id.
#[derive(Clone, Debug)]
pub struct FileStorageService<R, K = DefaultFormDataFileKeyProvider> {
    repository: R,
    key_provider: K,
}

impl<R, K> FileStorageService<R, K>
where
    R: FileRepository,
    K: FormDataFileKeyProvider,
{
    pub fn new(repository: R, key_provider: K) -> Self {
        Self {
            repository,
            key_provider,
        }
    }

    pub fn key_provider(&self) -> &K {
        &self.key_provider
    }

    pub async fn save(
        &self,
        key: &str,
        file: FileObject,
    ) -> Result<BaseFileMetadata, FileStorageError> {
        info!(key, "Save file with key");
        let metadata = self.repository.put(key, file).await?;
        info!(key, "File was saved with key");
        Ok(metadata)
    }

    pub async fn save_by_ids(
        &self,
        process_instance_id: &str,
        file_id: &str,
        file: FileObject,
    ) -> Result<BaseFileMetadata, FileStorageError> {
        info!(process_instance_id, file_id, "Save file by process instance id and file id");
        let key = self.key_provider.generate_key(process_instance_id, file_id);
        self.save(&key, file).await
    }

    pub async fn set_user_metadata(
        &self,
        key: &str,
        user_metadata: UserMetadata,
    ) -> Result<BaseFileMetadata, FileStorageError> {
        info!(key, "Set user metadata to file with key");
        let metadata = self.repository.set_user_metadata(key, user_metadata).await?;
        info!(key, "User metadata saved");
        Ok(metadata)
    }

    pub async fn set_user_metadata_by_ids(
        &self,
        process_instance_id: &str,
        file_id: &str,
        user_metadata: UserMetadata,
    ) -> Result<BaseFileMetadata, FileStorageError> {
        info!(
            process_instance_id,
            file_id, "Set user metadata to file by process instance id and file id"
        );
        let key = self.key_provider.generate_key(process_instance_id, file_id);
        self.set_user_metadata(&key, user_metadata).await
    }
}
