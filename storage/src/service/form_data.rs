//! Form-data file storage service.

use crate::error::{FileNotFound, FileStorageError};
use crate::key_provider::{DefaultFormDataFileKeyProvider, FormDataFileKeyProvider};
use crate::metadata::FileMetadata;
use crate::repository::FormDataFileRepository;
use crate::types::FileData;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Stores files attached to process instances.
#[derive(Clone, Debug)]
pub struct FormDataFileStorageService<R, K = DefaultFormDataFileKeyProvider> {
    repository: R,
    key_provider: K,
}

impl<R, K> FormDataFileStorageService<R, K>
where
    R: FormDataFileRepository,
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

    /// Loads the file stored under `key`.
    ///
    /// Fails with [`FileNotFound`] carrying `key` when nothing is stored there.
    pub async fn load_by_key(&self, key: &str) -> Result<FileData, FileStorageError> {
        info!(key, "Load file by key");
        let file = self
            .repository
            .get(key)
            .await?
            .ok_or_else(|| FileNotFound::new([key]))?;
        info!(key, "File was loaded by key");
        Ok(file)
    }

    /// Loads a file by the key derived from its process instance and id.
    ///
    /// Fails with [`FileNotFound`] carrying the file id, not the derived key.
    pub async fn load_by_process_instance_id_and_id(
        &self,
        process_instance_id: &str,
        id: &str,
    ) -> Result<FileData, FileStorageError> {
        info!(process_instance_id, file_id = id, "Load file by process instance id and file id");
        let key = self.key_provider.generate_key(process_instance_id, id);
        let file = self
            .repository
            .get(&key)
            .await?
            .ok_or_else(|| FileNotFound::new([id]))?;
        info!(key = %key, "File was loaded by key");
        Ok(file)
    }

    pub async fn save(&self, key: &str, file: FileData) -> Result<FileMetadata, FileStorageError> {
        info!(key, "Save file by key");
        let metadata = self.repository.put(key, file).await?;
        info!(key, "File was saved by key");
        Ok(metadata)
    }

    pub async fn save_by_ids(
        &self,
        process_instance_id: &str,
        file_id: &str,
        file: FileData,
    ) -> Result<FileMetadata, FileStorageError> {
        info!(process_instance_id, file_id, "Save file by process instance id and file id");
        let key = self.key_provider.generate_key(process_instance_id, file_id);
        self.save(&key, file).await
    }

    /// Metadata of the given files of a process instance.
    ///
    /// Succeeds with whatever subset exists. Fails with [`FileNotFound`]
    /// carrying every requested id only when none of them exists.
    pub async fn get_metadata(
        &self,
        process_instance_id: &str,
        file_ids: &BTreeSet<String>,
    ) -> Result<Vec<FileMetadata>, FileStorageError> {
        info!(process_instance_id, ?file_ids, "Get metadata by process instance id and file ids");
        let keys: BTreeSet<String> = file_ids
            .iter()
            .map(|id| self.key_provider.generate_key(process_instance_id, id))
            .collect();

        let metadata = self.repository.get_metadata_by_keys(&keys).await?;
        if metadata.is_empty() {
            return Err(FileNotFound::new(file_ids.iter().cloned()).into());
        }
        info!(?keys, found = metadata.len(), "Metadata was found by keys");
        Ok(metadata)
    }

    /// Metadata of every file attached to a process instance. No files is a
    /// valid, empty answer.
    pub async fn get_metadata_by_process_instance_id(
        &self,
        process_instance_id: &str,
    ) -> Result<Vec<FileMetadata>, FileStorageError> {
        let prefix = self
            .key_provider
            .key_prefix_by_process_instance_id(process_instance_id);
        info!(process_instance_id, prefix = %prefix, "Get metadata by process instance id");
        Ok(self.repository.get_metadata_by_prefix(&prefix).await?)
    }

    /// Deletes every file attached to a process instance in one batch.
    pub async fn delete_by_process_instance_id(
        &self,
        process_instance_id: &str,
    ) -> Result<(), FileStorageError> {
        let prefix = self
            .key_provider
            .key_prefix_by_process_instance_id(process_instance_id);
        info!(process_instance_id, prefix = %prefix, "Delete files by process instance id");

        let keys = self.repository.get_keys(&prefix).await?;
        if !keys.is_empty() {
            self.repository.delete(&keys).await?;
            debug!(process_instance_id, ?keys, "Deleted files from storage");
        }
        Ok(())
    }
}
