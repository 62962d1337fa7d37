//! Assembles storage services from configuration.

use crate::client::{
    MemoryObjectStorage, ObjectMetadata, ObjectStorage, ObjectStorageError, OpendalObjectStorage,
    PutObject, StorageObject,
};
use crate::config::Config;
use crate::key_provider::DefaultFormDataFileKeyProvider;
use crate::metadata::UserMetadata;
use crate::repository::{BucketFileRepository, BucketFormDataFileRepository};
use crate::service::{FileStorageService, FormDataFileStorageService};
use std::collections::BTreeSet;
use tracing::info;

/// The object storage selected by configuration.
#[derive(Clone, Debug)]
pub enum StorageClient {
    S3(OpendalObjectStorage),
    Memory(MemoryObjectStorage),
}

impl ObjectStorage for StorageClient {
    async fn put(
        &self,
        bucket: &str,
        object: PutObject,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        match self {
            Self::S3(client) => client.put(bucket, object).await,
            Self::Memory(client) => client.put(bucket, object).await,
        }
    }

    async fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<StorageObject>, ObjectStorageError> {
        match self {
            Self::S3(client) => client.get(bucket, key).await,
            Self::Memory(client) => client.get(bucket, key).await,
        }
    }

    async fn set_user_metadata(
        &self,
        bucket: &str,
        key: &str,
        user_metadata: UserMetadata,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        match self {
            Self::S3(client) => client.set_user_metadata(bucket, key, user_metadata).await,
            Self::Memory(client) => client.set_user_metadata(bucket, key, user_metadata).await,
        }
    }

    async fn get_metadata_by_keys(
        &self,
        bucket: &str,
        keys: &BTreeSet<String>,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        match self {
            Self::S3(client) => client.get_metadata_by_keys(bucket, keys).await,
            Self::Memory(client) => client.get_metadata_by_keys(bucket, keys).await,
        }
    }

    async fn get_metadata_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        match self {
            Self::S3(client) => client.get_metadata_by_prefix(bucket, prefix).await,
            Self::Memory(client) => client.get_metadata_by_prefix(bucket, prefix).await,
        }
    }

    async fn get_keys(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<BTreeSet<String>, ObjectStorageError> {
        match self {
            Self::S3(client) => client.get_keys(bucket, prefix).await,
            Self::Memory(client) => client.get_keys(bucket, prefix).await,
        }
    }

    async fn delete(&self, bucket: &str, keys: &BTreeSet<String>) -> Result<(), ObjectStorageError> {
        match self {
            Self::S3(client) => client.delete(bucket, keys).await,
            Self::Memory(client) => client.delete(bucket, keys).await,
        }
    }

    async fn could_connect(&self, bucket: &str) -> bool {
        match self {
            Self::S3(client) => client.could_connect(bucket).await,
            Self::Memory(client) => client.could_connect(bucket).await,
        }
    }
}

pub type DefaultFileStorageService = FileStorageService<BucketFileRepository<StorageClient>>;
pub type DefaultFormDataFileStorageService =
    FormDataFileStorageService<BucketFormDataFileRepository<StorageClient>>;

/// Reachability of one configured bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketStatus {
    pub bucket: String,
    pub reachable: bool,
}

/// Builds file storage services that share one client.
#[derive(Clone, Debug)]
pub struct StorageServiceFactory {
    config: Config,
    client: StorageClient,
}

impl StorageServiceFactory {
    /// Uses S3 when credentials are configured, in-memory storage otherwise.
    pub fn new(config: Config) -> Self {
        let client = match config.s3() {
            Some(s3) => StorageClient::S3(OpendalObjectStorage::new(s3.clone())),
            None => {
                info!(environment = %config.environment(), "Using in-memory object storage");
                StorageClient::Memory(MemoryObjectStorage::new())
            }
        };
        Self::with_client(config, client)
    }

    pub fn with_client(config: Config, client: StorageClient) -> Self {
        Self { config, client }
    }

    pub fn client(&self) -> &StorageClient {
        &self.client
    }

    pub fn key_provider(&self) -> DefaultFormDataFileKeyProvider {
        DefaultFormDataFileKeyProvider::new(self.config.key_namespace())
    }

    pub fn file_storage_service(&self) -> DefaultFileStorageService {
        let repository =
            BucketFileRepository::new(self.config.file_bucket(), self.client.clone());
        FileStorageService::new(repository, self.key_provider())
    }

    pub fn form_data_file_storage_service(&self) -> DefaultFormDataFileStorageService {
        let repository =
            BucketFormDataFileRepository::new(self.config.form_data_bucket(), self.client.clone());
        FormDataFileStorageService::new(repository, self.key_provider())
    }

    /// Checks every configured bucket.
    pub async fn check_buckets(&self) -> Vec<BucketStatus> {
        let mut statuses = Vec::with_capacity(2);
        for bucket in [self.config.file_bucket(), self.config.form_data_bucket()] {
            statuses.push(BucketStatus {
                bucket: bucket.to_owned(),
                reachable: self.client.could_connect(bucket).await,
            });
        }
        statuses
    }
}
