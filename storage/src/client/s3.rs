//! S3-compatible object storage through OpenDAL.

use super::traits::ObjectStorage;
use super::types::{ObjectMetadata, ObjectStorageError, PutObject, StorageObject};
use crate::metadata::{DEFAULT_CONTENT_TYPE, UserMetadata, headers};
use opendal::{ErrorKind, Operator};
use std::collections::BTreeSet;
use tracing::debug;

/// Connection settings for an S3-compatible endpoint.
#[derive(Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for S3Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Config")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

/// Object storage backed by an S3-compatible service.
///
/// An operator is built per bucket on each call; OpenDAL keeps the HTTP client
/// cheap to clone.
#[derive(Clone, Debug)]
pub struct OpendalObjectStorage {
    config: S3Config,
}

impl OpendalObjectStorage {
    pub fn new(config: S3Config) -> Self {
        Self { config }
    }

    fn create_operator(&self, bucket: &str) -> Result<Operator, ObjectStorageError> {
        let builder = opendal::services::S3::default()
            .bucket(bucket)
            .region(&self.config.region)
            .endpoint(&self.config.endpoint)
            .access_key_id(&self.config.access_key_id)
            .secret_access_key(&self.config.secret_access_key);

        Operator::new(builder)
            .map(|op| op.finish())
            .map_err(|e| ObjectStorageError::Config(e.to_string()))
    }

    async fn stat(op: &Operator, key: &str) -> Result<Option<ObjectMetadata>, ObjectStorageError> {
        match op.stat(key).await {
            Ok(meta) => Ok(Some(to_object_metadata(&meta))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(
        op: &Operator,
        object: PutObject,
        if_match: Option<&str>,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        object.check_content_length()?;

        let PutObject {
            key,
            content,
            content_type,
            user_metadata,
            ..
        } = object;

        let mut write = op
            .write_with(&key, content)
            .content_type(&content_type)
            .user_metadata(user_metadata);
        if let Some(etag) = if_match {
            write = write.if_match(etag);
        }
        write.await.map_err(|e| keyed_error(e, &key))?;

        Self::stat(op, &key)
            .await?
            .ok_or_else(|| ObjectStorageError::NotFound(key.clone()))
    }
}

/// Attaches `key` to the errors callers act on.
fn keyed_error(error: opendal::Error, key: &str) -> ObjectStorageError {
    match error.kind() {
        ErrorKind::NotFound => ObjectStorageError::NotFound(key.to_owned()),
        ErrorKind::ConditionNotMatch => ObjectStorageError::Conflict(key.to_owned()),
        _ => error.into(),
    }
}

fn to_object_metadata(meta: &opendal::Metadata) -> ObjectMetadata {
    ObjectMetadata {
        content_length: meta.content_length(),
        content_type: meta
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned(),
        // S3 hands attribute names back lowercased
        user_metadata: meta
            .user_metadata()
            .map(|m| {
                m.iter()
                    .map(|(name, value)| {
                        let name = headers::canonical(name).unwrap_or(name.as_str());
                        (name.to_owned(), value.clone())
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

impl ObjectStorage for OpendalObjectStorage {
    async fn put(
        &self,
        bucket: &str,
        object: PutObject,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        let op = self.create_operator(bucket)?;
        Self::write(&op, object, None).await
    }

    async fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<StorageObject>, ObjectStorageError> {
        let op = self.create_operator(bucket)?;
        let Some(metadata) = Self::stat(&op, key).await? else {
            return Ok(None);
        };

        match op.read(key).await {
            Ok(buffer) => Ok(Some(StorageObject {
                metadata,
                content: buffer.to_vec(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// S3 only rewrites metadata through a copy, which OpenDAL does not expose
    /// with new attributes, so the stored content is read and written back.
    ///
    /// The read and the write are both conditional on the ETag seen by the
    /// initial stat. An object replaced in between fails with
    /// [`ObjectStorageError::Conflict`] and is left untouched. The content is
    /// buffered in memory for the rewrite.
    async fn set_user_metadata(
        &self,
        bucket: &str,
        key: &str,
        user_metadata: UserMetadata,
    ) -> Result<ObjectMetadata, ObjectStorageError> {
        let op = self.create_operator(bucket)?;
        let current = op.stat(key).await.map_err(|e| keyed_error(e, key))?;
        let content_type = current
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();
        let etag = current.etag();

        let content = match etag {
            Some(etag) => op.read_with(key).if_match(etag).await,
            None => op.read(key).await,
        }
        .map_err(|e| keyed_error(e, key))?
        .to_vec();

        let object = PutObject::new(key, content, content_type)
            .with_content_length(current.content_length())
            .with_user_metadata(user_metadata);
        Self::write(&op, object, etag).await
    }

    async fn get_metadata_by_keys(
        &self,
        bucket: &str,
        keys: &BTreeSet<String>,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        let op = self.create_operator(bucket)?;
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(metadata) = Self::stat(&op, key).await? {
                found.push(metadata);
            }
        }
        Ok(found)
    }

    async fn get_metadata_by_prefix(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectMetadata>, ObjectStorageError> {
        let op = self.create_operator(bucket)?;
        let keys = list_keys(&op, prefix).await?;
        let mut found = Vec::with_capacity(keys.len());
        for key in &keys {
            // objects removed between listing and stat are skipped
            if let Some(metadata) = Self::stat(&op, key).await? {
                found.push(metadata);
            }
        }
        Ok(found)
    }

    async fn get_keys(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<BTreeSet<String>, ObjectStorageError> {
        let op = self.create_operator(bucket)?;
        list_keys(&op, prefix).await
    }

    async fn delete(&self, bucket: &str, keys: &BTreeSet<String>) -> Result<(), ObjectStorageError> {
        let op = self.create_operator(bucket)?;
        debug!(bucket, count = keys.len(), "Deleting objects");
        op.delete_iter(keys.iter().cloned()).await?;
        Ok(())
    }

    async fn could_connect(&self, bucket: &str) -> bool {
        match self.create_operator(bucket) {
            Ok(op) => op.check().await.is_ok(),
            Err(_) => false,
        }
    }
}

async fn list_keys(op: &Operator, prefix: &str) -> Result<BTreeSet<String>, ObjectStorageError> {
    let entries = op.list_with(prefix).recursive(true).await?;
    Ok(entries
        .into_iter()
        .filter(|entry| entry.metadata().is_file())
        .map(|entry| entry.path().to_owned())
        .collect())
}
