//! Plain-file repository.

use super::traits::FileRepository;
use crate::client::{ObjectStorage, ObjectStorageError, PutObject};
use crate::metadata::{BaseFileMetadata, UserMetadata, UserMetadataView};
use crate::types::FileObject;

/// [`FileRepository`] storing every file in one bucket of an [`ObjectStorage`].
#[derive(Clone, Debug)]
pub struct BucketFileRepository<C> {
    bucket: String,
    client: C,
}

impl<C: ObjectStorage> BucketFileRepository<C> {
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

impl<C: ObjectStorage> FileRepository for BucketFileRepository<C> {
    #[tracing::instrument(name = "put_file", skip_all, fields(bucket = %self.bucket, key))]
    async fn put(&self, key: &str, file: FileObject) -> Result<BaseFileMetadata, ObjectStorageError> {
        let FileObject {
            mut metadata,
            content,
        } = file;
        metadata.set_id(Some(key.to_owned()));

        let object = PutObject::new(key, content, metadata.content_type)
            .with_content_length(metadata.content_length)
            .with_user_metadata(metadata.user_metadata);
        self.client
            .put(&self.bucket, object)
            .await
            .map(BaseFileMetadata::from)
    }

    #[tracing::instrument(
        name = "set_user_metadata",
        skip_all,
        fields(bucket = %self.bucket, key)
    )]
    async fn set_user_metadata(
        &self,
        key: &str,
        user_metadata: UserMetadata,
    ) -> Result<BaseFileMetadata, ObjectStorageError> {
        self.client
            .set_user_metadata(&self.bucket, key, user_metadata)
            .await
            .map(BaseFileMetadata::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryObjectStorage;
    use crate::repository::span_names::SpanNames;

    fn file(content: &[u8]) -> FileObject {
        let user_metadata = UserMetadata::from([("checksum".to_owned(), "sha256".to_owned())]);
        FileObject::new(
            BaseFileMetadata::new(content.len() as u64, "text/plain", user_metadata),
            content.to_vec(),
        )
    }

    #[tokio::test]
    async fn test_put_writes_into_bucket() {
        let client = MemoryObjectStorage::new();
        let repository = BucketFileRepository::new("files", client.clone());

        let metadata = repository.put("key", file(b"Hello")).await.unwrap();

        assert_eq!(metadata.content_length, 5);
        assert_eq!(metadata.content_type, "text/plain");
        assert_eq!(metadata.id(), Some("key"));
        assert_eq!(metadata.checksum(), Some("sha256"));
        assert_eq!(client.len("files"), 1);
    }

    #[tokio::test]
    async fn test_put_rejects_wrong_declared_length() {
        let repository = BucketFileRepository::new("files", MemoryObjectStorage::new());
        let mut object = file(b"Hello");
        object.metadata.content_length = 4;

        let result = repository.put("key", object).await;
        assert!(matches!(
            result,
            Err(ObjectStorageError::ContentLengthMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_set_user_metadata_replaces_attributes() {
        let repository = BucketFileRepository::new("files", MemoryObjectStorage::new());
        repository.put("key", file(b"Hello")).await.unwrap();

        let updated = repository
            .set_user_metadata(
                "key",
                UserMetadata::from([("filename".to_owned(), "hello.txt".to_owned())]),
            )
            .await
            .unwrap();

        assert_eq!(updated.filename(), Some("hello.txt"));
        assert_eq!(updated.checksum(), None);
        assert_eq!(updated.content_length, 5);
    }

    #[tokio::test]
    async fn test_set_user_metadata_missing_key_fails() {
        let repository = BucketFileRepository::new("files", MemoryObjectStorage::new());
        let result = repository.set_user_metadata("nope", UserMetadata::new()).await;
        assert!(matches!(result, Err(ObjectStorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_operations_open_spans() {
        let names = SpanNames::default();
        let _guard = names.set_default();

        let repository = BucketFileRepository::new("files", MemoryObjectStorage::new());
        repository.put("key", file(b"Hello")).await.unwrap();
        repository
            .set_user_metadata("key", UserMetadata::new())
            .await
            .unwrap();

        assert_eq!(names.names(), vec!["put_file", "set_user_metadata"]);
    }
}
