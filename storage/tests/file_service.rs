mod common;

use attachments_storage::client::ObjectStorage;
use attachments_storage::repository::BucketFileRepository;
use attachments_storage::{
    BaseFileMetadata, DefaultFormDataFileKeyProvider, FileObject, FileStorageError,
    FileStorageService, UserMetadata, UserMetadataView,
};
use common::{BUCKET, Call, FailingObjectStorage, RecordingObjectStorage};

const KEY: &str = "key";
const CONTENT_TYPE: &str = "contentType";
const CONTENT_LENGTH: u64 = 5;

type Service = FileStorageService<BucketFileRepository<RecordingObjectStorage>>;

fn setup() -> (Service, RecordingObjectStorage) {
    let client = RecordingObjectStorage::new();
    let service = FileStorageService::new(
        BucketFileRepository::new(BUCKET, client.clone()),
        DefaultFormDataFileKeyProvider::default(),
    );
    (service, client)
}

fn user_metadata() -> UserMetadata {
    UserMetadata::from([("checksum".to_owned(), "sha256".to_owned())])
}

fn content() -> FileObject {
    FileObject::new(
        BaseFileMetadata::new(CONTENT_LENGTH, CONTENT_TYPE, user_metadata()),
        b"Hello".to_vec(),
    )
}

#[tokio::test]
async fn should_pass_right_arguments_to_client() {
    let (service, client) = setup();

    let result = service.save(KEY, content()).await.unwrap();

    assert_eq!(result.content_length, CONTENT_LENGTH);
    assert_eq!(result.content_type, CONTENT_TYPE);
    assert_eq!(result.filename(), None);
    assert_eq!(result.id(), Some(KEY));

    let mut expected_metadata = user_metadata();
    expected_metadata.insert("id".to_owned(), KEY.to_owned());
    assert_eq!(result.user_metadata, expected_metadata);
    assert_eq!(
        client.calls(),
        vec![Call::Put {
            key: KEY.to_owned(),
            content_type: CONTENT_TYPE.to_owned(),
            content_length: Some(CONTENT_LENGTH),
            user_metadata: expected_metadata,
        }]
    );
}

#[tokio::test]
async fn should_generate_key_using_key_provider() {
    let (service, _) = setup();
    let generated_key = "process/processInstanceId/fileId";

    let result = service
        .save_by_ids("processInstanceId", "fileId", content())
        .await
        .unwrap();

    assert_eq!(result.content_length, CONTENT_LENGTH);
    assert_eq!(result.content_type, CONTENT_TYPE);
    assert_eq!(result.id(), Some(generated_key));
    assert_eq!(result.checksum(), Some("sha256"));
}

#[tokio::test]
async fn should_set_user_metadata_by_key() {
    let (service, client) = setup();
    service.save(KEY, content()).await.unwrap();
    client.clear_calls();

    let mut replacement = user_metadata();
    replacement.insert("id".to_owned(), KEY.to_owned());
    replacement.insert("filename".to_owned(), "hello.txt".to_owned());
    let result = service
        .set_user_metadata(KEY, replacement.clone())
        .await
        .unwrap();

    assert_eq!(result.content_length, CONTENT_LENGTH);
    assert_eq!(result.content_type, CONTENT_TYPE);
    assert_eq!(result.user_metadata, replacement);
    assert_eq!(result.filename(), Some("hello.txt"));
    assert_eq!(client.calls(), vec![Call::SetUserMetadata(KEY.to_owned())]);

    let stored = client.inner().get(BUCKET, KEY).await.unwrap().unwrap();
    assert_eq!(stored.content, b"Hello".to_vec());
}

#[tokio::test]
async fn should_generate_key_using_key_provider_to_set_user_metadata() {
    let (service, client) = setup();
    service
        .save_by_ids("processInstanceId", "fileId", content())
        .await
        .unwrap();
    client.clear_calls();

    let result = service
        .set_user_metadata_by_ids("processInstanceId", "fileId", user_metadata())
        .await
        .unwrap();

    assert_eq!(result.checksum(), Some("sha256"));
    assert_eq!(
        client.calls(),
        vec![Call::SetUserMetadata(
            "process/processInstanceId/fileId".to_owned()
        )]
    );
}

#[tokio::test]
async fn declared_length_mismatch_fails_the_save() {
    let (service, client) = setup();
    let mut file = content();
    file.metadata.content_length = 42;

    let error = service.save(KEY, file).await.unwrap_err();

    assert!(matches!(error, FileStorageError::Storage(_)));
    assert!(client.inner().is_empty(BUCKET));
}

#[tokio::test]
async fn storage_errors_pass_through() {
    let service = FileStorageService::new(
        BucketFileRepository::new(BUCKET, FailingObjectStorage),
        DefaultFormDataFileKeyProvider::default(),
    );

    let error = service.save(KEY, content()).await.unwrap_err();
    assert!(matches!(error, FileStorageError::Storage(_)));

    let error = service
        .set_user_metadata(KEY, UserMetadata::new())
        .await
        .unwrap_err();
    assert!(error.not_found_ids().is_none());
}
