//! Object storage types.

use crate::metadata::UserMetadata;

/// Metadata of a stored object as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_length: u64,
    pub content_type: String,
    pub user_metadata: UserMetadata,
}

/// A stored object with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    pub metadata: ObjectMetadata,
    pub content: Vec<u8>,
}

/// Request to store an object.
#[derive(Debug, Clone)]
pub struct PutObject {
    pub key: String,
    pub content: Vec<u8>,
    pub content_type: String,
    /// Length announced by the caller. The write fails when it disagrees with
    /// the content.
    pub content_length: Option<u64>,
    pub user_metadata: UserMetadata,
}

impl PutObject {
    pub fn new(key: impl Into<String>, content: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content,
            content_type: content_type.into(),
            content_length: None,
            user_metadata: UserMetadata::new(),
        }
    }

    pub fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }

    pub fn with_user_metadata(mut self, user_metadata: UserMetadata) -> Self {
        self.user_metadata = user_metadata;
        self
    }

    pub(crate) fn check_content_length(&self) -> Result<(), ObjectStorageError> {
        let actual = self.content.len() as u64;
        match self.content_length {
            Some(declared) if declared != actual => {
                Err(ObjectStorageError::ContentLengthMismatch { declared, actual })
            }
            _ => Ok(()),
        }
    }
}

/// Error type for object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Declared content length {declared} does not match actual length {actual}")]
    ContentLengthMismatch { declared: u64, actual: u64 },

    /// The object changed while it was being rewritten.
    #[error("Object changed concurrently: {0}")]
    Conflict(String),

    #[error("Storage configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Backend(#[from] opendal::Error),
}
