//! Repositories bridging file objects and the object-storage client.
//!
//! Each repository is bound to one bucket and holds no other state. Absence is
//! reported as `None` or an empty collection; deciding whether that is an error
//! is left to the services.

mod file;
mod form_data;
mod traits;

pub use file::BucketFileRepository;
pub use form_data::BucketFormDataFileRepository;
pub use traits::{FileRepository, FormDataFileRepository};

use crate::client::ObjectMetadata;
use crate::metadata::{BaseFileMetadata, FileMetadata};

impl From<ObjectMetadata> for BaseFileMetadata {
    fn from(metadata: ObjectMetadata) -> Self {
        Self {
            content_length: metadata.content_length,
            content_type: metadata.content_type,
            user_metadata: metadata.user_metadata,
        }
    }
}

impl From<ObjectMetadata> for FileMetadata {
    fn from(metadata: ObjectMetadata) -> Self {
        Self {
            content_length: Some(metadata.content_length),
            content_type: metadata.content_type,
            user_metadata: metadata.user_metadata,
        }
    }
}
