//! File content paired with its metadata.

use crate::metadata::{BaseFileMetadata, FileMetadata};

/// A plain file to store, or as loaded back.
///
/// The content is moved into the repository on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObject {
    pub metadata: BaseFileMetadata,
    pub content: Vec<u8>,
}

impl FileObject {
    pub fn new(metadata: BaseFileMetadata, content: Vec<u8>) -> Self {
        Self { metadata, content }
    }
}

/// A form-data file to store, or as loaded back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub metadata: FileMetadata,
    pub content: Vec<u8>,
}

impl FileData {
    pub fn new(metadata: FileMetadata, content: Vec<u8>) -> Self {
        Self { metadata, content }
    }
}
