//! Errors reported by the file storage services.

use crate::client::ObjectStorageError;

/// One or more requested files do not exist.
///
/// Carries logical file ids when the caller addressed files by id, physical
/// storage keys otherwise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("File(s) not found: {}", .ids.join(", "))]
pub struct FileNotFound {
    ids: Vec<String>,
}

impl FileNotFound {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Error type for file storage service operations.
#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error(transparent)]
    NotFound(#[from] FileNotFound),

    #[error(transparent)]
    Storage(#[from] ObjectStorageError),
}

impl FileStorageError {
    /// The unresolved identifiers, when this is a not-found error.
    pub fn not_found_ids(&self) -> Option<&[String]> {
        match self {
            Self::NotFound(not_found) => Some(not_found.ids()),
            Self::Storage(_) => None,
        }
    }
}
