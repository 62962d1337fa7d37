//! Object-storage client consumed by the repositories.
//!
//! [`ObjectStorage`] is the narrow contract this crate needs from a backend.
//! Two implementations ship with it: [`OpendalObjectStorage`] talks to an
//! S3-compatible endpoint, [`MemoryObjectStorage`] keeps everything in
//! process and backs local runs and tests.

mod memory;
mod s3;
mod traits;
mod types;

pub use memory::MemoryObjectStorage;
pub use s3::{OpendalObjectStorage, S3Config};
pub use traits::ObjectStorage;
pub use types::{ObjectMetadata, ObjectStorageError, PutObject, StorageObject};
