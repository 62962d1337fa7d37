//! Caller-facing file storage services.
//!
//! Services derive storage keys from process-instance and file ids, delegate
//! to a repository, and turn absence into [`FileNotFound`](crate::FileNotFound).

mod file;
mod form_data;

pub use file::FileStorageService;
pub use form_data::FormDataFileStorageService;
