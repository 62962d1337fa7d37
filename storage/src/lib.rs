//! File storage for process-instance attachments on top of object storage.
//!
//! Files are stored under keys derived from a process instance id and a file
//! id (see [`key_provider`]), with typed metadata projected onto the object's
//! attribute map (see [`metadata`]). Repositories adapt files to an
//! [`ObjectStorage`](client::ObjectStorage) client; services add key
//! derivation, not-found reporting and bulk operations on top.
//!
//! ```no_run
//! use attachments_storage::{Config, FileData, FileMetadata, StorageServiceFactory};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let factory = StorageServiceFactory::new(Config::init()?);
//! let service = factory.form_data_file_storage_service();
//!
//! let metadata = FileMetadata::builder()
//!     .content_type("text/plain")
//!     .filename("hello.txt")
//!     .build();
//! service
//!     .save_by_ids("proc-1", "file-9", FileData::new(metadata, b"Hello".to_vec()))
//!     .await?;
//!
//! let file = service.load_by_process_instance_id_and_id("proc-1", "file-9").await?;
//! assert_eq!(file.content, b"Hello");
//!
//! service.delete_by_process_instance_id("proc-1").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod key_provider;
pub mod metadata;
pub mod repository;
pub mod service;
pub mod telemetry;
pub mod types;

pub use config::Config;
pub use error::{FileNotFound, FileStorageError};
pub use factory::StorageServiceFactory;
pub use key_provider::{DefaultFormDataFileKeyProvider, FormDataFileKeyProvider};
pub use metadata::{BaseFileMetadata, FileMetadata, UserMetadata, UserMetadataView};
pub use service::{FileStorageService, FormDataFileStorageService};
pub use types::{FileData, FileObject};
