//! Typed metadata over a flat attribute map.
//!
//! Stored objects carry a string-to-string attribute map next to their
//! content. A handful of attribute names are reserved (see [`headers`]) and get
//! typed accessors here; every other attribute passes through untouched.
//!
//! Setters take an `Option`. `None` is a no-op and never clears a value that is
//! already present, there is no removal primitive.

use std::collections::BTreeMap;

/// Attribute map attached to a stored object.
///
/// Iteration is in sorted name order, not insertion order.
pub type UserMetadata = BTreeMap<String, String>;

/// Content type used when neither the caller nor the backend supplied one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Reserved attribute names.
pub mod headers {
    pub const ID: &str = "id";
    pub const CHECKSUM: &str = "checksum";
    pub const FILENAME: &str = "filename";
    /// Form-data only.
    pub const FIELD_NAME: &str = "fieldName";
    /// Form-data only.
    pub const FORM_KEY: &str = "formKey";

    const RESERVED: [&str; 5] = [ID, CHECKSUM, FILENAME, FIELD_NAME, FORM_KEY];

    /// The reserved spelling of `name` when it matches a reserved name in any
    /// ASCII case.
    pub fn canonical(name: &str) -> Option<&'static str> {
        RESERVED
            .into_iter()
            .find(|reserved| reserved.eq_ignore_ascii_case(name))
    }
}

fn set_if_present(map: &mut UserMetadata, name: &str, value: Option<String>) {
    if let Some(value) = value {
        map.insert(name.to_owned(), value);
    }
}

/// Typed accessors for the attributes shared by every metadata shape.
pub trait UserMetadataView {
    fn user_metadata(&self) -> &UserMetadata;

    fn user_metadata_mut(&mut self) -> &mut UserMetadata;

    fn attribute(&self, name: &str) -> Option<&str> {
        self.user_metadata().get(name).map(String::as_str)
    }

    fn id(&self) -> Option<&str> {
        self.attribute(headers::ID)
    }

    fn set_id(&mut self, id: Option<String>) {
        set_if_present(self.user_metadata_mut(), headers::ID, id);
    }

    fn checksum(&self) -> Option<&str> {
        self.attribute(headers::CHECKSUM)
    }

    fn set_checksum(&mut self, checksum: Option<String>) {
        set_if_present(self.user_metadata_mut(), headers::CHECKSUM, checksum);
    }

    fn filename(&self) -> Option<&str> {
        self.attribute(headers::FILENAME)
    }

    fn set_filename(&mut self, filename: Option<String>) {
        set_if_present(self.user_metadata_mut(), headers::FILENAME, filename);
    }
}

/// Metadata of a plain file. The length is declared by the caller before a
/// write and reported back by the backend afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFileMetadata {
    pub content_length: u64,
    pub content_type: String,
    pub user_metadata: UserMetadata,
}

impl BaseFileMetadata {
    pub fn new(
        content_length: u64,
        content_type: impl Into<String>,
        user_metadata: UserMetadata,
    ) -> Self {
        Self {
            content_length,
            content_type: content_type.into(),
            user_metadata,
        }
    }
}

impl UserMetadataView for BaseFileMetadata {
    fn user_metadata(&self) -> &UserMetadata {
        &self.user_metadata
    }

    fn user_metadata_mut(&mut self) -> &mut UserMetadata {
        &mut self.user_metadata
    }
}

/// Metadata of a form-data file. The length stays unknown until the backend
/// has stored the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub content_length: Option<u64>,
    pub content_type: String,
    pub user_metadata: UserMetadata,
}

impl FileMetadata {
    pub fn new(content_type: impl Into<String>, user_metadata: UserMetadata) -> Self {
        Self {
            content_length: None,
            content_type: content_type.into(),
            user_metadata,
        }
    }

    pub fn builder() -> FileMetadataBuilder {
        FileMetadataBuilder::default()
    }

    pub fn field_name(&self) -> Option<&str> {
        self.attribute(headers::FIELD_NAME)
    }

    pub fn set_field_name(&mut self, field_name: Option<String>) {
        set_if_present(&mut self.user_metadata, headers::FIELD_NAME, field_name);
    }

    pub fn form_key(&self) -> Option<&str> {
        self.attribute(headers::FORM_KEY)
    }

    pub fn set_form_key(&mut self, form_key: Option<String>) {
        set_if_present(&mut self.user_metadata, headers::FORM_KEY, form_key);
    }
}

impl UserMetadataView for FileMetadata {
    fn user_metadata(&self) -> &UserMetadata {
        &self.user_metadata
    }

    fn user_metadata_mut(&mut self) -> &mut UserMetadata {
        &mut self.user_metadata
    }
}

/// Builder for [`FileMetadata`]. Reserved fields that are never set do not
/// occupy a slot in the resulting attribute map.
#[derive(Debug, Clone, Default)]
pub struct FileMetadataBuilder {
    content_length: Option<u64>,
    content_type: Option<String>,
    id: Option<String>,
    checksum: Option<String>,
    filename: Option<String>,
    field_name: Option<String>,
    form_key: Option<String>,
    extra: UserMetadata,
}

impl FileMetadataBuilder {
    pub fn content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn form_key(mut self, form_key: impl Into<String>) -> Self {
        self.form_key = Some(form_key.into());
        self
    }

    /// Adds a non-reserved attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> FileMetadata {
        let mut metadata = FileMetadata {
            content_length: self.content_length,
            content_type: self
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
            user_metadata: self.extra,
        };
        metadata.set_id(self.id);
        metadata.set_checksum(self.checksum);
        metadata.set_filename(self.filename);
        metadata.set_field_name(self.field_name);
        metadata.set_form_key(self.form_key);
        metadata
    }
}
