// src/upload/mod.rs — File references and the upload endpoint abstraction

pub mod http;
pub mod inline;

use std::path::Path;

use async_trait::async_trait;

use crate::infra::errors::Result;

pub use http::HttpUploader;
pub use inline::{decode_inline, encode_inline, is_inline};

/// A file picked by the user, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".into());
        let mime_type = guess_mime(&name);
        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        is_image(&self.mime_type)
    }
}

/// Images go through the upload endpoint; everything else is sent inline.
pub fn is_image(mime_type: &str) -> bool {
    mime_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// MIME type from the file extension, `application/octet-stream` when unknown.
pub fn guess_mime(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// The out-of-band upload endpoint for image attachments.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Store the file and return its durable URL.
    async fn upload(&self, file: &FileRef) -> Result<String>;
}
