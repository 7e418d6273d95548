//! Temp store port
//!
//! Collaborator for file-backed image delivery: writes image bytes to a
//! caller-writable temp location and cleans up its own artifacts later.
//!
//! **Semantic:** files created here are identifiable by a reserved filename
//! prefix, and `clear()` removes all and only those files.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::clipboard::MimeType;

#[derive(Debug, Error)]
pub enum TempStoreError {
    #[error("no file extension known for mime type {0}")]
    UnsupportedMime(String),

    #[error("image bytes do not match any known image format")]
    CorruptImage,

    #[error("temp file write failed: {0}")]
    Write(String),
}

#[async_trait]
pub trait TempStorePort: Send + Sync {
    /// Write one image representation to a fresh temp file.
    ///
    /// Returns the path of the created file. Corrupt bytes and mime types
    /// without a known extension are rejected rather than written.
    async fn write_image(&self, bytes: &[u8], mime: &MimeType) -> Result<PathBuf, TempStoreError>;

    /// Remove every artifact this store has ever created (matched by the
    /// reserved filename prefix). Returns the number of files removed.
    async fn clear(&self) -> Result<usize, TempStoreError>;
}
