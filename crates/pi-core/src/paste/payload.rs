//! Paste payload domain model
//!
//! Represents the normalized result of classifying one clipboard snapshot:
//! text, raw image bytes, file-backed images, or unsupported content.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clipboard::MimeType;

/// Paste payload enum representing different content types.
///
/// Exactly one variant is active per paste action. Equality is structural
/// and, for image sequences, order-sensitive.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Text(TextPayload),
    Image(ImagePayload),
    FileImage(FileImagePayload),
    Unsupported,
}

/// Coarse payload kind used by per-instance filters.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PayloadKind {
    Text,
    Image,
    Unsupported,
}

/// Text paste payload
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TextPayload {
    pub text: String,
}

/// One raw image representation inside an image payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageItem {
    #[serde(
        serialize_with = "serialize_bytes",
        deserialize_with = "deserialize_bytes"
    )]
    pub bytes: Vec<u8>,
    pub mime: MimeType,
}

/// Image paste payload carrying raw bytes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload {
    pub items: Vec<ImageItem>,
}

/// Image paste payload in file-backed delivery mode: the bytes have been
/// written to temp files and only the paths travel to the consumer.
///
/// `uris` and `mimes` are parallel sequences; the constructor rejects
/// mismatched lengths so no instance can violate that.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileImagePayload {
    uris: Vec<PathBuf>,
    mimes: Vec<MimeType>,
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("file image payload requires one mime type per uri ({uris} uris, {mimes} mime types)")]
    MismatchedLengths { uris: usize, mimes: usize },
}

impl TextPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ImageItem {
    pub fn new(bytes: Vec<u8>, mime: MimeType) -> Self {
        Self { bytes, mime }
    }
}

impl ImagePayload {
    pub fn new(items: Vec<ImageItem>) -> Self {
        Self { items }
    }
}

impl FileImagePayload {
    pub fn new(uris: Vec<PathBuf>, mimes: Vec<MimeType>) -> Result<Self, PayloadError> {
        if uris.len() != mimes.len() {
            return Err(PayloadError::MismatchedLengths {
                uris: uris.len(),
                mimes: mimes.len(),
            });
        }
        Ok(Self { uris, mimes })
    }

    pub fn uris(&self) -> &[PathBuf] {
        &self.uris
    }

    pub fn mimes(&self) -> &[MimeType] {
        &self.mimes
    }
}

impl Payload {
    /// Create a new text payload
    pub fn new_text(text: impl Into<String>) -> Self {
        Payload::Text(TextPayload::new(text))
    }

    /// Create a new raw-bytes image payload
    pub fn new_image(items: Vec<ImageItem>) -> Self {
        Payload::Image(ImagePayload::new(items))
    }

    /// Coarse kind of this payload. File-backed images are still images.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::Text,
            Payload::Image(_) | Payload::FileImage(_) => PayloadKind::Image,
            Payload::Unsupported => PayloadKind::Unsupported,
        }
    }

    /// Check if this is an image payload
    pub fn is_image(&self) -> bool {
        self.kind() == PayloadKind::Image
    }

    /// Check if this is a text payload
    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }

    /// Get text content if this is a text payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(p) => Some(&p.text),
            _ => None,
        }
    }

    /// Get image payload reference if this carries raw image bytes
    pub fn as_image(&self) -> Option<&ImagePayload> {
        match self {
            Payload::Image(img) => Some(img),
            _ => None,
        }
    }
}

/// Helper to serialize bytes as base64
fn serialize_bytes<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use base64::Engine;
    let base64_string = base64::engine::general_purpose::STANDARD.encode(bytes);
    serializer.serialize_str(&base64_string)
}

/// Helper to deserialize bytes from base64
fn deserialize_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use base64::Engine;
    let base64_string = String::deserialize(deserializer)?;
    base64::engine::general_purpose::STANDARD
        .decode(&base64_string)
        .map_err(|e: base64::DecodeError| serde::de::Error::custom(e.to_string()))
}
