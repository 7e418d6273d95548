//! Clipboard content model
//!
//! Clipboard data is modeled at two levels:
//!
//! - [`ClipboardContent`] represents a **single clipboard snapshot**,
//!   corresponding to one paste action observed at a specific point in time.
//! - [`ClipboardItem`] represents **one concrete data representation**
//!   (e.g. `text/plain`, `image/png`) that belongs to the same snapshot.
//!
//! A snapshot may be empty (empty clipboard, or only formats the platform
//! reader does not surface). Item order is insertion order from the reader;
//! it carries no meaning beyond classification priority.
//!
//! `ClipboardItem` is the single wire shape crossing the platform boundary.
//! New mime types must never require a shape change, so the item is exactly
//! `(mime, bytes)` with the bytes base64-encoded in serialized form.

use serde::{Deserialize, Serialize};

use crate::clipboard::MimeType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipboardItem {
    /// MIME type, e.g. "text/plain", "image/png"
    pub mime: MimeType,

    /// payload bytes
    #[serde(
        serialize_with = "serialize_bytes",
        deserialize_with = "deserialize_bytes"
    )]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipboardContent {
    /// unix epoch millis at which the snapshot was taken; diagnostic only
    pub ts_ms: i64,

    /// one clipboard snapshot may contain multiple representations
    pub items: Vec<ClipboardItem>,
}

impl ClipboardItem {
    pub fn new(mime: MimeType, data: Vec<u8>) -> Self {
        Self { mime, data }
    }

    /// UTF-8 text item convenience constructor.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            mime: MimeType::text_plain(),
            data: text.into().into_bytes(),
        }
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

impl ClipboardContent {
    pub fn new(items: Vec<ClipboardItem>) -> Self {
        Self {
            ts_ms: chrono::Utc::now().timestamp_millis(),
            items,
        }
    }

    /// Empty snapshot; the fail-closed result of a clipboard read.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_item_constructor() {
        let item = ClipboardItem::text("hello");
        assert_eq!(item.mime, MimeType::text_plain());
        assert_eq!(item.data, b"hello");
    }

    #[test]
    fn test_empty_snapshot() {
        let content = ClipboardContent::empty();
        assert!(content.is_empty());
    }

    #[test]
    fn test_item_bytes_round_trip_as_base64() {
        let item = ClipboardItem::new(MimeType::image_png(), vec![0x89, 0x50, 0x4E, 0x47]);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("iVBORw=="), "bytes should be base64 in wire form: {json}");

        let back: ClipboardItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
