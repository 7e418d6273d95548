use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MimeType(pub String);

impl MimeType {
    pub fn text_plain() -> Self {
        Self("text/plain".into())
    }
    pub fn image_png() -> Self {
        Self("image/png".into())
    }
    pub fn image_jpeg() -> Self {
        Self("image/jpeg".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Coarse kind check used by classification: anything under `image/`.
    pub fn is_image(&self) -> bool {
        self.0.starts_with("image/")
    }

    /// Coarse kind check used by classification: anything under `text/`.
    pub fn is_text(&self) -> bool {
        self.0.starts_with("text/")
    }

    /// File extension for the image formats the pipeline hands to the
    /// temp-file store. Unknown types get no extension and are rejected
    /// by the store.
    pub fn preferred_extension(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "image/png" => Some("png"),
            "image/jpeg" => Some("jpg"),
            "image/gif" => Some("gif"),
            "image/webp" => Some("webp"),
            _ => None,
        }
    }

    /// Inverse of [`preferred_extension`](Self::preferred_extension),
    /// used when resolving copied image files from a uri-list.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self("image/png".into())),
            "jpg" | "jpeg" => Some(Self("image/jpeg".into())),
            "gif" => Some(Self("image/gif".into())),
            "webp" => Some(Self("image/webp".into())),
            _ => None,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MimeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MimeType(s.to_string()))
    }
}
