//! Clipboard domain models.
mod content;
mod mime;

pub use content::{ClipboardContent, ClipboardItem};
pub use mime::MimeType;
