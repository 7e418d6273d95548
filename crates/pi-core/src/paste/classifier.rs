//! Clipboard snapshot classification.
//!
//! Deterministic, pure mapping from one [`ClipboardContent`] snapshot to one
//! [`Payload`]. The priority order is fixed:
//!
//! 1. Any image items present: the payload is built from *all* image items,
//!    and any simultaneous text fallback is discarded.
//! 2. Otherwise the *first* text item is decoded as UTF-8. A decode failure
//!    counts as "no text present", not as an error.
//! 3. Everything else (including an empty snapshot) is unsupported.

use crate::clipboard::ClipboardContent;
use crate::paste::{ImageItem, Payload};

/// Classify one clipboard snapshot into a normalized payload.
pub fn classify(content: &ClipboardContent) -> Payload {
    let image_items: Vec<ImageItem> = content
        .items
        .iter()
        .filter(|item| item.mime.is_image())
        .map(|item| ImageItem::new(item.data.clone(), item.mime.clone()))
        .collect();

    if !image_items.is_empty() {
        return Payload::new_image(image_items);
    }

    if let Some(first_text) = content.items.iter().find(|item| item.mime.is_text()) {
        match std::str::from_utf8(&first_text.data) {
            Ok(text) => return Payload::new_text(text),
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    mime = %first_text.mime,
                    "text item is not valid UTF-8, treating as absent"
                );
                return Payload::Unsupported;
            }
        }
    }

    Payload::Unsupported
}
