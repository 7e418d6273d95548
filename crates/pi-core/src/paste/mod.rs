//! Paste domain models: the normalized payload, classification, filtering.
mod classifier;
mod filter;
mod payload;

pub use classifier::classify;
pub use filter::PasteFilter;
pub use payload::{
    FileImagePayload, ImageItem, ImagePayload, Payload, PayloadError, PayloadKind, TextPayload,
};
