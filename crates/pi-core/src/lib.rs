//! # pi-core
//!
//! Core domain models and business logic for the paste-input pipeline.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod clipboard;
pub mod ids;
pub mod paste;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipboardContent, ClipboardItem, MimeType};
pub use ids::ViewId;
pub use paste::{classify, PasteFilter, Payload, PayloadKind};
