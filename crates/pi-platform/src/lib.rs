//! # pi-platform
//!
//! Platform-specific implementations for the paste-input pipeline.
//!
//! This crate contains the pieces that touch the operating system: the
//! clipboard reader, the paste-detection strategies, the temp-file store
//! backing file-based image delivery, and OS version reporting.

pub mod clipboard;
pub mod strategy;
pub mod temp_store;
pub mod version;

pub use clipboard::SystemClipboardReader;
pub use strategy::{
    default_paste_source, CommandHookPasteSource, ContentInsertionPasteSource,
    ManualTriggerPasteSource,
};
pub use temp_store::{FileTempStore, TEMP_FILE_PREFIX};
pub use version::platform_version_string;
