//! Ports - interfaces the application layer depends on.
//!
//! Implementations live in the platform crate (or in test mocks).

pub mod clipboard_reader;
pub mod paste_source;
pub mod temp_store;

pub use clipboard_reader::ClipboardReaderPort;
pub use paste_source::{PasteEventSourcePort, PasteSignal};
pub use temp_store::{TempStoreError, TempStorePort};
