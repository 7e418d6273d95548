//! System clipboard reader adapter.
mod common;
pub mod platform;

pub use platform::SystemClipboardReader;
