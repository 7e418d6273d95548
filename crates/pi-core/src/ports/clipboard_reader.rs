//! Clipboard reader port - abstracts pull access to the OS clipboard.

use crate::clipboard::ClipboardContent;
use anyhow::Result;

/// Clipboard reader port.
///
/// This trait provides a platform-agnostic interface to the current
/// clipboard state, allowing the paste channel to pull a snapshot without
/// depending on platform-specific implementations.
///
/// Implementations fail closed: an OS-level read failure (clipboard locked
/// by another process, unavailable display server) yields an empty
/// [`ClipboardContent`] rather than surfacing the raw OS error. The `Err`
/// branch is reserved for the reader being unusable as a whole, and callers
/// degrade rather than propagate it.
pub trait ClipboardReaderPort: Send + Sync {
    /// Read the current clipboard as one snapshot.
    fn read(&self) -> Result<ClipboardContent>;

    /// Text-only fallback read, used when the full read fails.
    fn read_text(&self) -> Result<ClipboardContent>;
}
