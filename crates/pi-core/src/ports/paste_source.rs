//! Paste event source port.
//!
//! Abstracts *how* a paste action is detected. The platform crate ships
//! three strategy implementations (command-hook interception, native content
//! insertion, manual trigger); all of them share this lifecycle and feed the
//! same signal channel.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::clipboard::ClipboardContent;

/// One detected paste action.
#[derive(Debug, Clone)]
pub enum PasteSignal {
    /// A paste happened; the clipboard must be read to obtain the content.
    /// The read happens strictly after this signal, never from a pre-fetch.
    Detected,

    /// A paste happened and the platform pushed the inserted content along
    /// with it, so no clipboard read is needed.
    DetectedWithContent(ClipboardContent),
}

/// Lifecycle of a paste detection strategy.
///
/// # Behavior
/// - `start()` should be idempotent; a second call replaces the signal sink.
/// - `stop()` should be idempotent. After `stop()`, paste actions are
///   silently dropped.
/// - Each discrete user paste action produces at most one signal.
#[async_trait]
pub trait PasteEventSourcePort: Send + Sync {
    /// Begin emitting paste signals into `tx`.
    async fn start(&self, tx: mpsc::Sender<PasteSignal>) -> Result<()>;

    /// Stop emitting paste signals.
    async fn stop(&self) -> Result<()>;
}
