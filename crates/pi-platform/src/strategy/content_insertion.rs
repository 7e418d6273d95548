use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use pi_core::clipboard::{ClipboardContent, ClipboardItem, MimeType};
use pi_core::ports::{PasteEventSourcePort, PasteSignal};

/// Push-based paste detection for platforms that deliver inserted content
/// directly to the input, so no clipboard read is needed.
pub struct ContentInsertionPasteSource {
    tx: std::sync::Mutex<Option<mpsc::Sender<PasteSignal>>>,
}

impl ContentInsertionPasteSource {
    pub fn new() -> Self {
        Self {
            tx: std::sync::Mutex::new(None),
        }
    }

    /// Inline delivery: the platform handed over the inserted bytes.
    pub async fn insert_content(&self, items: Vec<ClipboardItem>) {
        self.send(PasteSignal::DetectedWithContent(ClipboardContent::new(items)))
            .await;
    }

    /// Uri-only delivery: the referenced resource is read before the signal
    /// is emitted. An unreadable resource degrades to an empty push, which
    /// classifies as unsupported downstream.
    pub async fn insert_uri(&self, path: &Path, mime: MimeType) {
        let content = match tokio::fs::read(path).await {
            Ok(bytes) => ClipboardContent::new(vec![ClipboardItem::new(mime, bytes)]),
            Err(err) => {
                log::warn!("failed to read inserted uri {}: {}", path.display(), err);
                ClipboardContent::empty()
            }
        };
        self.send(PasteSignal::DetectedWithContent(content)).await;
    }

    async fn send(&self, signal: PasteSignal) {
        let tx = self.tx.lock().unwrap().clone();
        match tx {
            Some(tx) => {
                if let Err(err) = tx.send(signal).await {
                    log::warn!("paste signal dropped: {}", err);
                }
            }
            None => log::debug!("inserted content ignored: source not started"),
        }
    }
}

impl Default for ContentInsertionPasteSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteEventSourcePort for ContentInsertionPasteSource {
    async fn start(&self, tx: mpsc::Sender<PasteSignal>) -> Result<()> {
        *self.tx.lock().unwrap() = Some(tx);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.tx.lock().unwrap().take();
        Ok(())
    }
}
