use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use pi_core::ports::{PasteEventSourcePort, PasteSignal};

/// Fallback paste detection: the embedder intercepts a generic paste intent
/// (keyboard shortcut, context-menu action) and the clipboard is read
/// explicitly after the signal. Nothing is pre-fetched, so the content read
/// is whatever the clipboard holds at the moment of the paste action.
pub struct ManualTriggerPasteSource {
    tx: std::sync::Mutex<Option<mpsc::Sender<PasteSignal>>>,
}

impl ManualTriggerPasteSource {
    pub fn new() -> Self {
        Self {
            tx: std::sync::Mutex::new(None),
        }
    }

    /// Report one paste intent.
    pub async fn trigger(&self) {
        let tx = self.tx.lock().unwrap().clone();
        match tx {
            Some(tx) => {
                if let Err(err) = tx.send(PasteSignal::Detected).await {
                    log::warn!("paste signal dropped: {}", err);
                }
            }
            None => log::debug!("paste trigger ignored: source not started"),
        }
    }
}

impl Default for ManualTriggerPasteSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteEventSourcePort for ManualTriggerPasteSource {
    async fn start(&self, tx: mpsc::Sender<PasteSignal>) -> Result<()> {
        *self.tx.lock().unwrap() = Some(tx);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.tx.lock().unwrap().take();
        Ok(())
    }
}
