use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use pi_core::ports::{PasteEventSourcePort, PasteSignal};

/// Paste detection by replacing the input's built-in paste command.
///
/// The embedder routes the field's paste action through
/// [`notify_paste_command`](Self::notify_paste_command) and then performs
/// the default paste behavior, so the visible text is unaffected by the
/// interception.
pub struct CommandHookPasteSource {
    tx: std::sync::Mutex<Option<mpsc::Sender<PasteSignal>>>,
    signalling: AtomicBool,
}

impl CommandHookPasteSource {
    pub fn new() -> Self {
        Self {
            tx: std::sync::Mutex::new(None),
            signalling: AtomicBool::new(false),
        }
    }

    /// Invoked by the wrapped paste command.
    ///
    /// Emits at most one signal per discrete paste action: if the default
    /// action re-enters the hook while the signal is still being queued,
    /// the nested invocation is collapsed. When the source is stopped the
    /// command simply falls through to the default behavior.
    pub fn notify_paste_command(&self) {
        if self.signalling.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(tx) = self.tx.lock().unwrap().as_ref() {
            if let Err(err) = tx.try_send(PasteSignal::Detected) {
                log::warn!("paste signal dropped: {}", err);
            }
        }

        self.signalling.store(false, Ordering::Release);
    }
}

impl Default for CommandHookPasteSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteEventSourcePort for CommandHookPasteSource {
    async fn start(&self, tx: mpsc::Sender<PasteSignal>) -> Result<()> {
        *self.tx.lock().unwrap() = Some(tx);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.tx.lock().unwrap().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_command_yields_one_signal() {
        let source = CommandHookPasteSource::new();
        let (tx, mut rx) = mpsc::channel(4);
        source.start(tx).await.unwrap();

        source.notify_paste_command();

        assert!(matches!(rx.recv().await, Some(PasteSignal::Detected)));
        assert!(rx.try_recv().is_err(), "only one signal per paste action");
    }

    #[tokio::test]
    async fn test_command_without_start_is_silent() {
        let source = CommandHookPasteSource::new();
        source.notify_paste_command();
    }

    #[tokio::test]
    async fn test_stopped_source_drops_commands() {
        let source = CommandHookPasteSource::new();
        let (tx, mut rx) = mpsc::channel(4);
        source.start(tx).await.unwrap();
        source.stop().await.unwrap();

        source.notify_paste_command();

        assert!(rx.try_recv().is_err());
    }
}
