//! Process-wide paste relay.
//!
//! One [`PasteChannel`] instance owns the single subscription to the
//! platform paste source, converts incoming signals into [`Payload`]
//! values, and republishes them on a broadcast stream so any number of
//! wrapped inputs can observe the same event flow.
//!
//! The channel is constructed explicitly by the composition root and passed
//! by reference to each wrapper; "one native subscription per process" is a
//! property of wiring, not of hidden global state.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use pi_core::ports::{ClipboardReaderPort, PasteEventSourcePort, PasteSignal};
use pi_core::{classify, Payload, ViewId};

/// Buffer sizes for the channel's two internal streams.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Capacity of the signal queue between the paste source and the pump.
    pub signal_buffer: usize,

    /// Ring capacity of the payload broadcast. A subscriber that falls more
    /// than this many events behind loses the oldest ones instead of
    /// blocking emission to everyone else.
    pub broadcast_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            signal_buffer: 16,
            broadcast_capacity: 64,
        }
    }
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to start paste event source: {0}")]
    SourceStart(String),
}

pub struct PasteChannel {
    reader: Arc<dyn ClipboardReaderPort>,
    source: Arc<dyn PasteEventSourcePort>,
    config: ChannelConfig,
    payload_tx: broadcast::Sender<Payload>,
    running: AtomicBool,
    pump: Mutex<Option<JoinHandle<()>>>,
    views: std::sync::Mutex<BTreeSet<ViewId>>,
}

impl PasteChannel {
    pub fn new(
        reader: Arc<dyn ClipboardReaderPort>,
        source: Arc<dyn PasteEventSourcePort>,
    ) -> Self {
        Self::with_config(reader, source, ChannelConfig::default())
    }

    pub fn with_config(
        reader: Arc<dyn ClipboardReaderPort>,
        source: Arc<dyn PasteEventSourcePort>,
        config: ChannelConfig,
    ) -> Self {
        let (payload_tx, _) = broadcast::channel(config.broadcast_capacity);
        Self {
            reader,
            source,
            config,
            payload_tx,
            running: AtomicBool::new(false),
            pump: Mutex::new(None),
            views: std::sync::Mutex::new(BTreeSet::new()),
        }
    }

    /// Establish the single underlying paste-source subscription and start
    /// the pump task. Idempotent: a second call while running is a no-op.
    ///
    /// The channel can be re-initialized after [`dispose`](Self::dispose)
    /// (hot-reload scenarios).
    pub async fn initialize(&self) -> Result<(), ChannelError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        let (signal_tx, mut signal_rx) = mpsc::channel(self.config.signal_buffer);

        if let Err(err) = self.source.start(signal_tx).await {
            self.running.store(false, Ordering::Release);
            return Err(ChannelError::SourceStart(err.to_string()));
        }

        let reader = self.reader.clone();
        let payload_tx = self.payload_tx.clone();

        let handle = tokio::spawn(async move {
            while let Some(signal) = signal_rx.recv().await {
                let payload = match signal {
                    PasteSignal::DetectedWithContent(content) => classify(&content),
                    PasteSignal::Detected => snapshot_payload(reader.as_ref()),
                };

                if payload_tx.send(payload).is_err() {
                    debug!("paste payload dropped: no live subscribers");
                }
            }
        });

        *self.pump.lock().await = Some(handle);

        info!("paste channel initialized");
        Ok(())
    }

    /// Tear down the paste-source subscription. Subsequent paste actions are
    /// dropped silently until the channel is initialized again.
    pub async fn dispose(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }

        if let Err(err) = self.source.stop().await {
            warn!(error = %err, "paste event source failed to stop cleanly");
        }

        if let Some(handle) = self.pump.lock().await.take() {
            handle.abort();
        }

        info!("paste channel disposed");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Subscribe to the payload broadcast. Only events emitted after this
    /// call are seen; there is no replay.
    pub fn subscribe(&self) -> broadcast::Receiver<Payload> {
        self.payload_tx.subscribe()
    }

    /// On-demand read-and-classify, independent of the event stream.
    ///
    /// Degrades instead of failing: a full read error falls back to a
    /// text-only read, and if that fails too the result is
    /// [`Payload::Unsupported`]. Never returns an error to the caller.
    pub fn get_current_payload(&self) -> Payload {
        snapshot_payload(self.reader.as_ref())
    }

    /// Register a mounted input instance. Returns `false` (and does nothing)
    /// if the id is already registered.
    pub fn register_view(&self, id: ViewId) -> bool {
        self.views.lock().unwrap().insert(id)
    }

    /// Unregister an input instance. Unknown ids are a no-op.
    pub fn unregister_view(&self, id: ViewId) -> bool {
        self.views.lock().unwrap().remove(&id)
    }

    pub fn registered_views(&self) -> usize {
        self.views.lock().unwrap().len()
    }
}

fn snapshot_payload(reader: &dyn ClipboardReaderPort) -> Payload {
    match reader.read() {
        Ok(content) => classify(&content),
        Err(err) => {
            warn!(error = %err, "clipboard read failed, falling back to text-only read");
            match reader.read_text() {
                Ok(content) => classify(&content),
                Err(err) => {
                    warn!(error = %err, "text-only clipboard read failed");
                    Payload::Unsupported
                }
            }
        }
    }
}
