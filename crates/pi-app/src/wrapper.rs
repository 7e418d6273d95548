//! Per-input policy layer over the paste channel.
//!
//! Each wrapped text input owns one [`PasteWrapper`]. The wrapper applies
//! the instance's filter and enable flag, converts image payloads to
//! file-backed form when asked to, and invokes the consumer callback
//! exactly once per accepted paste action.
//!
//! UI teardown ordering is not fully controllable by the consumer, so every
//! operation on a disposed wrapper is a silent no-op, never a fault.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use pi_core::paste::{FileImagePayload, ImagePayload};
use pi_core::ports::{TempStoreError, TempStorePort};
use pi_core::{PasteFilter, Payload, ViewId};

use crate::channel::PasteChannel;

/// How image payloads reach the consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Deliver raw image bytes inline.
    #[default]
    RawBytes,

    /// Write image bytes to temp files and deliver the paths instead.
    FileBacked,
}

/// Consumer-supplied paste callback.
pub type PasteCallback = Arc<dyn Fn(Payload) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct PasteWrapperConfig {
    pub filter: PasteFilter,
    pub enabled: bool,
    pub delivery: DeliveryMode,
}

impl Default for PasteWrapperConfig {
    fn default() -> Self {
        Self {
            filter: PasteFilter::accept_all(),
            enabled: true,
            delivery: DeliveryMode::RawBytes,
        }
    }
}

#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("file-backed delivery requires a temp store")]
    MissingTempStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WrapperState {
    Unmounted,
    Mounted { id: ViewId, enabled: bool },
    Disposed,
}

pub struct PasteWrapper {
    channel: Arc<PasteChannel>,
    temp_store: Option<Arc<dyn TempStorePort>>,
    callback: PasteCallback,
    filter: PasteFilter,
    delivery: DeliveryMode,
    initial_enabled: bool,
    state: Mutex<WrapperState>,
    listen: Mutex<Option<JoinHandle<()>>>,
}

impl PasteWrapper {
    /// Create a wrapper around `channel`.
    ///
    /// `temp_store` is required when `config.delivery` is
    /// [`DeliveryMode::FileBacked`].
    pub fn new(
        channel: Arc<PasteChannel>,
        config: PasteWrapperConfig,
        temp_store: Option<Arc<dyn TempStorePort>>,
        callback: PasteCallback,
    ) -> Result<Self, WrapperError> {
        if config.delivery == DeliveryMode::FileBacked && temp_store.is_none() {
            return Err(WrapperError::MissingTempStore);
        }

        Ok(Self {
            channel,
            temp_store,
            callback,
            filter: config.filter,
            delivery: config.delivery,
            initial_enabled: config.enabled,
            state: Mutex::new(WrapperState::Unmounted),
            listen: Mutex::new(None),
        })
    }

    /// Mount this instance: assign its view id and, when enabled, register
    /// with the channel and start observing paste events.
    ///
    /// Mounting twice, or mounting after disposal, is a no-op.
    pub async fn mount(&self) {
        let mut state = self.state.lock().await;
        if *state != WrapperState::Unmounted {
            return;
        }

        let id = ViewId::next();
        if self.initial_enabled {
            self.attach(id).await;
        }
        *state = WrapperState::Mounted {
            id,
            enabled: self.initial_enabled,
        };
    }

    /// Enable or disable delivery.
    ///
    /// Disabling unsubscribes and unregisters: paste actions occurring while
    /// disabled are never delivered, even after re-enabling. Calls on an
    /// unmounted or disposed wrapper are no-ops.
    pub async fn set_enabled(&self, enabled: bool) {
        let mut state = self.state.lock().await;
        let WrapperState::Mounted { id, enabled: current } = *state else {
            return;
        };
        if current == enabled {
            return;
        }

        if enabled {
            self.attach(id).await;
        } else {
            self.detach(id).await;
        }
        *state = WrapperState::Mounted { id, enabled };
    }

    /// Terminal teardown. Idempotent; always unsubscribes and unregisters
    /// regardless of the current enabled state.
    pub async fn dispose(&self) {
        let mut state = self.state.lock().await;
        if let WrapperState::Mounted { id, enabled } = *state {
            if enabled {
                self.detach(id).await;
            }
        }
        *state = WrapperState::Disposed;
    }

    pub async fn view_id(&self) -> Option<ViewId> {
        match *self.state.lock().await {
            WrapperState::Mounted { id, .. } => Some(id),
            _ => None,
        }
    }

    pub async fn is_enabled(&self) -> bool {
        matches!(
            *self.state.lock().await,
            WrapperState::Mounted { enabled: true, .. }
        )
    }

    async fn attach(&self, id: ViewId) {
        // Safe to call redundantly; a failure here means the transport is
        // unavailable and delivery stays dormant until it recovers.
        if let Err(err) = self.channel.initialize().await {
            warn!(view = %id, error = %err, "paste channel initialization failed");
        }
        self.channel.register_view(id);

        let rx = self.channel.subscribe();
        let filter = self.filter.clone();
        let delivery = self.delivery;
        let temp_store = self.temp_store.clone();
        let callback = self.callback.clone();

        let handle = tokio::spawn(async move {
            listen_loop(rx, id, filter, delivery, temp_store, callback).await;
        });
        *self.listen.lock().await = Some(handle);
    }

    async fn detach(&self, id: ViewId) {
        if let Some(handle) = self.listen.lock().await.take() {
            handle.abort();
        }
        self.channel.unregister_view(id);
    }
}

async fn listen_loop(
    mut rx: broadcast::Receiver<Payload>,
    id: ViewId,
    filter: PasteFilter,
    delivery: DeliveryMode,
    temp_store: Option<Arc<dyn TempStorePort>>,
    callback: PasteCallback,
) {
    loop {
        match rx.recv().await {
            Ok(payload) => {
                deliver(id, &filter, delivery, temp_store.as_deref(), &callback, payload).await;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(view = %id, skipped, "paste delivery lagged, events were dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn deliver(
    id: ViewId,
    filter: &PasteFilter,
    delivery: DeliveryMode,
    temp_store: Option<&dyn TempStorePort>,
    callback: &PasteCallback,
    payload: Payload,
) {
    if !filter.accepts(payload.kind()) {
        debug!(view = %id, kind = ?payload.kind(), "payload dropped by filter");
        return;
    }

    let delivered = match (payload, delivery, temp_store) {
        (Payload::Image(image), DeliveryMode::FileBacked, Some(store)) => {
            match into_file_backed(store, image).await {
                Ok(file_backed) => file_backed,
                Err(err) => {
                    warn!(view = %id, error = %err, "file-backed conversion failed");
                    Payload::Unsupported
                }
            }
        }
        (payload, _, _) => payload,
    };

    callback(delivered);
}

async fn into_file_backed(
    store: &dyn TempStorePort,
    image: ImagePayload,
) -> Result<Payload, TempStoreError> {
    let mut uris = Vec::with_capacity(image.items.len());
    let mut mimes = Vec::with_capacity(image.items.len());

    for item in &image.items {
        let path = store.write_image(&item.bytes, &item.mime).await?;
        uris.push(path);
        mimes.push(item.mime.clone());
    }

    Ok(FileImagePayload::new(uris, mimes)
        .map(Payload::FileImage)
        .unwrap_or(Payload::Unsupported))
}
