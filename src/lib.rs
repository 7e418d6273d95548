//! # paste-input
//!
//! Paste detection and payload normalization for text inputs.
//!
//! The pipeline turns heterogeneous native clipboard representations into a
//! single typed [`Payload`] and delivers it exactly once per user paste
//! action to every interested consumer:
//!
//! ```text
//! OS clipboard -> reader -> classify -> PasteChannel broadcast -> PasteWrapper filter -> callback
//! ```
//!
//! [`PasteInput`] is the composition root: it picks the platform paste
//! detection strategy once at startup and owns the single [`PasteChannel`]
//! instance every wrapper shares.
//!
//! ```no_run
//! use std::sync::Arc;
//! use paste_input::{PasteInput, PasteWrapperConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let input = PasteInput::builder().build()?;
//!
//! let wrapper = input.wrapper(
//!     PasteWrapperConfig::default(),
//!     Arc::new(|payload| println!("pasted: {:?}", payload)),
//! )?;
//! wrapper.mount().await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub use pi_app::{
    ChannelConfig, ChannelError, DeliveryMode, PasteCallback, PasteChannel, PasteWrapper,
    PasteWrapperConfig, WrapperError,
};
pub use pi_core::paste::{FileImagePayload, ImageItem, ImagePayload, TextPayload};
pub use pi_core::ports::{
    ClipboardReaderPort, PasteEventSourcePort, PasteSignal, TempStoreError, TempStorePort,
};
pub use pi_core::{
    classify, ClipboardContent, ClipboardItem, MimeType, PasteFilter, Payload, PayloadKind, ViewId,
};
pub use pi_platform::{
    default_paste_source, platform_version_string, CommandHookPasteSource,
    ContentInsertionPasteSource, FileTempStore, ManualTriggerPasteSource, SystemClipboardReader,
};

/// Builder for assembling the paste pipeline.
///
/// Every collaborator can be overridden; unset ones get the platform
/// default (system clipboard reader, per-platform detection strategy,
/// OS temp directory store).
pub struct PasteInputBuilder {
    reader: Option<Arc<dyn ClipboardReaderPort>>,
    source: Option<Arc<dyn PasteEventSourcePort>>,
    temp_store: Option<Arc<dyn TempStorePort>>,
    channel_config: ChannelConfig,
}

impl Default for PasteInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasteInputBuilder {
    pub fn new() -> Self {
        Self {
            reader: None,
            source: None,
            temp_store: None,
            channel_config: ChannelConfig::default(),
        }
    }

    pub fn with_reader(mut self, reader: Arc<dyn ClipboardReaderPort>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Override the paste detection strategy, e.g. to opt into push-based
    /// [`ContentInsertionPasteSource`] on embedders that support it.
    pub fn with_source(mut self, source: Arc<dyn PasteEventSourcePort>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_temp_store(mut self, temp_store: Arc<dyn TempStorePort>) -> Self {
        self.temp_store = Some(temp_store);
        self
    }

    pub fn with_channel_config(mut self, config: ChannelConfig) -> Self {
        self.channel_config = config;
        self
    }

    pub fn build(self) -> anyhow::Result<PasteInput> {
        let reader: Arc<dyn ClipboardReaderPort> = match self.reader {
            Some(reader) => reader,
            None => Arc::new(SystemClipboardReader::new()?),
        };
        let source = self.source.unwrap_or_else(default_paste_source);
        let temp_store = self
            .temp_store
            .unwrap_or_else(|| Arc::new(FileTempStore::new()));

        let channel = Arc::new(PasteChannel::with_config(
            reader,
            source,
            self.channel_config,
        ));

        Ok(PasteInput {
            channel,
            temp_store,
        })
    }
}

/// The assembled paste pipeline.
pub struct PasteInput {
    channel: Arc<PasteChannel>,
    temp_store: Arc<dyn TempStorePort>,
}

impl PasteInput {
    pub fn builder() -> PasteInputBuilder {
        PasteInputBuilder::new()
    }

    /// The shared channel; one native subscription for the whole process.
    pub fn channel(&self) -> Arc<PasteChannel> {
        self.channel.clone()
    }

    pub fn temp_store(&self) -> Arc<dyn TempStorePort> {
        self.temp_store.clone()
    }

    /// Create a wrapper bound to this pipeline's channel and temp store.
    pub fn wrapper(
        &self,
        config: PasteWrapperConfig,
        callback: PasteCallback,
    ) -> Result<PasteWrapper, WrapperError> {
        PasteWrapper::new(
            self.channel.clone(),
            config,
            Some(self.temp_store.clone()),
            callback,
        )
    }

    /// Diagnostic OS description, e.g. "Linux 6.1.0".
    pub fn platform_version_string(&self) -> String {
        platform_version_string()
    }

    /// Remove the temp files created by prior file-backed deliveries.
    ///
    /// Cleanup failures are logged, never surfaced. Returns the number of
    /// files removed.
    pub async fn clear_temporary_artifacts(&self) -> usize {
        match self.temp_store.clear().await {
            Ok(removed) => removed,
            Err(err) => {
                log::warn!("temp artifact cleanup failed: {}", err);
                0
            }
        }
    }
}
