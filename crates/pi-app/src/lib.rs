//! # pi-app
//!
//! Application layer for the paste-input pipeline.
//!
//! [`PasteChannel`] owns the single subscription to the platform paste
//! source and republishes classified payloads to every live subscriber.
//! [`PasteWrapper`] is the per-input policy layer on top of it: filtering,
//! enable/disable, registration lifecycle, and delivery mode.

pub mod channel;
pub mod wrapper;

pub use channel::{ChannelConfig, ChannelError, PasteChannel};
pub use wrapper::{DeliveryMode, PasteCallback, PasteWrapper, PasteWrapperConfig, WrapperError};
