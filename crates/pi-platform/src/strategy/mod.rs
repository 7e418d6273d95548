//! Paste detection strategies.
//!
//! Three techniques, one per platform capability level, all implementing
//! [`PasteEventSourcePort`]:
//!
//! - [`CommandHookPasteSource`]: the input's built-in paste command is
//!   replaced with a hook that signals first and then lets the default
//!   action proceed.
//! - [`ContentInsertionPasteSource`]: the platform pushes inserted content
//!   (bytes or a uri) directly; no clipboard read needed.
//! - [`ManualTriggerPasteSource`]: a generic paste intent is intercepted
//!   and the clipboard is read explicitly afterwards.
//!
//! The strategy is picked once at startup by the composition root.

mod command_hook;
mod content_insertion;
mod manual_trigger;

pub use command_hook::CommandHookPasteSource;
pub use content_insertion::ContentInsertionPasteSource;
pub use manual_trigger::ManualTriggerPasteSource;

use pi_core::ports::PasteEventSourcePort;
use std::sync::Arc;

/// Default strategy for the current platform.
///
/// macOS text fields expose a paste command that can be wrapped; elsewhere
/// the manual trigger is the lowest common denominator. Embedders with
/// push-based content insertion opt into [`ContentInsertionPasteSource`]
/// explicitly.
pub fn default_paste_source() -> Arc<dyn PasteEventSourcePort> {
    #[cfg(target_os = "macos")]
    return Arc::new(CommandHookPasteSource::new());

    #[cfg(not(target_os = "macos"))]
    Arc::new(ManualTriggerPasteSource::new())
}
