//! Per-instance payload filtering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::paste::PayloadKind;

/// Set of payload kinds a wrapped input accepts.
///
/// Unset means accept everything. An explicitly empty set means accept
/// nothing; the two are distinct states and must stay that way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasteFilter(Option<BTreeSet<PayloadKind>>);

impl PasteFilter {
    /// No filtering; every payload is delivered.
    pub fn accept_all() -> Self {
        Self(None)
    }

    /// Explicit empty set; nothing is ever delivered.
    pub fn accept_none() -> Self {
        Self(Some(BTreeSet::new()))
    }

    pub fn of(kinds: impl IntoIterator<Item = PayloadKind>) -> Self {
        Self(Some(kinds.into_iter().collect()))
    }

    pub fn accepts(&self, kind: PayloadKind) -> bool {
        match &self.0 {
            None => true,
            Some(set) => set.contains(&kind),
        }
    }

    pub fn is_accept_all(&self) -> bool {
        self.0.is_none()
    }
}

impl Default for PasteFilter {
    fn default() -> Self {
        Self::accept_all()
    }
}
