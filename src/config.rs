//! Engine configuration.
//!
//! [`EngineConfig`] is built once per server and cloned into every request.

use std::fmt;

use crate::component::base::ID_PREFIX;
use crate::state::seal::SealKey;

/// Default selector of the toast container on the page.
pub const DEFAULT_TOAST_TARGET: &str = "#toast-msg";

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration shared by every request.
#[derive(Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Selector that routing-failure toasts are retargeted to.
    pub toast_target: String,
    /// Prefix of ids generated for components mounted without one.
    pub id_prefix: String,
    /// When set, the ledger wire format is sealed with this key.
    pub seal_key: Option<SealKey>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            toast_target: DEFAULT_TOAST_TARGET.to_owned(),
            id_prefix: ID_PREFIX.to_owned(),
            seal_key: None,
        }
    }
}

impl EngineConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the toast target selector (builder).
    pub fn with_toast_target(mut self, target: impl Into<String>) -> Self {
        self.toast_target = target.into();
        self
    }

    /// Set the generated-id prefix (builder).
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Seal the ledger wire format with `key` (builder).
    pub fn with_seal_key(mut self, key: SealKey) -> Self {
        self.seal_key = Some(key);
        self
    }

    /// Whether ledgers are sealed.
    pub fn is_sealed(&self) -> bool {
        self.seal_key.is_some()
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("toast_target", &self.toast_target)
            .field("id_prefix", &self.id_prefix)
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
