//! Render context: the ledger and configuration threaded through one request.
//!
//! Components never own the ledger. Every mount, event handler and hook
//! receives `&mut RenderContext` and records live changes through it.

use serde_json::Value;

use super::base::generate_id;
use crate::config::EngineConfig;
use crate::event::trigger::TriggerEvent;
use crate::property::{Phase, PropertyAccess};
use crate::state::ledger::{Ledger, LedgerError};
use crate::state::seal;

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

/// Request-scoped state shared by every component call.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    ledger: Ledger,
    config: EngineConfig,
    trigger: Option<TriggerEvent>,
}

impl RenderContext {
    /// Create a context with an empty ledger.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_ledger(config, Ledger::new())
    }

    /// Create a context carrying a prior ledger.
    pub fn with_ledger(config: EngineConfig, ledger: Ledger) -> Self {
        Self {
            ledger,
            config,
            trigger: None,
        }
    }

    /// Create a context from a ledger in wire format.
    ///
    /// Never fails: malformed payloads, and tampered ones when a seal key is
    /// configured, start the request from an empty ledger.
    pub fn from_wire(config: EngineConfig, wire: &str) -> Self {
        let ledger = match &config.seal_key {
            Some(key) => seal::open_lossy(wire, key),
            None => Ledger::decode_lossy(wire),
        };
        Self::with_ledger(config, ledger)
    }

    /// Serialize the ledger to wire format, sealed when a key is configured.
    pub fn to_wire(&self) -> Result<String, LedgerError> {
        match &self.config.seal_key {
            Some(key) => seal::seal(&self.ledger, key),
            None => self.ledger.to_json(),
        }
    }

    /// The request ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Mutable access to the request ledger.
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Remember the trigger being dispatched in this request.
    pub fn set_trigger(&mut self, trigger: TriggerEvent) {
        self.trigger = Some(trigger);
    }

    /// First value posted for `field` with the current trigger.
    ///
    /// Lets a hook read form fields that never reach the ledger.
    pub fn posted(&self, field: &str) -> Option<&str> {
        self.trigger.as_ref()?.value(field)
    }

    /// A fresh component id with the configured prefix.
    pub fn generate_id(&self) -> String {
        generate_id(&self.config.id_prefix)
    }

    /// Set a property as a live change, recording it in the ledger.
    ///
    /// Returns the normalized value.
    pub fn update<C>(&mut self, component: &mut C, name: &str, raw: Value) -> Value
    where
        C: PropertyAccess + ?Sized,
    {
        component.set_property(name, &raw, Phase::Live, &mut self.ledger)
    }

    /// Consume the context, keeping the ledger.
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Toggle;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn update_records_live_change() {
        let mut ctx = RenderContext::default();
        let mut toggle = Toggle::new("t1");
        assert_eq!(ctx.update(&mut toggle, "value", json!("true")), json!(true));
        assert!(toggle.value);
        assert_eq!(ctx.ledger().to_value(), json!({"t1": {"value": true}}));
    }

    #[test]
    fn posted_fields_follow_the_current_trigger() {
        let mut ctx = RenderContext::default();
        assert_eq!(ctx.posted("password"), None);
        ctx.set_trigger(TriggerEvent::new("login_login").with_value("password", "secret"));
        assert_eq!(ctx.posted("password"), Some("secret"));
        assert_eq!(ctx.posted("username"), None);
        assert!(ctx.ledger().is_empty());
    }

    #[test]
    fn generated_ids_use_configured_prefix() {
        let ctx = RenderContext::new(EngineConfig::new().with_id_prefix("W"));
        let id = ctx.generate_id();
        assert!(id.starts_with('W'));
        assert_eq!(id.len(), 17);
    }

    #[test]
    fn wire_round_trip_plain() {
        let mut ctx = RenderContext::default();
        let mut toggle = Toggle::new("t1");
        ctx.update(&mut toggle, "value", json!(true));
        let wire = ctx.to_wire().unwrap();
        assert_eq!(wire, r#"{"t1":{"value":true}}"#);
        let next = RenderContext::from_wire(EngineConfig::default(), &wire);
        assert_eq!(next.ledger(), ctx.ledger());
    }

    #[test]
    fn wire_round_trip_sealed() {
        let config = EngineConfig::new().with_seal_key([3; 32]);
        let mut ctx = RenderContext::new(config.clone());
        let mut toggle = Toggle::new("t1");
        ctx.update(&mut toggle, "value", json!(true));
        let wire = ctx.to_wire().unwrap();
        assert!(wire.contains("\"seal\""));
        assert_eq!(RenderContext::from_wire(config.clone(), &wire).ledger(), ctx.ledger());

        // An unsealed payload is not trusted once a key is configured.
        let forged = RenderContext::from_wire(config, r#"{"t1":{"value":false}}"#);
        assert!(forged.ledger().is_empty());
    }

    #[test]
    fn malformed_wire_starts_empty() {
        let ctx = RenderContext::from_wire(EngineConfig::default(), "{{{");
        assert!(ctx.ledger().is_empty());
        assert_eq!(ctx.into_ledger(), Ledger::new());
    }
}
