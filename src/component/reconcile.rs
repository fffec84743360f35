//! Reconciliation: normalize a freshly built component, then replay the ledger.
//!
//! Both passes run through the regular property setters with a phase that
//! keeps them out of the ledger, so reconciling never grows it.

use serde_json::Value;

use super::traits::Component;
use crate::property::{Phase, PropertyAccess};
use crate::state::ledger::Ledger;

/// Normalize every declared property, then re-apply stored values.
///
/// Properties are normalized in [`PropertyAccess::property_names`] order:
/// base properties first (`id` before `name`), then the component's own.
/// Stored values are replayed in ledger key order and still pass through
/// their validators. Stored static properties are ignored.
pub fn reconcile(component: &mut dyn Component, ledger: &mut Ledger) {
    normalize(component, ledger);

    let id = component.id().to_owned();
    let Some(entry) = ledger.entry(&id).cloned() else {
        return;
    };
    tracing::debug!(id = %id, count = entry.len(), "replaying ledger entry");
    for (name, value) in &entry {
        if component.is_static(name) {
            tracing::warn!(id = %id, property = %name, "ignoring stored static property");
            continue;
        }
        component.set_property(name, value, Phase::Replay, ledger);
    }
}

/// Force every declared property through its validator once.
pub fn normalize<C: PropertyAccess + ?Sized>(component: &mut C, ledger: &mut Ledger) {
    for name in component.property_names() {
        let current = component.get_property(name).unwrap_or(Value::Null);
        component.set_property(name, &current, Phase::Normalize, ledger);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
