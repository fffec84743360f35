//! Property dispatch: typed per-component tables and the string-keyed surface.
//!
//! A component type implements [`Properties`] with an exhaustive `match` over
//! its own closed key enum. The object-safe [`PropertyAccess`] trait, which the
//! engine and embedding widgets talk to, is derived from it by a blanket impl:
//!
//! 1. a name the component declares is validated, assigned and recorded;
//! 2. a name only the embedded base declares is delegated to the base;
//! 3. any other name passes through unchanged.

use serde_json::Value;

use super::named::Named;
use crate::component::base::BaseComponent;
use crate::state::ledger::Ledger;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Why a property is being set. Only [`Phase::Live`] writes reach the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Forcing the current value through its validator while mounting.
    Normalize,
    /// Re-applying a value stored in the ledger while mounting.
    Replay,
    /// A change made outside reconciliation (event handling, hooks, callers).
    Live,
}

impl Phase {
    /// Whether a set in this phase is recorded in the ledger.
    pub fn records(self) -> bool {
        matches!(self, Phase::Live)
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Typed property table of one component type.
pub trait Properties {
    /// The closed set of property names this type declares itself.
    type Key: Named;

    /// Current value of a declared property.
    fn get_key(&self, key: Self::Key) -> Value;

    /// Normalize a raw value for `key`. Must be total and must not mutate.
    fn validate_key(&self, key: Self::Key, raw: &Value) -> Value;

    /// Store an already normalized value.
    fn assign_key(&mut self, key: Self::Key, value: &Value);

    /// Declared properties that are never written to the ledger.
    fn static_keys(&self) -> &'static [Self::Key] {
        &[]
    }

    /// Identity under which ledger writes are recorded.
    fn identity(&self) -> &str {
        self.delegate().map(|base| base.id.as_str()).unwrap_or("")
    }

    /// Embedded base that receives names this type does not declare.
    fn delegate(&self) -> Option<&BaseComponent> {
        None
    }

    /// Mutable access to the embedded base.
    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        None
    }
}

// ---------------------------------------------------------------------------
// PropertyAccess
// ---------------------------------------------------------------------------

/// String-keyed, object-safe property surface shared by all components.
pub trait PropertyAccess {
    /// Every recognized property name: base names first, then own names.
    fn property_names(&self) -> Vec<&'static str>;

    /// Current value of a property, or `None` when no level recognizes it.
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Normalize `raw` for `name` without mutating anything.
    ///
    /// Unknown names return `raw` unchanged.
    fn validate(&self, name: &str, raw: &Value) -> Value;

    /// Validate, assign, and record the value in the ledger when `phase` allows.
    ///
    /// Returns the normalized value (or `raw` for unknown names).
    fn set_property(&mut self, name: &str, raw: &Value, phase: Phase, ledger: &mut Ledger)
        -> Value;

    /// Whether `name` is a structural property that is never recorded or replayed.
    fn is_static(&self, name: &str) -> bool;
}

impl<T: Properties> PropertyAccess for T {
    fn property_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .delegate()
            .map(|base| base.property_names())
            .unwrap_or_default()
            .into_iter()
            .filter(|name| T::Key::parse(name).is_none())
            .collect();
        names.extend(T::Key::names());
        names
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        if let Some(key) = T::Key::parse(name) {
            return Some(self.get_key(key));
        }
        self.delegate().and_then(|base| base.get_property(name))
    }

    fn validate(&self, name: &str, raw: &Value) -> Value {
        if let Some(key) = T::Key::parse(name) {
            return self.validate_key(key, raw);
        }
        match self.delegate() {
            Some(base) => base.validate(name, raw),
            None => raw.clone(),
        }
    }

    fn set_property(
        &mut self,
        name: &str,
        raw: &Value,
        phase: Phase,
        ledger: &mut Ledger,
    ) -> Value {
        if let Some(key) = T::Key::parse(name) {
            let value = self.validate_key(key, raw);
            self.assign_key(key, &value);
            let statics: Vec<&str> = self.static_keys().iter().map(|k| k.as_str()).collect();
            ledger.set_request_value(self.identity(), name, value.clone(), &statics, phase);
            return value;
        }
        match self.delegate_mut() {
            Some(base) => base.set_property(name, raw, phase, ledger),
            None => raw.clone(),
        }
    }

    fn is_static(&self, name: &str) -> bool {
        if let Some(key) = T::Key::parse(name) {
            return self.static_keys().contains(&key);
        }
        self.delegate().is_some_and(|base| base.is_static(name))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::validate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    crate::named_enum! {
        enum CounterProp {
            Count => "count",
            Step => "step",
            Swap => "swap",
        }
    }

    /// Minimal widget with a base, one static key and one key shadowing the base.
    #[derive(Default)]
    struct Counter {
        base: BaseComponent,
        count: i64,
        step: i64,
        swap: String,
    }

    impl Properties for Counter {
        type Key = CounterProp;

        fn get_key(&self, key: CounterProp) -> Value {
            match key {
                CounterProp::Count => json!(self.count),
                CounterProp::Step => json!(self.step),
                CounterProp::Swap => json!(self.swap),
            }
        }

        fn validate_key(&self, key: CounterProp, raw: &Value) -> Value {
            match key {
                CounterProp::Count => json!(validate::to_integer(raw, 0)),
                CounterProp::Step => json!(validate::to_integer(raw, 1)),
                CounterProp::Swap => json!(validate::to_string(raw, "counter")),
            }
        }

        fn assign_key(&mut self, key: CounterProp, value: &Value) {
            match key {
                CounterProp::Count => self.count = validate::to_integer(value, 0),
                CounterProp::Step => self.step = validate::to_integer(value, 1),
                CounterProp::Swap => self.swap = validate::to_string(value, "counter"),
            }
        }

        fn static_keys(&self) -> &'static [CounterProp] {
            &[CounterProp::Step]
        }

        fn delegate(&self) -> Option<&BaseComponent> {
            Some(&self.base)
        }

        fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
            Some(&mut self.base)
        }
    }

    fn counter(id: &str) -> Counter {
        Counter {
            base: BaseComponent::new(id),
            ..Counter::default()
        }
    }

    #[test]
    fn phase_records_only_live() {
        assert!(Phase::Live.records());
        assert!(!Phase::Normalize.records());
        assert!(!Phase::Replay.records());
    }

    #[test]
    fn names_skip_shadowed_base_names() {
        let names = counter("c").property_names();
        assert_eq!(names.iter().filter(|n| **n == "swap").count(), 1);
        assert_eq!(names.first(), Some(&"id"));
        assert!(names.ends_with(&["count", "step", "swap"]));
    }

    #[test]
    fn own_key_wins_over_base() {
        let c = counter("c");
        assert_eq!(c.validate("swap", &json!("anything")), json!("anything"));
        assert_eq!(c.base.validate("swap", &json!("anything")), json!("outerHTML"));
    }

    #[test]
    fn delegates_to_base() {
        let mut c = counter("c");
        let mut ledger = Ledger::new();
        let value = c.set_property("target", &json!("main"), Phase::Live, &mut ledger);
        assert_eq!(value, json!("#main"));
        assert_eq!(c.base.target, "#main");
        assert_eq!(ledger.get("c", "target"), Some(&json!("#main")));
    }

    #[test]
    fn unknown_name_passes_through() {
        let mut c = counter("c");
        let mut ledger = Ledger::new();
        let raw = json!({"weird": [1, 2]});
        assert_eq!(c.get_property("missing"), None);
        assert_eq!(c.validate("missing", &raw), raw);
        assert_eq!(c.set_property("missing", &raw, Phase::Live, &mut ledger), raw);
        assert!(ledger.is_empty());
    }

    #[test]
    fn live_set_records_normalized_value() {
        let mut c = counter("c");
        let mut ledger = Ledger::new();
        let value = c.set_property("count", &json!("12"), Phase::Live, &mut ledger);
        assert_eq!(value, json!(12));
        assert_eq!(c.count, 12);
        assert_eq!(ledger.get("c", "count"), Some(&json!(12)));
    }

    #[test]
    fn static_names_include_base_identity() {
        let c = counter("c");
        assert!(c.is_static("step"));
        assert!(c.is_static("id"));
        assert!(c.is_static("name"));
        assert!(!c.is_static("count"));
        assert!(!c.is_static("target"));
        assert!(!c.is_static("missing"));
    }

    #[test]
    fn static_key_is_never_recorded() {
        let mut c = counter("c");
        let mut ledger = Ledger::new();
        c.set_property("step", &json!(5), Phase::Live, &mut ledger);
        assert_eq!(c.step, 5);
        assert!(ledger.is_empty());
    }

    #[test]
    fn reconciliation_phases_do_not_record() {
        let mut c = counter("c");
        let mut ledger = Ledger::new();
        c.set_property("count", &json!(3), Phase::Normalize, &mut ledger);
        c.set_property("count", &json!(4), Phase::Replay, &mut ledger);
        assert_eq!(c.count, 4);
        assert!(ledger.is_empty());
    }
}
