//! Request state ledger: the replayable property values carried between requests.
//!
//! The ledger maps a component id to the last normalized value of every
//! property that was changed outside reconciliation. It is the only state that
//! survives a request, so its wire format is plain JSON: an object of objects.
//! Decoding comes in two flavours. [`Ledger::from_json`] is strict and reports
//! a [`LedgerError`]. [`Ledger::decode_lossy`] never fails and keeps whatever
//! well-formed entries it can find.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::property::Phase;

/// Errors from strict ledger decoding and seal verification.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("malformed ledger payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ledger payload is not a JSON object")]
    NotAnObject,
    #[error("ledger entry `{0}` is not a JSON object")]
    InvalidEntry(String),
    #[error("sealed ledger has no seal")]
    MissingSeal,
    #[error("ledger seal does not match its state")]
    SealMismatch,
}

/// Property values of one component, keyed by property name.
pub type LedgerEntry = Map<String, Value>;

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// `component id -> (property name -> last normalized value)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<String, LedgerEntry>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `id.prop`.
    ///
    /// Nothing is written when `prop` is one of `static_fields`, when `id` is
    /// empty, or when `phase` is part of reconciliation. Writes merge into the
    /// existing entry. Returns whether a write happened.
    pub fn set_request_value(
        &mut self,
        id: &str,
        prop: &str,
        value: Value,
        static_fields: &[&str],
        phase: Phase,
    ) -> bool {
        if !phase.records() || id.is_empty() || static_fields.contains(&prop) {
            return false;
        }
        self.entries
            .entry(id.to_owned())
            .or_default()
            .insert(prop.to_owned(), value);
        true
    }

    /// All stored values of one component.
    pub fn entry(&self, id: &str) -> Option<&LedgerEntry> {
        self.entries.get(id)
    }

    /// A single stored value.
    pub fn get(&self, id: &str, prop: &str) -> Option<&Value> {
        self.entries.get(id).and_then(|entry| entry.get(prop))
    }

    /// Drop everything stored for `id`.
    pub fn remove(&mut self, id: &str) -> Option<LedgerEntry> {
        self.entries.remove(id)
    }

    /// Component ids with stored values, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of components with stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Wire format ──────────────────────────────────────────────────

    /// The ledger as a JSON value (an object of objects).
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(id, entry)| (id.clone(), Value::Object(entry.clone())))
                .collect(),
        )
    }

    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Strictly decode the JSON wire format.
    pub fn from_json(text: &str) -> Result<Self, LedgerError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Strictly decode an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, LedgerError> {
        let Value::Object(map) = value else {
            return Err(LedgerError::NotAnObject);
        };
        let mut entries = BTreeMap::new();
        for (id, entry) in map {
            match entry {
                Value::Object(props) => {
                    entries.insert(id, props);
                }
                _ => return Err(LedgerError::InvalidEntry(id)),
            }
        }
        Ok(Self { entries })
    }

    /// Decode the wire format, keeping whatever is well formed.
    ///
    /// Malformed JSON or a non-object payload yields an empty ledger; entries
    /// that are not objects are dropped. Each loss is logged.
    pub fn decode_lossy(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::new();
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value_lossy(value),
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed ledger payload");
                Self::new()
            }
        }
    }

    /// Lossy counterpart of [`Ledger::from_value`].
    pub fn from_value_lossy(value: Value) -> Self {
        let Value::Object(map) = value else {
            tracing::warn!("discarding ledger payload that is not an object");
            return Self::new();
        };
        let mut entries = BTreeMap::new();
        for (id, entry) in map {
            match entry {
                Value::Object(props) if !id.is_empty() => {
                    entries.insert(id, props);
                }
                _ => tracing::warn!(id = %id, "dropping malformed ledger entry"),
            }
        }
        Self { entries }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.to_value(), json!({}));
    }

    #[test]
    fn live_write_records_value() {
        let mut ledger = Ledger::new();
        assert!(ledger.set_request_value("t1", "value", json!(true), &[], Phase::Live));
        assert_eq!(ledger.to_value(), json!({"t1": {"value": true}}));
    }

    #[test]
    fn writes_merge_per_id() {
        let mut ledger = Ledger::new();
        ledger.set_request_value("a", "x", json!(1), &[], Phase::Live);
        ledger.set_request_value("a", "y", json!(2), &[], Phase::Live);
        ledger.set_request_value("a", "x", json!(3), &[], Phase::Live);
        assert_eq!(ledger.entry("a"), json!({"x": 3, "y": 2}).as_object());
    }

    #[test]
    fn suppressed_writes() {
        let mut ledger = Ledger::new();
        assert!(!ledger.set_request_value("", "x", json!(1), &[], Phase::Live));
        assert!(!ledger.set_request_value("a", "id", json!("a"), &["id"], Phase::Live));
        assert!(!ledger.set_request_value("a", "x", json!(1), &[], Phase::Normalize));
        assert!(!ledger.set_request_value("a", "x", json!(1), &[], Phase::Replay));
        assert!(ledger.is_empty());
    }

    #[test]
    fn remove_and_ids() {
        let mut ledger = Ledger::new();
        ledger.set_request_value("b", "x", json!(1), &[], Phase::Live);
        ledger.set_request_value("a", "x", json!(1), &[], Phase::Live);
        assert_eq!(ledger.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(ledger.remove("a").is_some());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("a", "x"), None);
    }

    #[test]
    fn json_wire_round_trip() {
        let mut ledger = Ledger::new();
        ledger.set_request_value("grid", "sort", json!(["name", "desc"]), &[], Phase::Live);
        ledger.set_request_value("grid", "page", json!(3), &[], Phase::Live);
        let text = ledger.to_json().unwrap();
        assert_eq!(text, r#"{"grid":{"page":3,"sort":["name","desc"]}}"#);
        assert_eq!(Ledger::from_json(&text).unwrap(), ledger);
    }

    #[test]
    fn strict_decode_errors() {
        assert!(matches!(Ledger::from_json("{"), Err(LedgerError::Json(_))));
        assert!(matches!(Ledger::from_json("[1]"), Err(LedgerError::NotAnObject)));
        assert!(matches!(
            Ledger::from_json(r#"{"a": 1}"#),
            Err(LedgerError::InvalidEntry(id)) if id == "a"
        ));
    }

    #[test]
    fn lossy_decode_keeps_good_entries() {
        let ledger = Ledger::decode_lossy(r#"{"a": {"x": 1}, "b": 7, "": {"y": 2}}"#);
        assert_eq!(ledger.to_value(), json!({"a": {"x": 1}}));
    }

    #[test]
    fn lossy_decode_never_fails() {
        assert!(Ledger::decode_lossy("").is_empty());
        assert!(Ledger::decode_lossy("not json").is_empty());
        assert!(Ledger::decode_lossy("[1, 2]").is_empty());
        assert!(Ledger::decode_lossy("null").is_empty());
    }
}
