//! Inbound triggers: which component the client interacted with, and what it posted.
//!
//! The transport sends the triggering element's id and name as request
//! headers and the form values as an urlencoded body. [`TriggerEvent::decode`]
//! turns that into a [`TriggerEvent`]; it never fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header carrying the id of the triggering element.
pub const HEADER_TRIGGER: &str = "HX-Trigger";
/// Header carrying the name of the triggering element.
pub const HEADER_TRIGGER_NAME: &str = "HX-Trigger-Name";
/// Header carrying the id of the swap target.
pub const HEADER_TARGET: &str = "HX-Target";

// ---------------------------------------------------------------------------
// TriggerEvent
// ---------------------------------------------------------------------------

/// One inbound interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Id of the component that was interacted with.
    pub id: String,
    /// Name of the triggering element.
    #[serde(default)]
    pub name: String,
    /// Id of the element the client will swap.
    #[serde(default)]
    pub target: String,
    /// Posted form values. A key may repeat.
    #[serde(default)]
    pub values: BTreeMap<String, Vec<String>>,
}

impl TriggerEvent {
    /// Create a trigger for the component `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the trigger name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the swap target (builder).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Append a posted value (builder).
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.entry(key.into()).or_default().push(value.into());
        self
    }

    /// The first posted value for `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every posted value for `key`.
    pub fn all_values(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parse a form-urlencoded body into a value multimap.
    pub fn parse_form(body: &str) -> BTreeMap<String, Vec<String>> {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            values.entry(key.into_owned()).or_default().push(value.into_owned());
        }
        values
    }

    /// Decode a request from its headers and form-urlencoded body.
    ///
    /// Header names match case-insensitively. Missing headers leave the
    /// corresponding field empty; routing then reports the failure.
    pub fn decode(headers: &[(&str, &str)], body: &str) -> Self {
        let header = |name: &str| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.trim().to_owned())
                .unwrap_or_default()
        };
        Self {
            id: header(HEADER_TRIGGER),
            name: header(HEADER_TRIGGER_NAME),
            target: header(HEADER_TARGET),
            values: Self::parse_form(body),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
