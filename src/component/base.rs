//! Base component: identity, transport hints and the open data bag.
//!
//! Every widget embeds a [`BaseComponent`] and delegates the names it does not
//! declare itself to it. The base is the end of the delegation chain: names it
//! does not recognize either pass through unchanged.

use std::collections::BTreeMap;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Map, Value};

use crate::named_enum;
use crate::property::validate;
use crate::property::{Named, Properties};

/// Prefix of generated component ids.
pub const ID_PREFIX: &str = "ID";

/// Number of random characters in a generated component id.
const ID_LENGTH: usize = 16;

/// Generate a fresh component id: `prefix` followed by random alphanumerics.
pub fn generate_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect();
    format!("{prefix}{suffix}")
}

named_enum! {
    /// Replacement strategy of a client-side swap.
    #[derive(Default)]
    pub enum Swap {
        /// Replace the inner content of the target.
        InnerHtml => "innerHTML",
        /// Replace the whole target node.
        #[default]
        OuterHtml => "outerHTML",
        BeforeBegin => "beforebegin",
        AfterBegin => "afterbegin",
        BeforeEnd => "beforeend",
        AfterEnd => "afterend",
        Delete => "delete",
        /// Do not swap anything.
        None => "none",
    }
}

named_enum! {
    /// Progress indicator shown while a request is in flight.
    #[derive(Default)]
    pub enum Indicator {
        #[default]
        None => "",
        Spinner => "spinner",
    }
}

named_enum! {
    /// Property names declared by [`BaseComponent`].
    pub enum BaseProp {
        Id => "id",
        Name => "name",
        EventUrl => "event_url",
        Target => "target",
        Swap => "swap",
        Indicator => "indicator",
        Class => "class",
        Style => "style",
        Data => "data",
    }
}

// ---------------------------------------------------------------------------
// BaseComponent
// ---------------------------------------------------------------------------

/// Properties shared by every component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseComponent {
    /// Identity; the only thing that survives between requests.
    pub id: String,
    /// Role within the parent. Defaults to the id.
    pub name: String,
    /// Where the client posts events. Opaque to the engine.
    pub event_url: String,
    /// Swap target: `"this"` or an `#id` selector.
    pub target: String,
    pub swap: Swap,
    pub indicator: Indicator,
    /// Extra class names.
    pub class: Vec<String>,
    /// Inline style declarations.
    pub style: BTreeMap<String, String>,
    /// Widget-specific payload.
    pub data: Map<String, Value>,
}

impl BaseComponent {
    /// Create a base with the given id and every other property unset.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the event URL (builder).
    pub fn with_event_url(mut self, url: impl Into<String>) -> Self {
        self.event_url = url.into();
        self
    }

    /// Set the swap target (builder).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Add one entry to the data bag (builder).
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Add a class name (builder). No-op if already present.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.class.contains(&class) {
            self.class.push(class);
        }
        self
    }

    /// Child id derived from this component's id and the child's role.
    pub fn child_id(&self, name: &str) -> String {
        format!("{}_{}", self.id, name)
    }

    /// A data bag entry as a string, empty when absent or not a scalar.
    pub fn data_str(&self, key: &str) -> String {
        self.data
            .get(key)
            .map(|v| validate::to_string(v, ""))
            .unwrap_or_default()
    }
}

impl Properties for BaseComponent {
    type Key = BaseProp;

    fn get_key(&self, key: BaseProp) -> Value {
        match key {
            BaseProp::Id => json!(self.id),
            BaseProp::Name => json!(self.name),
            BaseProp::EventUrl => json!(self.event_url),
            BaseProp::Target => json!(self.target),
            BaseProp::Swap => json!(self.swap.as_str()),
            BaseProp::Indicator => json!(self.indicator.as_str()),
            BaseProp::Class => json!(self.class),
            BaseProp::Style => json!(self.style),
            BaseProp::Data => Value::Object(self.data.clone()),
        }
    }

    fn validate_key(&self, key: BaseProp, raw: &Value) -> Value {
        match key {
            BaseProp::Id => match validate::to_string(raw, "") {
                id if id.is_empty() => json!(generate_id(ID_PREFIX)),
                id => json!(id),
            },
            BaseProp::Name => json!(validate::to_string(raw, &self.id)),
            BaseProp::EventUrl => json!(validate::to_string(raw, "")),
            BaseProp::Target => json!(validate::to_target(raw)),
            BaseProp::Swap => json!(validate::to_enum::<Swap>(raw).as_str()),
            BaseProp::Indicator => json!(validate::to_enum::<Indicator>(raw).as_str()),
            BaseProp::Class => json!(validate::to_string_list(raw)),
            BaseProp::Style => json!(validate::merge_string_map(&self.style, raw)),
            BaseProp::Data => Value::Object(validate::merge_object(&self.data, raw)),
        }
    }

    fn assign_key(&mut self, key: BaseProp, value: &Value) {
        match key {
            BaseProp::Id => self.id = validate::to_string(value, ""),
            BaseProp::Name => self.name = validate::to_string(value, ""),
            BaseProp::EventUrl => self.event_url = validate::to_string(value, ""),
            BaseProp::Target => self.target = validate::to_target(value),
            BaseProp::Swap => self.swap = validate::to_enum(value),
            BaseProp::Indicator => self.indicator = validate::to_enum(value),
            BaseProp::Class => self.class = validate::to_string_list(value),
            BaseProp::Style => {
                self.style = validate::merge_string_map(&BTreeMap::new(), value)
            }
            BaseProp::Data => self.data = validate::merge_object(&Map::new(), value),
        }
    }

    fn static_keys(&self) -> &'static [BaseProp] {
        &[BaseProp::Id, BaseProp::Name]
    }

    fn identity(&self) -> &str {
        &self.id
    }
}

// ===========================================================================
// Tests
// ===========================================================================
