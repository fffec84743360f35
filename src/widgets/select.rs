//! Select widget: one value out of a fixed option list.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{posted_value, EVENT_CHANGE};
use crate::component::base::BaseComponent;
use crate::component::context::RenderContext;
use crate::component::traits::Component;
use crate::event::response::ResponseEvent;
use crate::event::trigger::TriggerEvent;
use crate::named_enum;
use crate::property::validate::{to_bool, to_string};
use crate::property::Properties;
use crate::render::{Element, RenderError};
use crate::state::directory::ComponentKey;

named_enum! {
    /// Property names declared by [`Select`].
    ///
    /// `value` is checked against the options, so it is declared after them.
    pub enum SelectProp {
        Disabled => "disabled",
        Full => "full",
        IsNull => "is_null",
        Options => "options",
        Value => "value",
    }
}

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    /// An option whose text is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
        }
    }

    /// An option with separate display text.
    pub fn with_text(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Normalize an option list.
///
/// Accepts plain strings and `{value, text}` objects; the text defaults to the
/// value. Anything else is dropped.
fn to_options(raw: &Value) -> Vec<SelectOption> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(value) => Some(SelectOption::new(value.as_str())),
            Value::Object(map) => {
                let value = to_string(map.get("value").unwrap_or(&Value::Null), "");
                let text = to_string(map.get("text").unwrap_or(&Value::Null), &value);
                Some(SelectOption { value, text })
            }
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// A drop-down list.
#[derive(Debug, Clone, Default)]
pub struct Select {
    pub base: BaseComponent,
    pub value: String,
    pub options: Vec<SelectOption>,
    /// Whether the empty value is allowed.
    pub is_null: bool,
    pub disabled: bool,
    pub full: bool,
}

impl Select {
    /// Create a select without options.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: BaseComponent::new(id),
            ..Self::default()
        }
    }

    /// Set the options (builder).
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Set the initial value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Allow the empty value (builder).
    pub fn nullable(mut self, is_null: bool) -> Self {
        self.is_null = is_null;
        self
    }

    fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

impl Properties for Select {
    type Key = SelectProp;

    fn get_key(&self, key: SelectProp) -> Value {
        match key {
            SelectProp::Disabled => json!(self.disabled),
            SelectProp::Full => json!(self.full),
            SelectProp::IsNull => json!(self.is_null),
            SelectProp::Options => json!(self.options),
            SelectProp::Value => json!(self.value),
        }
    }

    fn validate_key(&self, key: SelectProp, raw: &Value) -> Value {
        match key {
            SelectProp::Disabled | SelectProp::Full | SelectProp::IsNull => {
                json!(to_bool(raw, false))
            }
            SelectProp::Options => json!(to_options(raw)),
            SelectProp::Value => {
                let value = to_string(raw, "");
                if self.has_option(&value) || (self.is_null && value.is_empty()) {
                    json!(value)
                } else if self.is_null {
                    json!("")
                } else {
                    json!(self
                        .options
                        .first()
                        .map(|option| option.value.as_str())
                        .unwrap_or(""))
                }
            }
        }
    }

    fn assign_key(&mut self, key: SelectProp, value: &Value) {
        match key {
            SelectProp::Disabled => self.disabled = to_bool(value, false),
            SelectProp::Full => self.full = to_bool(value, false),
            SelectProp::IsNull => self.is_null = to_bool(value, false),
            SelectProp::Options => self.options = to_options(value),
            SelectProp::Value => self.value = to_string(value, ""),
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for Select {
    fn component_type(&self) -> &'static str {
        "Select"
    }

    fn base(&self) -> &BaseComponent {
        &self.base
    }

    fn on_request(
        &mut self,
        this: ComponentKey,
        event: &TriggerEvent,
        ctx: &mut RenderContext,
    ) -> ResponseEvent {
        let raw = posted_value(event, self.name());
        let value = ctx.update(self, "value", raw);
        ResponseEvent::from_node(this, self.name(), EVENT_CHANGE, value)
    }

    fn render(&self, _children: &[String]) -> Result<String, RenderError> {
        let mut options = Vec::with_capacity(self.options.len() + 1);
        if self.is_null {
            options.push(
                Element::new("option")
                    .attr("value", "")
                    .flag("selected", self.value.is_empty())
                    .finish(),
            );
        }
        for option in &self.options {
            options.push(
                Element::new("option")
                    .attr("value", &option.value)
                    .flag("selected", option.value == self.value)
                    .text(&option.text)
                    .finish(),
            );
        }
        Ok(Element::for_component("select", &self.base, self.component_type())
            .attr("name", &self.base.name)
            .flag("data-full", self.full)
            .flag("disabled", self.disabled)
            .children(&options)
            .finish())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
