//! Input widget: a single-line text field.
//!
//! The posted value arrives in the form field named after the trigger. A
//! password field never records its value in the ledger.

use std::any::Any;

use serde_json::{json, Value};

use super::{posted_value, EVENT_CHANGE};
use crate::component::base::BaseComponent;
use crate::component::context::RenderContext;
use crate::component::traits::Component;
use crate::event::response::ResponseEvent;
use crate::event::trigger::TriggerEvent;
use crate::named_enum;
use crate::property::validate::{to_bool, to_enum, to_string};
use crate::property::{Named, Properties};
use crate::render::{Element, RenderError};
use crate::state::directory::ComponentKey;

named_enum! {
    /// HTML input type.
    #[derive(Default)]
    pub enum InputType {
        #[default]
        Text => "text",
        Password => "password",
        Email => "email",
        Search => "search",
        Tel => "tel",
        Url => "url",
        Color => "color",
        Date => "date",
    }
}

named_enum! {
    /// Property names declared by [`Input`].
    pub enum InputProp {
        InputType => "input_type",
        Value => "value",
        Placeholder => "placeholder",
        Label => "label",
        Disabled => "disabled",
        Invalid => "invalid",
        Full => "full",
        AutoFocus => "auto_focus",
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single-line text input.
///
/// # Examples
///
/// ```ignore
/// let input = Input::new("login_username").with_name("username");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub base: BaseComponent,
    pub input_type: InputType,
    pub value: String,
    pub placeholder: String,
    pub label: String,
    pub disabled: bool,
    pub invalid: bool,
    pub full: bool,
    pub auto_focus: bool,
}

impl Input {
    /// Create an empty text input.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: BaseComponent::new(id),
            ..Self::default()
        }
    }

    /// Set the name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.base.name = name.into();
        self
    }

    /// Set the input type (builder).
    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Set the initial value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the placeholder text (builder).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl Properties for Input {
    type Key = InputProp;

    fn get_key(&self, key: InputProp) -> Value {
        match key {
            InputProp::InputType => json!(self.input_type.as_str()),
            InputProp::Value => json!(self.value),
            InputProp::Placeholder => json!(self.placeholder),
            InputProp::Label => json!(self.label),
            InputProp::Disabled => json!(self.disabled),
            InputProp::Invalid => json!(self.invalid),
            InputProp::Full => json!(self.full),
            InputProp::AutoFocus => json!(self.auto_focus),
        }
    }

    fn validate_key(&self, key: InputProp, raw: &Value) -> Value {
        match key {
            InputProp::InputType => json!(to_enum::<InputType>(raw).as_str()),
            InputProp::Value | InputProp::Placeholder | InputProp::Label => {
                json!(to_string(raw, ""))
            }
            InputProp::Disabled | InputProp::Invalid | InputProp::Full | InputProp::AutoFocus => {
                json!(to_bool(raw, false))
            }
        }
    }

    fn assign_key(&mut self, key: InputProp, value: &Value) {
        match key {
            InputProp::InputType => self.input_type = to_enum(value),
            InputProp::Value => self.value = to_string(value, ""),
            InputProp::Placeholder => self.placeholder = to_string(value, ""),
            InputProp::Label => self.label = to_string(value, ""),
            InputProp::Disabled => self.disabled = to_bool(value, false),
            InputProp::Invalid => self.invalid = to_bool(value, false),
            InputProp::Full => self.full = to_bool(value, false),
            InputProp::AutoFocus => self.auto_focus = to_bool(value, false),
        }
    }

    fn static_keys(&self) -> &'static [InputProp] {
        match self.input_type {
            InputType::Password => &[InputProp::Value],
            _ => &[],
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for Input {
    fn component_type(&self) -> &'static str {
        "Input"
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
        let field = Element::for_component("input", &self.base, self.component_type())
            .attr("type", self.input_type.as_str())
            .attr("name", &self.base.name)
            .attr_if(self.input_type != InputType::Password, "value", &self.value)
            .attr_if(!self.placeholder.is_empty(), "placeholder", &self.placeholder)
            .flag("data-full", self.full)
            .flag("aria-invalid", self.invalid)
            .flag("disabled", self.disabled)
            .flag("autofocus", self.auto_focus)
            .void()
            .finish();
        if self.label.is_empty() {
            return Ok(field);
        }
        Ok(Element::new("label")
            .text(&self.label)
            .child(field)
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
