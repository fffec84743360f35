//! Toggle widget: a boolean switch that flips on every click.

use std::any::Any;

use serde_json::{json, Value};

use super::EVENT_CHANGE;
use crate::component::base::BaseComponent;
use crate::component::context::RenderContext;
use crate::component::traits::Component;
use crate::event::response::ResponseEvent;
use crate::event::trigger::TriggerEvent;
use crate::named_enum;
use crate::property::validate::to_bool;
use crate::property::Properties;
use crate::render::{Element, RenderError};
use crate::state::directory::ComponentKey;

named_enum! {
    /// Property names declared by [`Toggle`].
    pub enum ToggleProp {
        Value => "value",
        CheckBox => "check_box",
        Border => "border",
        Full => "full",
        Disabled => "disabled",
    }
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

/// A boolean switch, rendered as a slider or a check box.
///
/// # Examples
///
/// ```ignore
/// let toggle = Toggle::new("notify").with_value(true).check_box(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Toggle {
    pub base: BaseComponent,
    pub value: bool,
    pub check_box: bool,
    pub border: bool,
    pub full: bool,
    pub disabled: bool,
}

impl Toggle {
    /// Create an unchecked toggle.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: BaseComponent::new(id),
            ..Self::default()
        }
    }

    /// Set the initial value (builder).
    pub fn with_value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    /// Render as a check box instead of a slider (builder).
    pub fn check_box(mut self, check_box: bool) -> Self {
        self.check_box = check_box;
        self
    }

    /// Set the disabled state (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Properties for Toggle {
    type Key = ToggleProp;

    fn get_key(&self, key: ToggleProp) -> Value {
        match key {
            ToggleProp::Value => json!(self.value),
            ToggleProp::CheckBox => json!(self.check_box),
            ToggleProp::Border => json!(self.border),
            ToggleProp::Full => json!(self.full),
            ToggleProp::Disabled => json!(self.disabled),
        }
    }

    fn validate_key(&self, _key: ToggleProp, raw: &Value) -> Value {
        json!(to_bool(raw, false))
    }

    fn assign_key(&mut self, key: ToggleProp, value: &Value) {
        let value = to_bool(value, false);
        match key {
            ToggleProp::Value => self.value = value,
            ToggleProp::CheckBox => self.check_box = value,
            ToggleProp::Border => self.border = value,
            ToggleProp::Full => self.full = value,
            ToggleProp::Disabled => self.disabled = value,
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for Toggle {
    fn component_type(&self) -> &'static str {
        "Toggle"
    }

    fn base(&self) -> &BaseComponent {
        &self.base
    }

    fn on_request(
        &mut self,
        this: ComponentKey,
        _event: &TriggerEvent,
        ctx: &mut RenderContext,
    ) -> ResponseEvent {
        if self.disabled {
            return ResponseEvent::from_node(this, self.name(), EVENT_CHANGE, json!(self.value));
        }
        let next = !self.value;
        let value = ctx.update(self, "value", json!(next));
        ResponseEvent::from_node(this, self.name(), EVENT_CHANGE, value)
    }

    fn render(&self, children: &[String]) -> Result<String, RenderError> {
        let state = if self.value { "on" } else { "off" };
        let control = if self.check_box {
            Element::new("input")
                .attr("type", "checkbox")
                .attr("name", &self.base.name)
                .flag("checked", self.value)
                .flag("disabled", self.disabled)
                .void()
                .finish()
        } else {
            Element::new("span")
                .attr("class", format!("toggle-{state}"))
                .finish()
        };
        Ok(Element::for_component("div", &self.base, self.component_type())
            .attr("data-state", state)
            .flag("data-border", self.border)
            .flag("data-full", self.full)
            .flag("aria-disabled", self.disabled)
            .child(control)
            .children(children)
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
