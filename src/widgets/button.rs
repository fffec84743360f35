//! Button widget: reports a click, optionally carrying a posted value.
//!
//! The button posts its `data.value` under the field `<id>_value`; the click
//! event carries whatever arrived in that field.

use std::any::Any;

use serde_json::{json, Value};

use super::EVENT_CLICK;
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
    /// Visual weight of a button.
    #[derive(Default)]
    pub enum ButtonStyle {
        #[default]
        Default => "default",
        Primary => "primary",
        Border => "border",
    }
}

named_enum! {
    /// HTML button type.
    #[derive(Default)]
    pub enum ButtonType {
        #[default]
        Button => "button",
        Submit => "submit",
    }
}

named_enum! {
    /// Property names declared by [`Button`].
    pub enum ButtonProp {
        Label => "label",
        ButtonStyle => "button_style",
        ButtonType => "button_type",
        Disabled => "disabled",
        Full => "full",
        AutoFocus => "auto_focus",
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A clickable button.
///
/// # Examples
///
/// ```ignore
/// let btn = Button::new("save").with_label("Save").style(ButtonStyle::Primary);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Button {
    pub base: BaseComponent,
    pub label: String,
    pub button_style: ButtonStyle,
    pub button_type: ButtonType,
    pub disabled: bool,
    pub full: bool,
    pub auto_focus: bool,
}

impl Button {
    /// Create a new button with the given id.
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

    /// Set the label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the button style (builder).
    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.button_style = style;
        self
    }

    /// Set whether the button is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Name of the form field that carries the button value.
    pub fn value_field(&self) -> String {
        format!("{}_value", self.base.id)
    }
}

impl Properties for Button {
    type Key = ButtonProp;

    fn get_key(&self, key: ButtonProp) -> Value {
        match key {
            ButtonProp::Label => json!(self.label),
            ButtonProp::ButtonStyle => json!(self.button_style.as_str()),
            ButtonProp::ButtonType => json!(self.button_type.as_str()),
            ButtonProp::Disabled => json!(self.disabled),
            ButtonProp::Full => json!(self.full),
            ButtonProp::AutoFocus => json!(self.auto_focus),
        }
    }

    fn validate_key(&self, key: ButtonProp, raw: &Value) -> Value {
        match key {
            ButtonProp::Label => json!(to_string(raw, "")),
            ButtonProp::ButtonStyle => json!(to_enum::<ButtonStyle>(raw).as_str()),
            ButtonProp::ButtonType => json!(to_enum::<ButtonType>(raw).as_str()),
            ButtonProp::Disabled | ButtonProp::Full | ButtonProp::AutoFocus => {
                json!(to_bool(raw, false))
            }
        }
    }

    fn assign_key(&mut self, key: ButtonProp, value: &Value) {
        match key {
            ButtonProp::Label => self.label = to_string(value, ""),
            ButtonProp::ButtonStyle => self.button_style = to_enum(value),
            ButtonProp::ButtonType => self.button_type = to_enum(value),
            ButtonProp::Disabled => self.disabled = to_bool(value, false),
            ButtonProp::Full => self.full = to_bool(value, false),
            ButtonProp::AutoFocus => self.auto_focus = to_bool(value, false),
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for Button {
    fn component_type(&self) -> &'static str {
        "Button"
    }

    fn base(&self) -> &BaseComponent {
        &self.base
    }

    fn on_request(
        &mut self,
        this: ComponentKey,
        event: &TriggerEvent,
        _ctx: &mut RenderContext,
    ) -> ResponseEvent {
        let value = event
            .value(&self.value_field())
            .map(|v| Value::String(v.to_owned()))
            .unwrap_or(Value::Null);
        ResponseEvent::from_node(this, self.name(), EVENT_CLICK, value)
    }

    fn render(&self, _children: &[String]) -> Result<String, RenderError> {
        let value = self.base.data_str("value");
        Ok(Element::for_component("button", &self.base, self.component_type())
            .attr("type", self.button_type.as_str())
            .attr("name", self.value_field())
            .attr_if(!value.is_empty(), "value", &value)
            .attr_if(self.button_style != ButtonStyle::Default, "data-style", self.button_style.as_str())
            .flag("data-full", self.full)
            .flag("disabled", self.disabled)
            .flag("autofocus", self.auto_focus)
            .text(&self.label)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::mount::mount;
    use crate::config::EngineConfig;
    use crate::event::pipeline::dispatch;
    use crate::property::PropertyAccess;
    use crate::state::directory::{Directory, Hook};
    use pretty_assertions::assert_eq;

    #[test]
    fn style_outside_set_falls_back() {
        let button = Button::new("b1");
        assert_eq!(button.validate("button_style", &json!("primary")), json!("primary"));
        assert_eq!(button.validate("button_style", &json!("loud")), json!("default"));
        assert_eq!(button.validate("button_type", &Value::Null), json!("button"));
    }

    #[test]
    fn click_carries_posted_value() {
        let mut dir = Directory::new();
        let mut ctx = RenderContext::new(EngineConfig::default());
        mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Button::new("b1")));

        let result = dispatch(
            &mut dir,
            &mut ctx,
            &TriggerEvent::new("b1").with_value("b1_value", "42"),
        );
        assert_eq!(result.response.name, "click");
        assert_eq!(result.response.value, json!("42"));
        assert_eq!(result.response.trigger_name, "b1");

        let bare = dispatch(&mut dir, &mut ctx, &TriggerEvent::new("b1"));
        assert_eq!(bare.response.value, Value::Null);
        assert!(ctx.ledger().is_empty());
    }

    #[test]
    fn render_escapes_label() {
        let button = Button::new("b1")
            .with_label("Save & close")
            .style(ButtonStyle::Primary);
        insta::assert_snapshot!(
            button.render(&[]).unwrap(),
            @r#"<button id="b1" class="button" type="button" name="b1_value" data-style="primary">Save &amp; close</button>"#
        );
    }
}
