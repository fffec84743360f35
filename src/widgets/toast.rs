//! Toast widget: a short, self-dismissing notification.

use std::any::Any;

use serde_json::{json, Value};

use crate::component::base::BaseComponent;
use crate::component::traits::Component;
use crate::named_enum;
use crate::property::validate::{to_enum, to_integer, to_string};
use crate::property::{Named, Properties};
use crate::render::{Element, RenderError};

/// Default display time in milliseconds.
pub const DEFAULT_TIMEOUT: i64 = 4000;

named_enum! {
    /// Severity of a toast.
    #[derive(Default)]
    pub enum ToastType {
        #[default]
        Info => "info",
        Error => "error",
        Success => "success",
    }
}

named_enum! {
    /// Property names declared by [`Toast`].
    pub enum ToastProp {
        ToastType => "toast_type",
        Message => "message",
        Timeout => "timeout",
    }
}

// ---------------------------------------------------------------------------
// Toast
// ---------------------------------------------------------------------------

/// A notification message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub base: BaseComponent,
    pub toast_type: ToastType,
    pub message: String,
    /// Milliseconds before the client hides it; 0 keeps it until dismissed.
    pub timeout: i64,
}

impl Default for Toast {
    fn default() -> Self {
        Self {
            base: BaseComponent::default(),
            toast_type: ToastType::default(),
            message: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Toast {
    /// Create an info toast. An empty id is generated on mount.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: BaseComponent::new(id),
            ..Self::default()
        }
    }

    /// Set the severity (builder).
    pub fn with_type(mut self, toast_type: ToastType) -> Self {
        self.toast_type = toast_type;
        self
    }

    /// Set the message (builder).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the timeout in milliseconds (builder).
    pub fn with_timeout(mut self, timeout: i64) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Properties for Toast {
    type Key = ToastProp;

    fn get_key(&self, key: ToastProp) -> Value {
        match key {
            ToastProp::ToastType => json!(self.toast_type.as_str()),
            ToastProp::Message => json!(self.message),
            ToastProp::Timeout => json!(self.timeout),
        }
    }

    fn validate_key(&self, key: ToastProp, raw: &Value) -> Value {
        match key {
            ToastProp::ToastType => json!(to_enum::<ToastType>(raw).as_str()),
            ToastProp::Message => json!(to_string(raw, "")),
            ToastProp::Timeout => json!(to_integer(raw, DEFAULT_TIMEOUT).max(0)),
        }
    }

    fn assign_key(&mut self, key: ToastProp, value: &Value) {
        match key {
            ToastProp::ToastType => self.toast_type = to_enum(value),
            ToastProp::Message => self.message = to_string(value, ""),
            ToastProp::Timeout => self.timeout = to_integer(value, DEFAULT_TIMEOUT).max(0),
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for Toast {
    fn component_type(&self) -> &'static str {
        "Toast"
    }

    fn base(&self) -> &BaseComponent {
        &self.base
    }

    fn render(&self, _children: &[String]) -> Result<String, RenderError> {
        let role = match self.toast_type {
            ToastType::Error => "alert",
            ToastType::Info | ToastType::Success => "status",
        };
        Ok(Element::for_component("div", &self.base, self.component_type())
            .attr("role", role)
            .attr("data-type", self.toast_type.as_str())
            .attr("data-timeout", self.timeout.to_string())
            .text(&self.message)
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
    use crate::property::PropertyAccess;
    use pretty_assertions::assert_eq;

    #[test]
    fn validators() {
        let toast = Toast::new("n1");
        assert_eq!(toast.validate("toast_type", &json!("error")), json!("error"));
        assert_eq!(toast.validate("toast_type", &json!("fatal")), json!("info"));
        assert_eq!(toast.validate("timeout", &json!(-5)), json!(0));
        assert_eq!(toast.validate("timeout", &json!("soon")), json!(4000));
    }

    #[test]
    fn render_error_toast() {
        let toast = Toast::new("n1")
            .with_type(ToastType::Error)
            .with_message("Invalid parameter: <x>")
            .with_timeout(0);
        insta::assert_snapshot!(
            toast.render(&[]).unwrap(),
            @r#"<div id="n1" class="toast" role="alert" data-type="error" data-timeout="0">Invalid parameter: &lt;x&gt;</div>"#
        );
    }
}
