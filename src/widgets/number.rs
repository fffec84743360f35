//! Number input: a numeric field clamped to optional bounds.

use std::any::Any;

use serde_json::{json, Value};

use super::{posted_value, EVENT_CHANGE};
use crate::component::base::BaseComponent;
use crate::component::context::RenderContext;
use crate::component::traits::Component;
use crate::event::response::ResponseEvent;
use crate::event::trigger::TriggerEvent;
use crate::named_enum;
use crate::property::validate::{clamp_number, to_bool, to_float};
use crate::property::Properties;
use crate::render::{Element, RenderError};
use crate::state::directory::ComponentKey;

named_enum! {
    /// Property names declared by [`NumberInput`].
    ///
    /// `value` comes last so it is normalized against the final bounds.
    pub enum NumberProp {
        Integer => "integer",
        Min => "min",
        Max => "max",
        Disabled => "disabled",
        Full => "full",
        Value => "value",
    }
}

/// A finite float, or `None` for anything else.
fn to_bound(raw: &Value) -> Option<f64> {
    Some(to_float(raw, f64::NAN)).filter(|f| f.is_finite())
}

// ---------------------------------------------------------------------------
// NumberInput
// ---------------------------------------------------------------------------

/// A numeric input.
#[derive(Debug, Clone, Default)]
pub struct NumberInput {
    pub base: BaseComponent,
    pub value: f64,
    pub integer: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub disabled: bool,
    pub full: bool,
}

impl NumberInput {
    /// Create a float input with value 0 and no bounds.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: BaseComponent::new(id),
            ..Self::default()
        }
    }

    /// Set the initial value (builder).
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the bounds (builder).
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Accept integers only (builder).
    pub fn integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    fn number(&self, value: f64) -> Value {
        if self.integer {
            json!(value as i64)
        } else {
            json!(value)
        }
    }
}

impl Properties for NumberInput {
    type Key = NumberProp;

    fn get_key(&self, key: NumberProp) -> Value {
        match key {
            NumberProp::Integer => json!(self.integer),
            NumberProp::Min => json!(self.min),
            NumberProp::Max => json!(self.max),
            NumberProp::Disabled => json!(self.disabled),
            NumberProp::Full => json!(self.full),
            NumberProp::Value => self.number(self.value),
        }
    }

    fn validate_key(&self, key: NumberProp, raw: &Value) -> Value {
        match key {
            NumberProp::Integer | NumberProp::Disabled | NumberProp::Full => {
                json!(to_bool(raw, false))
            }
            NumberProp::Min | NumberProp::Max => json!(to_bound(raw)),
            NumberProp::Value => {
                let value = clamp_number(to_float(raw, 0.0), self.min, self.max, self.integer);
                self.number(value)
            }
        }
    }

    fn assign_key(&mut self, key: NumberProp, value: &Value) {
        match key {
            NumberProp::Integer => self.integer = to_bool(value, false),
            NumberProp::Min => self.min = to_bound(value),
            NumberProp::Max => self.max = to_bound(value),
            NumberProp::Disabled => self.disabled = to_bool(value, false),
            NumberProp::Full => self.full = to_bool(value, false),
            NumberProp::Value => self.value = to_float(value, 0.0),
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for NumberInput {
    fn component_type(&self) -> &'static str {
        "NumberInput"
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
        let step = if self.integer { "1" } else { "any" };
        Ok(Element::for_component("input", &self.base, self.component_type())
            .attr("type", "number")
            .attr("name", &self.base.name)
            .attr("value", self.number(self.value).to_string())
            .attr("step", step)
            .attr_if(self.min.is_some(), "min", self.get_key(NumberProp::Min).to_string())
            .attr_if(self.max.is_some(), "max", self.get_key(NumberProp::Max).to_string())
            .flag("data-full", self.full)
            .flag("disabled", self.disabled)
            .void()
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
    use crate::component::reconcile::reconcile;
    use crate::property::{Phase, PropertyAccess};
    use crate::state::ledger::Ledger;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_is_clamped() {
        let number = NumberInput::new("n1").with_bounds(Some(0.0), Some(10.0));
        assert_eq!(number.validate("value", &json!(12.5)), json!(10.0));
        assert_eq!(number.validate("value", &json!("-3")), json!(0.0));
        assert_eq!(number.validate("value", &json!("abc")), json!(0.0));
    }

    #[test]
    fn integer_mode_floors() {
        let number = NumberInput::new("n1").integer(true);
        assert_eq!(number.validate("value", &json!(3.9)), json!(3));
        assert_eq!(number.validate("value", &json!(-0.5)), json!(-1));
    }

    #[test]
    fn bounds_accept_null() {
        let number = NumberInput::new("n1");
        assert_eq!(number.validate("min", &Value::Null), Value::Null);
        assert_eq!(number.validate("min", &json!("2.5")), json!(2.5));
        assert_eq!(number.validate("max", &json!("inf")), Value::Null);
    }

    #[test]
    fn validation_is_idempotent() {
        let number = NumberInput::new("n1")
            .with_bounds(Some(1.0), Some(5.0))
            .integer(true);
        for raw in [json!(7.7), json!("2.2"), Value::Null, json!([1])] {
            let once = number.validate("value", &raw);
            assert_eq!(number.validate("value", &once), once);
        }
    }

    #[test]
    fn replay_applies_bounds_before_value() {
        let mut live = NumberInput::new("n1");
        let mut ledger = Ledger::new();
        live.set_property("max", &json!(5), Phase::Live, &mut ledger);
        live.set_property("value", &json!(4), Phase::Live, &mut ledger);

        let mut fresh = NumberInput::new("n1");
        reconcile(&mut fresh, &mut ledger);
        assert_eq!(fresh.max, Some(5.0));
        assert_eq!(fresh.value, 4.0);
    }

    #[test]
    fn render_number() {
        let mut number = NumberInput::new("n1").with_value(2.0).integer(true);
        number.min = Some(0.0);
        number.base.name = "qty".into();
        insta::assert_snapshot!(
            number.render(&[]).unwrap(),
            @r#"<input id="n1" class="numberinput" type="number" name="qty" value="2" step="1" min="0.0">"#
        );
    }
}
