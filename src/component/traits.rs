//! Component trait: identity, composition, event hooks and rendering.
//!
//! A component is rebuilt from scratch on every request. Its property surface
//! comes from [`PropertyAccess`]; this trait adds what the engine needs to
//! mount it, route events to it and turn it into markup.

use std::any::Any;

use serde_json::Value;

use super::base::BaseComponent;
use super::context::RenderContext;
use crate::event::response::ResponseEvent;
use crate::event::trigger::TriggerEvent;
use crate::property::PropertyAccess;
use crate::render::{Element, RenderError};
use crate::state::directory::{ComponentKey, Hook};

// ---------------------------------------------------------------------------
// Component trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every widget.
///
/// Object-safe: the engine stores components as `Box<dyn Component>`.
pub trait Component: PropertyAccess + Any {
    /// Type name, used in logs and as the default CSS class.
    fn component_type(&self) -> &'static str;

    /// The embedded base component.
    fn base(&self) -> &BaseComponent;

    /// Component id.
    fn id(&self) -> &str {
        &self.base().id
    }

    /// Role within the parent.
    fn name(&self) -> &str {
        &self.base().name
    }

    /// Child components, built from the current (reconciled) state.
    ///
    /// Defaults to none (leaf component).
    fn compose(&self) -> Vec<Child> {
        Vec::new()
    }

    /// Called after reconciliation, before the component is composed and indexed.
    fn on_mount(&mut self, _ctx: &RenderContext) {}

    /// Handle an inbound trigger routed to this component.
    ///
    /// `this` is the component's own arena key. The default reports the event
    /// back unchanged without mutating anything.
    fn on_request(
        &mut self,
        this: ComponentKey,
        event: &TriggerEvent,
        _ctx: &mut RenderContext,
    ) -> ResponseEvent {
        ResponseEvent::from_node(this, self.name(), &event.name, Value::Null)
    }

    /// Receive a response event bubbling up from a hooked child.
    ///
    /// Defaults to passing it on unchanged.
    fn on_response(
        &mut self,
        _this: ComponentKey,
        event: ResponseEvent,
        _ctx: &mut RenderContext,
    ) -> ResponseEvent {
        event
    }

    /// Render to markup, given the already rendered children.
    fn render(&self, children: &[String]) -> Result<String, RenderError> {
        Ok(Element::for_component("div", self.base(), self.component_type())
            .children(children)
            .finish())
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("type", &self.component_type())
            .field("id", &self.id())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Child
// ---------------------------------------------------------------------------

/// A composed child and how it is wired to its parent.
#[derive(Debug)]
pub struct Child {
    pub component: Box<dyn Component>,
    pub hook: Hook,
}

impl Child {
    /// A child whose response events bubble into the parent.
    pub fn hooked(component: impl Component) -> Self {
        Self {
            component: Box::new(component),
            hook: Hook::Parent,
        }
    }

    /// A child whose response events stop at itself.
    pub fn plain(component: impl Component) -> Self {
        Self {
            component: Box::new(component),
            hook: Hook::None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Button, Toggle};

    #[test]
    fn identity_comes_from_base() {
        let toggle = Toggle::new("t1");
        assert_eq!(toggle.id(), "t1");
        assert_eq!(toggle.component_type(), "Toggle");
    }

    #[test]
    fn child_wiring() {
        assert_eq!(Child::hooked(Toggle::new("a")).hook, Hook::Parent);
        assert_eq!(Child::plain(Button::new("b")).hook, Hook::None);
    }

    #[test]
    fn debug_shows_type_and_id() {
        let boxed: Box<dyn Component> = Box::new(Toggle::new("t1"));
        let text = format!("{boxed:?}");
        assert!(text.contains("Toggle"));
        assert!(text.contains("t1"));
    }

    #[test]
    fn downcast_through_any() {
        let mut boxed: Box<dyn Component> = Box::new(Toggle::new("t1"));
        assert!(boxed.as_any().downcast_ref::<Button>().is_none());
        boxed.as_any_mut().downcast_mut::<Toggle>().unwrap().value = true;
        assert!(boxed.as_any().downcast_ref::<Toggle>().unwrap().value);
    }
}
