//! Response events: the outcome of a trigger as it bubbles toward the root.
//!
//! A [`ResponseEvent`] names what happened (`name`, `value`), which component
//! should be rendered as the result (`trigger`) and how the client should
//! patch the page with it (`directives`).

use std::fmt;

use serde_json::Value;

use crate::component::base::Swap;
use crate::component::traits::Component;
use crate::property::Named;
use crate::state::directory::ComponentKey;

/// Name of the response produced when a trigger id is not in the directory.
pub const EVENT_ROUTING_FAILURE: &str = "routing_failure";

/// Header overriding the swap target.
pub const HEADER_RETARGET: &str = "HX-Retarget";
/// Header overriding the swap strategy.
pub const HEADER_RESWAP: &str = "HX-Reswap";
/// Header asking the client to navigate away.
pub const HEADER_REDIRECT: &str = "HX-Redirect";

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// The component a response renders.
#[derive(Default)]
pub enum Trigger {
    /// A mounted component.
    Node(ComponentKey),
    /// A replacement built outside the tree (a toast, a different view).
    Detached(Box<dyn Component>),
    /// Nothing to render.
    #[default]
    None,
}

impl Trigger {
    /// The arena key, if the trigger is a mounted node.
    pub fn node(&self) -> Option<ComponentKey> {
        match self {
            Trigger::Node(key) => Some(*key),
            _ => None,
        }
    }

    /// The detached component, if any.
    pub fn detached(&self) -> Option<&dyn Component> {
        match self {
            Trigger::Detached(component) => Some(&**component),
            _ => None,
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Node(key) => f.debug_tuple("Node").field(key).finish(),
            Trigger::Detached(component) => f
                .debug_tuple("Detached")
                .field(&component.component_type())
                .field(&component.id())
                .finish(),
            Trigger::None => f.write_str("None"),
        }
    }
}

// ---------------------------------------------------------------------------
// PatchDirectives
// ---------------------------------------------------------------------------

/// Client-side patch instructions attached to a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchDirectives {
    /// Selector replacing the client's swap target.
    pub retarget: Option<String>,
    /// Swap strategy replacing the client's default.
    pub reswap: Option<Swap>,
    /// URL the client should navigate to.
    pub redirect: Option<String>,
}

impl PatchDirectives {
    /// Whether no directive is set.
    pub fn is_empty(&self) -> bool {
        self.retarget.is_none() && self.reswap.is_none() && self.redirect.is_none()
    }

    /// The directives as transport headers.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let Some(target) = &self.retarget {
            headers.push((HEADER_RETARGET, target.clone()));
        }
        if let Some(swap) = self.reswap {
            headers.push((HEADER_RESWAP, swap.as_str().to_owned()));
        }
        if let Some(url) = &self.redirect {
            headers.push((HEADER_REDIRECT, url.clone()));
        }
        headers
    }
}

// ---------------------------------------------------------------------------
// ResponseEvent
// ---------------------------------------------------------------------------

/// A response travelling up the hook chain.
#[derive(Debug, Default)]
pub struct ResponseEvent {
    /// What to render as the result.
    pub trigger: Trigger,
    /// Name (role) of the component that produced the event.
    pub trigger_name: String,
    /// Event name, e.g. `change` or `click`.
    pub name: String,
    /// Event payload.
    pub value: Value,
    pub directives: PatchDirectives,
}

impl ResponseEvent {
    /// An event produced by a mounted component.
    pub fn from_node(
        key: ComponentKey,
        trigger_name: impl Into<String>,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            trigger: Trigger::Node(key),
            trigger_name: trigger_name.into(),
            name: name.into(),
            value,
            directives: PatchDirectives::default(),
        }
    }

    /// Replace the event name and value, keeping trigger and directives.
    pub fn renamed(mut self, name: impl Into<String>, value: Value) -> Self {
        self.name = name.into();
        self.value = value;
        self
    }

    /// Render `key` instead of the current trigger.
    pub fn with_node(mut self, key: ComponentKey, trigger_name: impl Into<String>) -> Self {
        self.trigger = Trigger::Node(key);
        self.trigger_name = trigger_name.into();
        self
    }

    /// Render a detached component instead of the current trigger.
    pub fn with_detached(mut self, component: impl Component) -> Self {
        self.trigger = Trigger::Detached(Box::new(component));
        self
    }

    /// Retarget the client swap (builder).
    pub fn retarget(mut self, selector: impl Into<String>, swap: Swap) -> Self {
        self.directives.retarget = Some(selector.into());
        self.directives.reswap = Some(swap);
        self
    }

    /// Ask the client to navigate to `url` (builder).
    pub fn redirect(mut self, url: impl Into<String>) -> Self {
        self.directives.redirect = Some(url.into());
        self
    }

    /// Whether this is the response to an unroutable trigger.
    pub fn is_routing_failure(&self) -> bool {
        self.name == EVENT_ROUTING_FAILURE
    }
}

// ===========================================================================
// Tests
// ===========================================================================
