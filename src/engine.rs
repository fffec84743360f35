//! Request scope: one request's component directory and render context.
//!
//! A [`Request`] is built from the ledger the client carried forward, has its
//! page mounted, optionally dispatches one trigger, renders, and hands back the
//! ledger for the next round trip. [`process`] runs that cycle as one call.

use std::any::Any;

use serde_json::Value;

use crate::component::context::RenderContext;
use crate::component::mount::mount;
use crate::component::traits::Component;
use crate::config::EngineConfig;
use crate::event::pipeline::{dispatch, Dispatch};
use crate::event::response::ResponseEvent;
use crate::event::trigger::TriggerEvent;
use crate::render::{HtmlRenderer, RenderError, Renderer};
use crate::state::directory::{ComponentKey, Directory, Hook};
use crate::state::ledger::{Ledger, LedgerError};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Everything one request needs, owned in one place.
#[derive(Debug, Default)]
pub struct Request {
    directory: Directory,
    ctx: RenderContext,
}

impl Request {
    /// Start a request with an empty ledger.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_ledger(config, Ledger::new())
    }

    /// Start a request from a prior ledger.
    pub fn with_ledger(config: EngineConfig, ledger: Ledger) -> Self {
        Self {
            directory: Directory::new(),
            ctx: RenderContext::with_ledger(config, ledger),
        }
    }

    /// Start a request from a ledger in wire format. Never fails.
    pub fn from_wire(config: EngineConfig, wire: &str) -> Self {
        Self {
            directory: Directory::new(),
            ctx: RenderContext::from_wire(config, wire),
        }
    }

    /// Mount a parentless component (the first one becomes the root).
    pub fn mount_root(&mut self, component: impl Component) -> ComponentKey {
        let key = mount(
            &mut self.directory,
            &mut self.ctx,
            None,
            Hook::None,
            Box::new(component),
        );
        // A parentless mount always succeeds.
        key.unwrap_or_default()
    }

    /// Mount a component under `parent`. `None` if `parent` is not mounted.
    pub fn mount_child(
        &mut self,
        parent: ComponentKey,
        hook: Hook,
        component: impl Component,
    ) -> Option<ComponentKey> {
        mount(
            &mut self.directory,
            &mut self.ctx,
            Some(parent),
            hook,
            Box::new(component),
        )
    }

    /// Route one trigger through the event pipeline.
    pub fn dispatch(&mut self, trigger: &TriggerEvent) -> Dispatch {
        dispatch(&mut self.directory, &mut self.ctx, trigger)
    }

    /// Render the whole tree from the root.
    pub fn render(&self) -> Result<String, RenderError> {
        self.render_with(&HtmlRenderer)
    }

    /// Render the whole tree with a custom renderer. Empty when nothing is mounted.
    pub fn render_with<R: Renderer + ?Sized>(&self, renderer: &R) -> Result<String, RenderError> {
        match self.directory.root() {
            Some(root) => renderer.render_node(&self.directory, root),
            None => Ok(String::new()),
        }
    }

    /// Render a mounted component and its subtree.
    pub fn render_node(&self, key: ComponentKey) -> Result<String, RenderError> {
        HtmlRenderer.render_node(&self.directory, key)
    }

    /// Render what a resolved response points at.
    pub fn render_response(&self, response: &ResponseEvent) -> Result<String, RenderError> {
        HtmlRenderer.render_response(&self.directory, response)
    }

    /// Set a property on a mounted component as a live change.
    ///
    /// Returns the normalized value, or `None` when `id` is not mounted.
    pub fn update(&mut self, id: &str, name: &str, raw: Value) -> Option<Value> {
        let key = self.directory.lookup(id)?;
        let component = self.directory.get_mut(key)?;
        Some(self.ctx.update(component, name, raw))
    }

    /// Look up a mounted component by id.
    pub fn lookup(&self, id: &str) -> Option<ComponentKey> {
        self.directory.lookup(id)
    }

    /// A mounted component by id, downcast to its concrete type.
    pub fn get<T: Any>(&self, id: &str) -> Option<&T> {
        self.directory.downcast_ref::<T>(self.lookup(id)?)
    }

    /// The component directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// The request ledger.
    pub fn ledger(&self) -> &Ledger {
        self.ctx.ledger()
    }

    /// The render context.
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.ctx
    }

    /// The ledger in wire format, sealed when configured.
    pub fn to_wire(&self) -> Result<String, LedgerError> {
        self.ctx.to_wire()
    }

    /// End the request, keeping the ledger for the next one.
    pub fn into_ledger(self) -> Ledger {
        self.ctx.into_ledger()
    }
}

// ---------------------------------------------------------------------------
// process
// ---------------------------------------------------------------------------

/// Result of one full round trip.
#[derive(Debug)]
pub struct Outcome {
    /// Ledger to carry into the next request.
    pub ledger: Ledger,
    /// The resolved response.
    pub response: ResponseEvent,
    /// Number of parent hooks the response passed through.
    pub hooks_invoked: usize,
    /// Markup of the resolved trigger.
    pub markup: String,
}

/// Run one request: rebuild the page from `prior`, dispatch `trigger`, render the result.
///
/// `build` mounts the page into the fresh request.
pub fn process<F>(
    config: EngineConfig,
    prior: Ledger,
    trigger: &TriggerEvent,
    build: F,
) -> Result<Outcome, RenderError>
where
    F: FnOnce(&mut Request),
{
    let mut request = Request::with_ledger(config, prior);
    build(&mut request);
    let Dispatch {
        response,
        hooks_invoked,
        ..
    } = request.dispatch(trigger);
    let markup = request.render_response(&response)?;
    Ok(Outcome {
        ledger: request.into_ledger(),
        response,
        hooks_invoked,
        markup,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Application, Login, Toggle};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_request_renders_nothing() {
        let request = Request::new(EngineConfig::default());
        assert_eq!(request.render().unwrap(), "");
        assert!(request.ledger().is_empty());
    }

    #[test]
    fn typed_lookup() {
        let mut request = Request::new(EngineConfig::default());
        let root = request.mount_root(Toggle::new("a"));
        request.mount_child(root, Hook::Parent, Toggle::new("b").with_value(true));
        assert!(request.get::<Toggle>("b").unwrap().value);
        assert!(request.get::<Login>("b").is_none());
        assert!(request.get::<Toggle>("zz").is_none());
        assert_eq!(request.directory().len(), 2);
    }

    #[test]
    fn update_reaches_mounted_component() {
        let mut request = Request::new(EngineConfig::default());
        request.mount_root(Toggle::new("t1"));
        assert_eq!(request.update("t1", "value", json!("true")), Some(json!(true)));
        assert!(request.get::<Toggle>("t1").unwrap().value);
        assert_eq!(request.ledger().to_value(), json!({"t1": {"value": true}}));
        assert_eq!(request.update("zz", "value", json!(true)), None);
    }

    #[test]
    fn process_is_a_pure_round_trip() {
        let build = |request: &mut Request| {
            request.mount_root(Toggle::new("t1"));
        };
        let trigger = TriggerEvent::new("t1");
        let first = process(EngineConfig::default(), Ledger::new(), &trigger, build).unwrap();
        assert_eq!(first.ledger.to_value(), json!({"t1": {"value": true}}));
        assert!(first.markup.contains(r#"data-state="on""#));

        let second = process(EngineConfig::default(), first.ledger, &trigger, build).unwrap();
        assert_eq!(second.response.value, json!(false));
        assert!(second.markup.contains(r#"data-state="off""#));
    }

    #[test]
    fn process_reports_hooks() {
        let build = |request: &mut Request| {
            request.mount_root(Application::new("app").with_main(|| Login::new("login")));
        };
        let outcome = process(
            EngineConfig::default(),
            Ledger::new(),
            &TriggerEvent::new("login_theme"),
            build,
        )
        .unwrap();
        assert_eq!(outcome.hooks_invoked, 2);
        assert!(outcome.markup.starts_with(r#"<main id="app""#));
        assert!(outcome.markup.contains(r#"data-theme="dark""#));
    }

    #[test]
    fn wire_carries_state_between_requests() {
        let mut request = Request::new(EngineConfig::default());
        request.mount_root(Toggle::new("t1"));
        request.dispatch(&TriggerEvent::new("t1"));
        let wire = request.to_wire().unwrap();

        let mut next = Request::from_wire(EngineConfig::default(), &wire);
        next.mount_root(Toggle::new("t1"));
        assert!(next.get::<Toggle>("t1").unwrap().value);
    }
}
