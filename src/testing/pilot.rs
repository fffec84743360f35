//! Pilot: drive a page through stateless round trips the way a browser would.
//!
//! Every interaction builds a fresh [`Request`] from the ledger wire text the
//! previous response produced, mounts the page, dispatches the trigger and
//! keeps the new wire text. Nothing else survives between calls, so a test
//! written against the pilot exercises exactly what a server would.

use crate::config::EngineConfig;
use crate::engine::Request;
use crate::event::pipeline::Dispatch;
use crate::event::response::ResponseEvent;
use crate::event::trigger::TriggerEvent;
use crate::render::RenderError;
use crate::state::ledger::{Ledger, LedgerError};

/// Errors surfaced by the pilot.
#[derive(Debug, thiserror::Error)]
pub enum PilotError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// What one simulated interaction produced.
#[derive(Debug)]
pub struct Step {
    /// The resolved response.
    pub response: ResponseEvent,
    /// Parent hooks invoked while bubbling.
    pub hooks_invoked: usize,
    /// Markup of the resolved trigger.
    pub markup: String,
    /// Patch directives as transport headers.
    pub headers: Vec<(&'static str, String)>,
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless client for testing.
///
/// # Examples
///
/// ```ignore
/// use gilt_ssr::testing::Pilot;
/// use gilt_ssr::widgets::Toggle;
///
/// let mut pilot = Pilot::new(|request| {
///     request.mount_root(Toggle::new("t1"));
/// });
/// pilot.click("t1").unwrap();
/// assert!(pilot.request().get::<Toggle>("t1").unwrap().value);
/// ```
pub struct Pilot {
    config: EngineConfig,
    build: Box<dyn Fn(&mut Request)>,
    wire: String,
}

impl Pilot {
    /// Create a pilot with the default configuration and no carried state.
    pub fn new(build: impl Fn(&mut Request) + 'static) -> Self {
        Self::with_config(EngineConfig::default(), build)
    }

    /// Create a pilot with the given configuration.
    pub fn with_config(config: EngineConfig, build: impl Fn(&mut Request) + 'static) -> Self {
        Self {
            config,
            build: Box::new(build),
            wire: String::new(),
        }
    }

    /// Replace the carried wire text, e.g. with a tampered copy.
    pub fn set_wire(&mut self, wire: impl Into<String>) {
        self.wire = wire.into();
    }

    /// The wire text the client currently holds.
    pub fn wire(&self) -> &str {
        &self.wire
    }

    /// The carried ledger, decoded the way the next request will see it.
    pub fn ledger(&self) -> Ledger {
        self.request().into_ledger()
    }

    /// A freshly built request from the carried state.
    pub fn request(&self) -> Request {
        let mut request = Request::from_wire(self.config.clone(), &self.wire);
        (self.build)(&mut request);
        request
    }

    /// Render the full page from the carried state.
    pub fn render(&self) -> Result<String, PilotError> {
        Ok(self.request().render()?)
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Send a trigger and carry the resulting ledger forward.
    pub fn send(&mut self, trigger: &TriggerEvent) -> Result<Step, PilotError> {
        let mut request = self.request();
        let Dispatch {
            response,
            hooks_invoked,
            ..
        } = request.dispatch(trigger);
        let markup = request.render_response(&response)?;
        self.wire = request.to_wire()?;
        Ok(Step {
            headers: response.directives.headers(),
            response,
            hooks_invoked,
            markup,
        })
    }

    /// Click the component `id`.
    pub fn click(&mut self, id: &str) -> Result<Step, PilotError> {
        self.send(&TriggerEvent::new(id))
    }

    /// Post `value` into the field `name` of the component `id`.
    pub fn fill(&mut self, id: &str, name: &str, value: &str) -> Result<Step, PilotError> {
        self.send(&TriggerEvent::new(id).with_name(name).with_value(name, value))
    }
}

impl std::fmt::Debug for Pilot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pilot")
            .field("config", &self.config)
            .field("wire", &self.wire)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
