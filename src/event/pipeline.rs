//! Event pipeline: route a trigger, let the target mutate itself, bubble the response.
//!
//! ```text
//! Unrouted -> Routed -> Mutated -> Bubbling(1..N) -> Resolved
//!     \________________________________________________^
//!                     (unknown id: routing failure)
//! ```
//!
//! Bubbling follows [`Directory::hook_parent`], which only ever points at a
//! node's literal parent, so the chain visits each ancestor at most once and
//! always ends.

use serde_json::Value;

use super::response::{ResponseEvent, Trigger, EVENT_ROUTING_FAILURE};
use super::trigger::TriggerEvent;
use crate::component::base::Swap;
use crate::component::context::RenderContext;
use crate::component::mount::recompose;
use crate::component::reconcile::reconcile;
use crate::property::{Phase, PropertyAccess};
use crate::state::directory::{ComponentKey, Directory};
use crate::widgets::toast::{Toast, ToastType};

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Pipeline stages, recorded in order for every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unrouted,
    Routed,
    Mutated,
    /// A parent hook ran; the count of hooks invoked so far.
    Bubbling(usize),
    Resolved,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Result of one trip through the pipeline.
#[derive(Debug)]
pub struct Dispatch {
    /// The fully bubbled response.
    pub response: ResponseEvent,
    /// Number of parent hooks invoked.
    pub hooks_invoked: usize,
    /// The routed node followed by every hooked ancestor that ran.
    pub path: Vec<ComponentKey>,
    /// Stages passed through.
    pub trace: Vec<Stage>,
}

/// Run a trigger through the pipeline.
pub fn dispatch(
    directory: &mut Directory,
    ctx: &mut RenderContext,
    trigger: &TriggerEvent,
) -> Dispatch {
    let span = tracing::debug_span!("dispatch", id = %trigger.id, name = %trigger.name);
    let _enter = span.enter();
    ctx.set_trigger(trigger.clone());

    let mut trace = vec![Stage::Unrouted];
    let Some(key) = directory.lookup(&trigger.id) else {
        tracing::warn!(id = %trigger.id, "trigger does not match a mounted component");
        let mut response = routing_failure(ctx, trigger);
        resolve(directory, ctx, &mut response);
        trace.push(Stage::Resolved);
        return Dispatch {
            response,
            hooks_invoked: 0,
            path: Vec::new(),
            trace,
        };
    };
    trace.push(Stage::Routed);

    let Some(target) = directory.get_mut(key) else {
        let mut response = routing_failure(ctx, trigger);
        resolve(directory, ctx, &mut response);
        trace.push(Stage::Resolved);
        return Dispatch {
            response,
            hooks_invoked: 0,
            path: Vec::new(),
            trace,
        };
    };
    let mut response = target.on_request(key, trigger, ctx);
    trace.push(Stage::Mutated);
    tracing::debug!(event = %response.name, "target handled trigger");

    let mut path = vec![key];
    let mut current = key;
    while let Some(parent) = directory.hook_parent(current) {
        let Some(node) = directory.get_mut(parent) else {
            break;
        };
        response = node.on_response(parent, response, ctx);
        path.push(parent);
        trace.push(Stage::Bubbling(path.len() - 1));
        tracing::debug!(hook = %node.id(), event = %response.name, "parent hook ran");
        current = parent;
    }

    resolve(directory, ctx, &mut response);
    trace.push(Stage::Resolved);
    Dispatch {
        response,
        hooks_invoked: path.len() - 1,
        path,
        trace,
    }
}

/// The response to a trigger whose id is not in the directory.
fn routing_failure(ctx: &RenderContext, trigger: &TriggerEvent) -> ResponseEvent {
    let toast = Toast::new("")
        .with_type(ToastType::Error)
        .with_message(format!("Invalid parameter: {}", trigger.id));
    ResponseEvent {
        trigger_name: trigger.name.clone(),
        name: EVENT_ROUTING_FAILURE.to_owned(),
        value: Value::String(trigger.id.clone()),
        ..ResponseEvent::default()
    }
    .with_detached(toast)
    .retarget(ctx.config().toast_target.clone(), Swap::InnerHtml)
}

/// Bring the response's trigger up to date before it is rendered.
///
/// A mounted trigger gets its children rebuilt from its mutated state. A
/// detached trigger is reconciled like any freshly mounted component.
fn resolve(directory: &mut Directory, ctx: &mut RenderContext, response: &mut ResponseEvent) {
    match &mut response.trigger {
        Trigger::Node(key) => {
            if directory.contains(*key) {
                recompose(directory, ctx, *key);
            }
        }
        Trigger::Detached(component) => {
            if component.id().is_empty() {
                let id = Value::String(ctx.generate_id());
                component.set_property("id", &id, Phase::Normalize, ctx.ledger_mut());
            }
            reconcile(component.as_mut(), ctx.ledger_mut());
        }
        Trigger::None => {}
    }
}

// ===========================================================================
// Tests
// ===========================================================================
