//! # gilt-ssr
//!
//! A stateless, server-side UI component engine.
//!
//! Every request rebuilds the component tree from scratch. Widgets still appear
//! to keep their state across round trips because every property changed
//! outside reconciliation is written to a small JSON ledger that the client
//! carries to the next request, where it is replayed into the fresh tree.
//! A trigger is routed to exactly one component through the per-request
//! directory, and its response bubbles through parent hooks before it is
//! rendered.
//!
//! ## Core Systems
//!
//! - **[`property`]**: Closed property names, total validators, string-keyed access with delegation
//! - **[`state`]**: Request state ledger, optional seal, slotmap-backed component directory
//! - **[`component`]**: Base component, component trait, reconciliation and mounting
//! - **[`event`]**: Trigger decoding, response events, the routing/bubbling pipeline
//! - **[`render`]**: Renderer collaborator and a minimal HTML element builder
//! - **[`widgets`]**: Built-in widgets: Toggle, Button, Input, NumberInput, Select, Toast, Login, Application
//! - **[`engine`]**: One request's scope and the `process` round trip
//! - **[`testing`]**: Headless pilot for multi-request tests

// Foundation
pub mod config;
pub mod property;
pub mod state;

// Component model
pub mod component;
pub mod widgets;

// Events and rendering
pub mod event;
pub mod render;

// Request scope
pub mod engine;
pub mod testing;

pub use component::{BaseComponent, Child, Component, RenderContext};
pub use config::EngineConfig;
pub use engine::{process, Outcome, Request};
pub use event::{Dispatch, ResponseEvent, TriggerEvent};
pub use property::{Phase, PropertyAccess};
pub use state::{ComponentKey, Hook, Ledger};
