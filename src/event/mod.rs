//! Event system: inbound triggers, response events and the bubbling pipeline.

pub mod pipeline;
pub mod response;
pub mod trigger;

pub use pipeline::{dispatch, Dispatch, Stage};
pub use response::{PatchDirectives, ResponseEvent, Trigger, EVENT_ROUTING_FAILURE};
pub use trigger::TriggerEvent;
