//! Property registry: closed name sets, total validators, dispatch with delegation.

pub mod access;
pub mod named;
pub mod validate;

pub use access::{Phase, Properties, PropertyAccess};
pub use named::Named;
