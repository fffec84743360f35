//! Component model: base properties, the component trait, reconciliation and mounting.

pub mod base;
pub mod context;
pub mod mount;
pub mod reconcile;
pub mod traits;

pub use base::{generate_id, BaseComponent, Indicator, Swap};
pub use context::RenderContext;
pub use mount::{mount, recompose};
pub use reconcile::reconcile;
pub use traits::{Child, Component};
