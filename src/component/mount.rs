//! Mounting: place a freshly built component into the directory.
//!
//! A component is reconciled before it is indexed, and its composed children
//! are mounted recursively after it, so every node in the directory reflects
//! the ledger before anything is rendered or routed.

use serde_json::Value;

use super::context::RenderContext;
use super::reconcile::reconcile;
use super::traits::Component;
use crate::property::{Phase, PropertyAccess};
use crate::state::directory::{ComponentKey, Directory, Hook};

/// Reconcile `component`, insert it under `parent` and mount its children.
///
/// A component without an id gets a generated one. Returns `None` only when
/// `parent` is given but not in the directory.
pub fn mount(
    directory: &mut Directory,
    ctx: &mut RenderContext,
    parent: Option<ComponentKey>,
    hook: Hook,
    mut component: Box<dyn Component>,
) -> Option<ComponentKey> {
    if component.id().is_empty() {
        let id = ctx.generate_id();
        component.set_property("id", &Value::String(id), Phase::Normalize, ctx.ledger_mut());
    }
    reconcile(component.as_mut(), ctx.ledger_mut());
    component.on_mount(ctx);
    tracing::debug!(
        id = %component.id(),
        component = component.component_type(),
        "mounted"
    );

    let children = component.compose();
    let key = match parent {
        Some(parent) => directory.insert_child(parent, component, hook)?,
        None => directory.insert(component),
    };
    for child in children {
        mount(directory, ctx, Some(key), child.hook, child.component);
    }
    Some(key)
}

/// Rebuild the children of a mounted component from its current state.
///
/// Components that compose nothing keep the children they were given.
pub fn recompose(directory: &mut Directory, ctx: &mut RenderContext, key: ComponentKey) {
    let Some(children) = directory.get(key).map(|c| c.compose()) else {
        return;
    };
    if children.is_empty() {
        return;
    }
    directory.clear_children(key);
    for child in children {
        mount(directory, ctx, Some(key), child.hook, child.component);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::widgets::{Login, Toggle};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ctx() -> RenderContext {
        RenderContext::new(EngineConfig::default())
    }

    #[test]
    fn mount_assigns_missing_id() {
        let mut dir = Directory::new();
        let mut ctx = ctx();
        let key = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Toggle::new(""))).unwrap();
        let id = dir.get(key).unwrap().id().to_owned();
        assert!(id.starts_with("ID"));
        assert_eq!(dir.lookup(&id), Some(key));
        assert!(ctx.ledger().is_empty());
    }

    #[test]
    fn mount_reconciles_before_indexing() {
        let mut dir = Directory::new();
        let mut ctx = ctx();
        ctx.ledger_mut()
            .set_request_value("t1", "value", json!(true), &[], Phase::Live);
        let key = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Toggle::new("t1"))).unwrap();
        assert!(dir.downcast_ref::<Toggle>(key).unwrap().value);
    }

    #[test]
    fn composite_children_are_mounted_and_hooked() {
        let mut dir = Directory::new();
        let mut ctx = ctx();
        let login = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Login::new("login"))).unwrap();
        assert_eq!(dir.children(login).len(), 5);
        let username = dir.lookup("login_username").unwrap();
        assert_eq!(dir.parent(username), Some(login));
        assert_eq!(dir.hook_parent(username), Some(login));
    }

    #[test]
    fn mount_under_missing_parent() {
        let mut dir = Directory::new();
        let mut ctx = ctx();
        let key = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Toggle::new("a"))).unwrap();
        dir.remove(key);
        let orphan = mount(&mut dir, &mut ctx, Some(key), Hook::Parent, Box::new(Toggle::new("b")));
        assert!(orphan.is_none());
    }

    #[test]
    fn recompose_reflects_parent_state() {
        let mut dir = Directory::new();
        let mut ctx = ctx();
        let login = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Login::new("login"))).unwrap();
        let before = dir.lookup("login_theme").unwrap();
        if let Some(component) = dir.get_mut(login) {
            component.set_property("theme", &json!("dark"), Phase::Live, ctx.ledger_mut());
        }
        recompose(&mut dir, &mut ctx, login);
        let after = dir.lookup("login_theme").unwrap();
        assert_ne!(before, after);
        assert!(!dir.contains(before));
        assert_eq!(dir.children(login).len(), 5);
        assert_eq!(
            dir.get(after).and_then(|c| c.get_property("label")),
            Some(json!("Light"))
        );
    }

    #[test]
    fn recompose_keeps_manual_children_of_leaves() {
        let mut dir = Directory::new();
        let mut ctx = ctx();
        let root = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Toggle::new("root"))).unwrap();
        mount(&mut dir, &mut ctx, Some(root), Hook::Parent, Box::new(Toggle::new("leaf")));
        recompose(&mut dir, &mut ctx, root);
        assert_eq!(dir.children(root).len(), 1);
    }
}
