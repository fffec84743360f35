//! Component directory: the per-request arena, id index and hook wiring.
//!
//! Every component mounted during a request lives in a single `SlotMap`.
//! Parent/child relationships are stored in secondary maps, and a string index
//! maps component ids to arena keys so an inbound trigger is routed in O(1).
//! A child mounted with [`Hook::Parent`] has its response events handed to its
//! literal parent; hooks can only ever point one level up.

use std::any::Any;
use std::collections::{HashMap, VecDeque};

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::component::traits::Component;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[ComponentKey] = &[];

new_key_type! {
    /// Arena key of a mounted component. Copy, lightweight (u64).
    pub struct ComponentKey;
}

/// How a mounted child is wired to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hook {
    /// Response events stop at this node.
    #[default]
    None,
    /// Response events bubble into the parent's `on_response`.
    Parent,
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Identity-to-instance index of one request's component tree.
pub struct Directory {
    nodes: SlotMap<ComponentKey, Box<dyn Component>>,
    children: SecondaryMap<ComponentKey, Vec<ComponentKey>>,
    parent: SecondaryMap<ComponentKey, ComponentKey>,
    hooks: SecondaryMap<ComponentKey, ComponentKey>,
    index: HashMap<String, ComponentKey>,
    root: Option<ComponentKey>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            hooks: SecondaryMap::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Insert a parentless component. The first one becomes the root.
    pub fn insert(&mut self, component: Box<dyn Component>) -> ComponentKey {
        let key = self.nodes.insert(component);
        self.children.insert(key, Vec::new());
        if self.root.is_none() {
            self.root = Some(key);
        }
        self.register(key);
        key
    }

    /// Insert a component as the last child of `parent`.
    ///
    /// Returns `None` when `parent` is not in the directory.
    pub fn insert_child(
        &mut self,
        parent: ComponentKey,
        component: Box<dyn Component>,
        hook: Hook,
    ) -> Option<ComponentKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let key = self.nodes.insert(component);
        self.children.insert(key, Vec::new());
        self.parent.insert(key, parent);
        if hook == Hook::Parent {
            self.hooks.insert(key, parent);
        }
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(key);
        }
        self.register(key);
        Some(key)
    }

    /// Index the component's current id. A later registration of the same id wins.
    fn register(&mut self, key: ComponentKey) {
        let Some(id) = self.nodes.get(key).map(|c| c.id().to_owned()) else {
            return;
        };
        if id.is_empty() {
            return;
        }
        if let Some(previous) = self.index.insert(id.clone(), key) {
            if previous != key && self.nodes.contains_key(previous) {
                tracing::warn!(id = %id, "duplicate component id; routing to the latest mount");
            }
        }
    }

    /// Remove a component and all its descendants.
    ///
    /// Returns the removed component, or `None` if it didn't exist.
    pub fn remove(&mut self, key: ComponentKey) -> Option<Box<dyn Component>> {
        if !self.nodes.contains_key(key) {
            return None;
        }
        if let Some(parent) = self.parent.remove(key) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&child| child != key);
            }
        }
        if self.root == Some(key) {
            self.root = None;
        }

        let mut queue = VecDeque::from([key]);
        let mut removed = None;
        let mut unindexed = Vec::new();
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            self.hooks.remove(current);
            if let Some(component) = self.nodes.remove(current) {
                if self.index.get(component.id()) == Some(&current) {
                    self.index.remove(component.id());
                    unindexed.push(component.id().to_owned());
                }
                if current == key {
                    removed = Some(component);
                }
            }
        }
        // A surviving duplicate takes the id back.
        for id in unindexed {
            let survivor = self
                .nodes
                .iter()
                .filter(|(_, component)| component.id() == id)
                .map(|(key, _)| key)
                .last();
            if let Some(survivor) = survivor {
                self.index.insert(id, survivor);
            }
        }
        removed
    }

    /// Remove every descendant of `key`, keeping `key` itself.
    pub fn clear_children(&mut self, key: ComponentKey) {
        for child in self.children(key).to_vec() {
            self.remove(child);
        }
    }

    // ── Routing ──────────────────────────────────────────────────────

    /// Resolve a component id to its arena key.
    pub fn lookup(&self, id: &str) -> Option<ComponentKey> {
        self.index.get(id).copied()
    }

    /// The node whose `on_response` receives events from `key`, if wired.
    pub fn hook_parent(&self, key: ComponentKey) -> Option<ComponentKey> {
        self.hooks.get(key).copied()
    }

    // ── Tree access ──────────────────────────────────────────────────

    /// Immutable access to a component.
    pub fn get(&self, key: ComponentKey) -> Option<&dyn Component> {
        self.nodes.get(key).map(|c| &**c)
    }

    /// Mutable access to a component.
    pub fn get_mut(&mut self, key: ComponentKey) -> Option<&mut (dyn Component + 'static)> {
        self.nodes.get_mut(key).map(|c| &mut **c)
    }

    /// Downcast a component to its concrete type.
    pub fn downcast_ref<T: Any>(&self, key: ComponentKey) -> Option<&T> {
        self.nodes.get(key)?.as_any().downcast_ref::<T>()
    }

    /// Mutable downcast of a component to its concrete type.
    pub fn downcast_mut<T: Any>(&mut self, key: ComponentKey) -> Option<&mut T> {
        self.nodes.get_mut(key)?.as_any_mut().downcast_mut::<T>()
    }

    /// The parent of a node, if it has one.
    pub fn parent(&self, key: ComponentKey) -> Option<ComponentKey> {
        self.parent.get(key).copied()
    }

    /// Children of a node, in mount order. Empty for unknown keys.
    pub fn children(&self, key: ComponentKey) -> &[ComponentKey] {
        self.children
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors from the immediate parent up to the root.
    pub fn ancestors(&self, key: ComponentKey) -> Vec<ComponentKey> {
        let mut result = Vec::new();
        let mut current = key;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Number of ancestors of `key` (0 for a root).
    pub fn depth(&self, key: ComponentKey) -> usize {
        self.ancestors(key).len()
    }

    /// Depth-first, pre-order walk starting at `start`.
    pub fn walk_depth_first(&self, start: ComponentKey) -> Vec<ComponentKey> {
        let mut result = Vec::new();
        if !self.nodes.contains_key(start) {
            return result;
        }
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// The first parentless component inserted, if still present.
    pub fn root(&self) -> Option<ComponentKey> {
        self.root
    }

    /// Whether the directory holds `key`.
    pub fn contains(&self, key: ComponentKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of mounted components.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("len", &self.len())
            .field("root", &self.root)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
