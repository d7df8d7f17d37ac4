#![forbid(unsafe_code)]

//! Authoritative per-node snapshots.
//!
//! The [`NodeStore`] is the single source of truth for restoration: the
//! history stack may hold copies captured at push time, but `go_back`
//! always resolves the returned-to node here by id.
//!
//! # Design Invariants
//!
//! 1. **Latest wins**: `insert` replaces the previous snapshot for an id.
//! 2. **No silent eviction**: under [`RetentionPolicy::Unbounded`] an entry
//!    lives until [`clear`](NodeStore::clear).
//! 3. **Reachability**: under [`RetentionPolicy::DropAbandoned`] the engine
//!    removes exactly the node it abandons on `go_back`; nothing referenced
//!    by the stack or the current pointer is ever removed.

use std::collections::HashMap;

use crate::id::NodeId;
use crate::node::NavigationNode;
use crate::state::ScreenState;

/// How long store entries outlive their reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    /// Keep every node until `clear_history()`.
    #[default]
    Unbounded,
    /// Evict a node as soon as `go_back()` leaves it; it can never be
    /// returned to because ids are not reused.
    DropAbandoned,
}

/// Map from node id to its latest snapshot.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: HashMap<NodeId, NavigationNode>,
}

impl NodeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `node`, replacing any previous snapshot under the same id.
    pub fn insert(&mut self, node: NavigationNode) {
        self.nodes.insert(node.id(), node);
    }

    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&NavigationNode> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &NodeId) -> Option<&mut NavigationNode> {
        self.nodes.get_mut(id)
    }

    /// Cached UI state of `id`, if the node exists and has any.
    #[must_use]
    pub fn state(&self, id: &NodeId) -> Option<&ScreenState> {
        self.nodes.get(id).and_then(NavigationNode::state)
    }

    pub fn remove(&mut self, id: &NodeId) -> Option<NavigationNode> {
        self.nodes.remove(id)
    }

    /// Drop every entry for which `keep` returns `false`; returns how many.
    pub fn retain(&mut self, mut keep: impl FnMut(&NodeId) -> bool) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|id, _| keep(id));
        before - self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stored ids in creation order.
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
