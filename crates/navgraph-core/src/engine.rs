#![forbid(unsafe_code)]

//! The navigation engine: current pointer, history stack, node store.
//!
//! # State machine
//!
//! ```text
//!              navigate                    navigate
//!   ROOT ─────────────────► HAS_CURRENT(0) ─────────► HAS_CURRENT(d+1)
//!    ▲                          │    ▲                      │
//!    │ clear_history            │    └──────── go_back ─────┘
//!    └──────────────────────────┘
//! ```
//!
//! `go_back` at depth 0 returns `false` even though a current node exists.
//! Reaching ROOT requires an explicit [`clear_history`](NavigationEngine::clear_history):
//! that is what keeps the tab root mounted underneath the navigation overlay.
//!
//! # Design Invariants
//!
//! 1. The history stack never contains the current node.
//! 2. The current node, when set, is always present in the store.
//! 3. Restoration resolves through the store by id, never through the copy
//!    captured on the stack, so state written after the push is honored.
//! 4. Every operation commits the stack and the current pointer together
//!    before returning; there is no callback from inside an operation.

use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::history::HistoryStack;
use crate::id::{NodeId, NodeIdGenerator};
use crate::node::NavigationNode;
use crate::screen::{Screen, TabKind};
use crate::state::ScreenState;
use crate::store::{NodeStore, RetentionPolicy};

/// Snapshot of engine bookkeeping, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    /// History stack length.
    pub depth: usize,
    /// Entries held by the store.
    pub stored_nodes: usize,
    /// Store entries referenced by the stack or the current pointer.
    pub reachable_nodes: usize,
    /// Ids minted since the engine was created.
    pub ids_issued: u64,
    /// Current [`revision`](NavigationEngine::revision).
    pub revision: u64,
}

/// Screen-stack navigation engine.
#[derive(Debug)]
pub struct NavigationEngine {
    config: EngineConfig,
    ids: NodeIdGenerator,
    store: NodeStore,
    history: HistoryStack,
    current: Option<NodeId>,
    origin_tab: TabKind,
    hide_bottom_nav: bool,
    revision: u64,
}

impl Default for NavigationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl NavigationEngine {
    /// Engine at ROOT with an empty store.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ids: NodeIdGenerator::new(),
            store: NodeStore::new(),
            history: HistoryStack::new(),
            current: None,
            origin_tab: config.initial_tab,
            hide_bottom_nav: false,
            revision: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open `screen` on top of the current node.
    ///
    /// The previous current node, as held in the store, is pushed onto the
    /// history stack. Returns the id of the new node.
    pub fn navigate(&mut self, screen: Screen, initial_state: Option<ScreenState>) -> NodeId {
        let (id, timestamp) = self.ids.next_id();
        let node = NavigationNode::new(id, screen, initial_state, self.origin_tab, timestamp);

        if let Some(prev) = self.current.and_then(|cur| self.store.get(&cur)) {
            self.history.push(prev.clone());
        }
        debug!(
            node = %id,
            screen = %node.screen(),
            tab = %self.origin_tab,
            depth = self.history.len(),
            "navigate"
        );
        self.store.insert(node);
        self.current = Some(id);
        self.bump();
        id
    }

    /// Return to the previous node.
    ///
    /// Returns `false` and changes nothing if the history stack is empty;
    /// the caller then falls back to tab-root behavior.
    pub fn go_back(&mut self) -> bool {
        let Some(popped) = self.history.pop() else {
            trace!(current = ?self.current, "go_back with empty history");
            return false;
        };
        let target = popped.id();
        if !self.store.contains(&target) {
            // Only reachable when the store was pruned externally.
            self.store.insert(popped);
        }
        let left = self.current.replace(target);
        if self.config.retention == RetentionPolicy::DropAbandoned
            && let Some(left) = left
        {
            self.store.remove(&left);
        }
        debug!(
            node = %target,
            left = ?left,
            depth = self.history.len(),
            "go_back"
        );
        self.bump();
        true
    }

    /// Shallow-merge `patch` into the current node's state.
    ///
    /// Silent no-op at ROOT: a screen mid-teardown may still report state.
    pub fn update_state(&mut self, patch: ScreenState) {
        let Some(id) = self.current else {
            trace!("update_state at root ignored");
            return;
        };
        let Some(node) = self.store.get_mut(&id) else {
            return;
        };
        trace!(node = %id, ?patch, "update_state");
        node.merge_state(patch);
        self.bump();
    }

    /// Cached state of any stored node.
    #[must_use]
    pub fn node_state(&self, id: &NodeId) -> Option<&ScreenState> {
        self.store.state(id)
    }

    /// Latest snapshot of any stored node.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&NavigationNode> {
        self.store.get(id)
    }

    /// Discard store and stack and return to ROOT.
    ///
    /// Also clears `hide_bottom_nav`. The origin tab is kept.
    pub fn clear_history(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        self.history.clear();
        self.current = None;
        self.hide_bottom_nav = false;
        info!(dropped, tab = %self.origin_tab, "clear_history");
        self.bump();
    }

    /// Remove store entries referenced by neither the stack nor the current
    /// pointer. Returns how many were removed.
    pub fn prune_unreachable(&mut self) -> usize {
        let current = self.current;
        let history = &self.history;
        let removed = self
            .store
            .retain(|id| Some(*id) == current || history.contains(id));
        if removed > 0 {
            debug!(removed, remaining = self.store.len(), "pruned unreachable nodes");
        }
        removed
    }

    #[must_use]
    pub fn current_node(&self) -> Option<&NavigationNode> {
        self.current.and_then(|id| self.store.get(&id))
    }

    #[must_use]
    pub const fn current_id(&self) -> Option<NodeId> {
        self.current
    }

    /// `true` at ROOT (no current node).
    #[must_use]
    pub const fn is_at_root(&self) -> bool {
        self.current.is_none()
    }

    /// Previously active nodes, most recent last, as captured when pushed.
    #[must_use]
    pub fn history(&self) -> &[NavigationNode] {
        self.history.as_slice()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    #[must_use]
    pub const fn origin_tab(&self) -> TabKind {
        self.origin_tab
    }

    /// Tab recorded as the origin of subsequently created nodes.
    pub fn set_origin_tab(&mut self, tab: TabKind) {
        if self.origin_tab != tab {
            self.origin_tab = tab;
            self.bump();
        }
    }

    #[must_use]
    pub const fn hide_bottom_nav(&self) -> bool {
        self.hide_bottom_nav
    }

    pub fn set_hide_bottom_nav(&mut self, hide: bool) {
        if self.hide_bottom_nav != hide {
            self.hide_bottom_nav = hide;
            self.bump();
        }
    }

    /// Counter bumped by every observable mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        let reachable_nodes = self
            .store
            .ids()
            .iter()
            .filter(|id| Some(**id) == self.current || self.history.contains(id))
            .count();
        EngineStats {
            depth: self.history.len(),
            stored_nodes: self.store.len(),
            reachable_nodes,
            ids_issued: self.ids.issued(),
            revision: self.revision,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
