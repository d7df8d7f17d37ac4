//! The navigation node record.

use crate::id::NodeId;
use crate::screen::{Screen, ScreenKind, TabKind};
use crate::state::ScreenState;

/// One navigational position: screen, read-only params, cached UI state.
///
/// Fields are private so that [`Screen`] params stay fixed after creation;
/// only the engine writes `state`, and only for the current node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationNode {
    id: NodeId,
    screen: Screen,
    state: Option<ScreenState>,
    origin_tab: TabKind,
    timestamp: u64,
}

impl NavigationNode {
    pub(crate) fn new(
        id: NodeId,
        screen: Screen,
        state: Option<ScreenState>,
        origin_tab: TabKind,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            screen,
            state,
            origin_tab,
            timestamp,
        }
    }

    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Screen and the params it was opened with.
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    /// Cached UI state, `None` until the screen first reports any.
    #[must_use]
    pub const fn state(&self) -> Option<&ScreenState> {
        self.state.as_ref()
    }

    /// Tab that was active when this node was created.
    #[must_use]
    pub const fn origin_tab(&self) -> TabKind {
        self.origin_tab
    }

    /// Creation time, milliseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub(crate) fn merge_state(&mut self, patch: ScreenState) {
        self.state.get_or_insert_with(ScreenState::default).merge(patch);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::id::NodeIdGenerator;

    #[test]
    fn node_snapshot_serializes_params_and_state() {
        let (id, ts) = NodeIdGenerator::new().next_id();
        let node = NavigationNode::new(
            id,
            Screen::profile("alice"),
            Some(ScreenState::new().with_scroll(120)),
            TabKind::Explore,
            ts,
        );
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("120"));

        let back: NavigationNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
