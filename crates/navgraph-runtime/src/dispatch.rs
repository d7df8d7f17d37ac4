//! Boundary to the presentation layer.
//!
//! The dispatcher decides which screen component to construct for the
//! current node. It is owned by the UI; the runtime only hands it a
//! read-only view after the engine changed.

use navgraph_core::{NavigationNode, TabKind};

/// What the presentation layer needs for one render.
#[derive(Debug, Clone, Copy)]
pub struct DispatchView<'a> {
    /// Current node, or `None` for the tab root.
    pub node: Option<&'a NavigationNode>,
    /// Active top-level tab.
    pub tab: TabKind,
    pub hide_bottom_nav: bool,
    pub can_go_back: bool,
}

/// Selects and constructs the screen to render.
pub trait ScreenDispatcher {
    type Output;

    fn dispatch(&mut self, view: DispatchView<'_>) -> Self::Output;
}
