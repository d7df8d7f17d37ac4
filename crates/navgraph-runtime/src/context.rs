#![forbid(unsafe_code)]

//! The navigation context provider.
//!
//! One [`NavigationContext`] is built at the application root and passed by
//! reference to the presentation layer. It owns the engine, the native
//! history bridge, and the platform adapters; all mutation goes through its
//! methods, so it can be driven in tests without any rendering.
//!
//! # Example
//!
//! ```ignore
//! let mut nav = NavigationContext::new(ContextConfig::default(), history, toasts, clock);
//! nav.mount()?;
//! nav.navigate(Screen::profile("alice"), None);
//! nav.update_state(ScreenState::new().with_scroll(120));
//! match nav.handle_back_signal()? {
//!     BackOutcome::Exit => shutdown(),
//!     _ => {}
//! }
//! nav.render(&mut dispatcher);
//! ```

use navgraph_core::{NavigationEngine, NodeId, Screen, ScreenState, TabKind};
use tracing::{debug, info};

use crate::bridge::{BackOutcome, HistoryHost, NativeHistoryBridge, Notifier};
use crate::clock::Clock;
use crate::config::ContextConfig;
use crate::dispatch::{DispatchView, ScreenDispatcher};
use crate::error::BridgeError;

/// Application-root owner of all navigation state.
#[derive(Debug)]
pub struct NavigationContext<H, N, C> {
    engine: NavigationEngine,
    bridge: NativeHistoryBridge,
    host: H,
    notifier: N,
    clock: C,
    auto_hide_bottom_nav: bool,
    rendered_revision: Option<u64>,
}

impl<H: HistoryHost, N: Notifier, C: Clock> NavigationContext<H, N, C> {
    #[must_use]
    pub fn new(config: ContextConfig, host: H, notifier: N, clock: C) -> Self {
        Self {
            engine: NavigationEngine::new(config.engine),
            bridge: NativeHistoryBridge::new(config.bridge),
            host,
            notifier,
            clock,
            auto_hide_bottom_nav: config.auto_hide_bottom_nav,
            rendered_revision: None,
        }
    }

    /// Attach to the platform history. Call once when the shell mounts.
    pub fn mount(&mut self) -> Result<(), BridgeError<H::Error>> {
        self.bridge.mount(&self.engine, &mut self.host)
    }

    pub fn navigate(&mut self, screen: Screen, initial_state: Option<ScreenState>) -> NodeId {
        let id = self.engine.navigate(screen, initial_state);
        self.sync_chrome();
        id
    }

    /// In-app back, resolved the same way as a native back signal.
    ///
    /// Pops to the previous node when there is one; on the deepest screen
    /// with no history it returns to the tab root. `false` only when
    /// already at the tab root, where the caller decides what back means.
    pub fn go_back(&mut self) -> bool {
        let Some(tab) = self.engine.current_node().map(|n| n.origin_tab()) else {
            return false;
        };
        self.bridge.disarm();
        if self.engine.go_back() {
            self.sync_chrome();
        } else {
            debug!(%tab, "in-app back with no history");
            self.close_stack(tab);
        }
        true
    }

    pub fn update_state(&mut self, patch: ScreenState) {
        self.engine.update_state(patch);
    }

    #[must_use]
    pub fn node_state(&self, id: &NodeId) -> Option<&ScreenState> {
        self.engine.node_state(id)
    }

    pub fn clear_history(&mut self) {
        self.engine.clear_history();
    }

    /// Retag the tab new nodes are stamped with; history is kept.
    pub fn set_origin_tab(&mut self, tab: TabKind) {
        self.engine.set_origin_tab(tab);
    }

    /// Enter a fresh navigation context for `tab`.
    pub fn switch_tab(&mut self, tab: TabKind) {
        info!(from = %self.engine.origin_tab(), to = %tab, "switch tab");
        self.close_stack(tab);
    }

    pub fn set_hide_bottom_nav(&mut self, hide: bool) {
        self.engine.set_hide_bottom_nav(hide);
    }

    /// Run the native back bridge at the current clock time.
    ///
    /// [`BackOutcome::CloseStack`] is applied here by returning to the tab
    /// root; the outcome is still reported so the shell can react.
    pub fn handle_back_signal(&mut self) -> Result<BackOutcome, BridgeError<H::Error>> {
        let now = self.clock.now_mono();
        let outcome =
            self.bridge
                .on_back_signal(&mut self.engine, &mut self.host, &mut self.notifier, now)?;
        match outcome {
            BackOutcome::CloseStack { tab } => self.close_stack(tab),
            BackOutcome::Popped { .. } => self.sync_chrome(),
            BackOutcome::ExitSuppressed { .. } | BackOutcome::Exit => {}
        }
        Ok(outcome)
    }

    /// Expire the exit window if due; `true` if it expired now.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now_mono();
        self.bridge.poll(now)
    }

    /// `true` if the engine changed since the last [`render`](Self::render).
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.rendered_revision != Some(self.engine.revision())
    }

    /// Dispatch the current view if anything changed since the last render.
    pub fn render<D: ScreenDispatcher>(&mut self, dispatcher: &mut D) -> Option<D::Output> {
        if !self.needs_render() {
            return None;
        }
        self.rendered_revision = Some(self.engine.revision());
        Some(dispatcher.dispatch(self.view()))
    }

    /// Current view regardless of render bookkeeping.
    #[must_use]
    pub fn view(&self) -> DispatchView<'_> {
        DispatchView {
            node: self.engine.current_node(),
            tab: self.engine.origin_tab(),
            hide_bottom_nav: self.engine.hide_bottom_nav(),
            can_go_back: self.engine.can_go_back(),
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &NavigationEngine {
        &self.engine
    }

    #[must_use]
    pub const fn bridge(&self) -> &NativeHistoryBridge {
        &self.bridge
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn close_stack(&mut self, tab: TabKind) {
        self.engine.set_origin_tab(tab);
        self.engine.clear_history();
    }

    fn sync_chrome(&mut self) {
        if !self.auto_hide_bottom_nav {
            return;
        }
        let hide = self
            .engine
            .current_node()
            .is_some_and(|n| n.kind().is_full_screen());
        self.engine.set_hide_bottom_nav(hide);
    }
}
