#![forbid(unsafe_code)]

//! Step-based browser shell runner.
//!
//! [`StepShell`] drives a [`NavigationContext`] and a [`ScreenDispatcher`]
//! through event / poll / render cycles without threads or blocking.
//! The host (JavaScript) controls the loop:
//!
//! 1. Push events via [`StepShell::push_event`].
//! 2. Advance time via [`StepShell::advance_time`].
//! 3. Call [`StepShell::step`] to process queued events and render.
//! 4. Read rendered frames, toasts and pushed entries via
//!    [`StepShell::take_outputs`].
//!
//! # Example
//!
//! ```ignore
//! let mut shell = StepShell::new(ContextConfig::default(), MyDispatcher);
//! shell.init()?;
//!
//! shell.push_event(ShellEvent::Navigate(Screen::profile("alice"), None));
//! shell.push_event(ShellEvent::PopState);
//! shell.advance_time(Duration::from_millis(16));
//! let result = shell.step()?;
//! if result.rendered {
//!     let outputs = shell.take_outputs();
//!     // Mount outputs.frames.last() ...
//! }
//! ```

use core::time::Duration;
use std::collections::VecDeque;

use navgraph_core::{Screen, ScreenState, TabKind};
use navgraph_runtime::{
    BackOutcome, BridgeError, Clock, ContextConfig, NavigationContext, ScreenDispatcher,
    SyntheticEntry, Toast,
};
use tracing::{debug, info};

use crate::{DeterministicClock, WebHistory, WebHistoryError, WebToasts};

/// Context type the shell runs.
pub type WebContext = NavigationContext<WebHistory, WebToasts, DeterministicClock>;

/// Error type surfaced by [`StepShell`].
pub type ShellError = BridgeError<WebHistoryError>;

/// Input the host forwards to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// Browser `popstate` (hardware or gesture back).
    PopState,
    /// In-app back button.
    Back,
    Navigate(Screen, Option<ScreenState>),
    UpdateState(ScreenState),
    SwitchTab(TabKind),
    SetHideBottomNav(bool),
    ClearHistory,
}

/// Result of a single [`StepShell::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// `false` once the browser back was released.
    pub running: bool,
    pub rendered: bool,
    pub events_processed: u32,
    /// Rendered frame count (monotonically increasing).
    pub frame_idx: u64,
    /// A pending exit confirmation expired during this step.
    pub exit_window_expired: bool,
}

/// Captured outputs for host consumption.
#[derive(Debug, Clone)]
pub struct WebOutputs<F> {
    /// Dispatcher output, one per rendered frame.
    pub frames: Vec<F>,
    pub toasts: Vec<Toast>,
    /// Outcome of each processed `popstate`.
    pub outcomes: Vec<BackOutcome>,
    /// Synthetic entries the host must `pushState`.
    pub pushes: Vec<SyntheticEntry>,
}

impl<F> Default for WebOutputs<F> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            toasts: Vec::new(),
            outcomes: Vec::new(),
            pushes: Vec::new(),
        }
    }
}

/// Host-driven, non-blocking shell runner.
pub struct StepShell<D: ScreenDispatcher> {
    context: WebContext,
    dispatcher: D,
    queue: VecDeque<ShellEvent>,
    outputs: WebOutputs<D::Output>,
    running: bool,
    initialized: bool,
    frame_idx: u64,
}

impl<D: ScreenDispatcher> StepShell<D> {
    #[must_use]
    pub fn new(config: ContextConfig, dispatcher: D) -> Self {
        Self {
            context: NavigationContext::new(
                config,
                WebHistory::new(),
                WebToasts::new(),
                DeterministicClock::new(),
            ),
            dispatcher,
            queue: VecDeque::new(),
            outputs: WebOutputs::default(),
            running: true,
            initialized: false,
            frame_idx: 0,
        }
    }

    /// Mount the history bridge and render the first frame.
    ///
    /// A second call fails with [`BridgeError::AlreadyMounted`].
    pub fn init(&mut self) -> Result<(), ShellError> {
        self.context.mount()?;
        self.initialized = true;
        self.render();
        self.collect();
        info!("web shell initialized");
        Ok(())
    }

    /// Process every queued event, expire the exit window, and render if
    /// the engine changed.
    pub fn step(&mut self) -> Result<StepResult, ShellError> {
        if !self.initialized {
            return Err(BridgeError::NotMounted);
        }
        if !self.running {
            return Ok(self.result(false, 0, false));
        }

        let mut events_processed: u32 = 0;
        let mut outcome = Ok(());
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            outcome = self.handle_event(event);
            if outcome.is_err() || !self.running {
                break;
            }
        }

        let expired = self.running && self.context.poll();
        let rendered = self.running && self.render();
        self.collect();
        outcome?;
        Ok(self.result(rendered, events_processed, expired))
    }

    /// Events are processed on the next [`step`](Self::step) call.
    pub fn push_event(&mut self, event: ShellEvent) {
        self.queue.push_back(event);
    }

    pub fn advance_time(&mut self, dt: Duration) {
        self.context.clock_mut().advance(dt);
    }

    pub fn set_time(&mut self, now: Duration) {
        self.context.clock_mut().set(now);
    }

    /// Take the captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs<D::Output> {
        std::mem::take(&mut self.outputs)
    }

    #[must_use]
    pub fn outputs(&self) -> &WebOutputs<D::Output> {
        &self.outputs
    }

    #[must_use]
    pub fn context(&self) -> &WebContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut WebContext {
        &mut self.context
    }

    #[must_use]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.context.clock().now_mono()
    }

    // --- Private helpers ---

    fn handle_event(&mut self, event: ShellEvent) -> Result<(), ShellError> {
        match event {
            ShellEvent::PopState => {
                self.context.host_mut().on_popstate();
                let outcome = self.context.handle_back_signal()?;
                debug!(?outcome, "popstate handled");
                if outcome == BackOutcome::Exit {
                    self.running = false;
                }
                self.outputs.outcomes.push(outcome);
            }
            ShellEvent::Back => {
                self.context.go_back();
            }
            ShellEvent::Navigate(screen, state) => {
                self.context.navigate(screen, state);
            }
            ShellEvent::UpdateState(patch) => self.context.update_state(patch),
            ShellEvent::SwitchTab(tab) => self.context.switch_tab(tab),
            ShellEvent::SetHideBottomNav(hide) => self.context.set_hide_bottom_nav(hide),
            ShellEvent::ClearHistory => self.context.clear_history(),
        }
        Ok(())
    }

    fn render(&mut self) -> bool {
        match self.context.render(&mut self.dispatcher) {
            Some(frame) => {
                self.frame_idx += 1;
                self.outputs.frames.push(frame);
                true
            }
            None => false,
        }
    }

    fn collect(&mut self) {
        let pushes = self.context.host_mut().take_pushed();
        self.outputs.pushes.extend(pushes);
        let toasts = self.context.notifier_mut().take();
        self.outputs.toasts.extend(toasts);
    }

    fn result(&self, rendered: bool, events_processed: u32, expired: bool) -> StepResult {
        StepResult {
            running: self.running,
            rendered,
            events_processed,
            frame_idx: self.frame_idx,
            exit_window_expired: expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navgraph_runtime::{BridgeConfig, DispatchView};
    use pretty_assertions::assert_eq;

    /// Renders each view as a one-line label.
    struct Label;

    impl ScreenDispatcher for Label {
        type Output = String;

        fn dispatch(&mut self, view: DispatchView<'_>) -> String {
            let screen = view
                .node
                .map_or_else(|| format!("root:{}", view.tab), |n| n.screen().to_string());
            if view.hide_bottom_nav {
                format!("{screen} [full]")
            } else {
                screen
            }
        }
    }

    fn shell() -> StepShell<Label> {
        let config = ContextConfig::default()
            .with_bridge(BridgeConfig::default().with_exit_window(Duration::from_millis(1000)));
        let mut shell = StepShell::new(config, Label);
        shell.init().unwrap();
        shell
    }

    // ---- Construction and lifecycle ----

    #[test]
    fn init_mounts_and_renders_root() {
        let shell = shell();
        assert!(shell.is_initialized());
        assert_eq!(shell.frame_idx(), 1);
        assert_eq!(shell.outputs().frames, vec!["root:home".to_string()]);
        assert_eq!(shell.outputs().pushes.len(), 1);
        assert_eq!(shell.context().host().depth(), 1);
    }

    #[test]
    fn double_init_is_an_error() {
        let mut shell = shell();
        assert_eq!(shell.init(), Err(BridgeError::AlreadyMounted));
    }

    #[test]
    fn step_before_init_is_an_error() {
        let mut shell = StepShell::new(ContextConfig::default(), Label);
        assert_eq!(shell.step(), Err(BridgeError::NotMounted));
    }

    // ---- Events and rendering ----

    #[test]
    fn step_renders_only_after_changes() {
        let mut shell = shell();
        shell.take_outputs();

        let idle = shell.step().unwrap();
        assert!(!idle.rendered);
        assert_eq!(idle.events_processed, 0);

        shell.push_event(ShellEvent::Navigate(Screen::profile("alice"), None));
        shell.push_event(ShellEvent::Navigate(Screen::post("p1"), None));
        let busy = shell.step().unwrap();
        assert!(busy.rendered);
        assert_eq!(busy.events_processed, 2);
        assert_eq!(busy.frame_idx, 2);
        assert_eq!(shell.take_outputs().frames, vec!["post-detail(p1)".to_string()]);
    }

    #[test]
    fn popstate_keeps_browser_depth_constant() {
        let mut shell = shell();
        shell.push_event(ShellEvent::Navigate(Screen::profile("alice"), None));
        shell.push_event(ShellEvent::Navigate(Screen::post("p1"), None));
        shell.step().unwrap();
        shell.take_outputs();

        shell.push_event(ShellEvent::PopState);
        shell.step().unwrap();
        let outputs = shell.take_outputs();
        assert_eq!(outputs.frames, vec!["profile(alice)".to_string()]);
        assert_eq!(outputs.pushes.len(), 1);
        assert_eq!(shell.context().host().depth(), 1);
    }

    #[test]
    fn in_app_back_closes_deepest_screen_like_popstate() {
        let mut shell = shell();
        shell.push_event(ShellEvent::Navigate(Screen::Settings, None));
        shell.step().unwrap();
        shell.take_outputs();

        shell.push_event(ShellEvent::Back);
        let result = shell.step().unwrap();
        assert!(result.rendered);
        assert!(shell.context().engine().is_at_root());
        let outputs = shell.take_outputs();
        assert_eq!(outputs.frames, vec!["root:home".to_string()]);
        assert!(outputs.pushes.is_empty());

        // Next native back is a first press at the root.
        shell.push_event(ShellEvent::PopState);
        shell.step().unwrap();
        assert!(matches!(
            shell.take_outputs().outcomes.as_slice(),
            [BackOutcome::ExitSuppressed { .. }]
        ));
    }

    #[test]
    fn double_popstate_at_root_exits() {
        let mut shell = shell();
        shell.push_event(ShellEvent::PopState);
        shell.step().unwrap();
        let first = shell.take_outputs();
        assert_eq!(first.toasts.len(), 1);
        assert!(matches!(
            first.outcomes.as_slice(),
            [BackOutcome::ExitSuppressed { .. }]
        ));

        shell.advance_time(Duration::from_millis(400));
        shell.push_event(ShellEvent::PopState);
        shell.push_event(ShellEvent::Navigate(Screen::Settings, None));
        let result = shell.step().unwrap();
        assert!(!result.running);
        assert_eq!(result.events_processed, 1);
        assert!(shell.context().host().is_released());
        assert_eq!(shell.take_outputs().outcomes, vec![BackOutcome::Exit]);

        let after = shell.step().unwrap();
        assert!(!after.running);
        assert_eq!(after.events_processed, 0);
    }

    #[test]
    fn exit_window_expires_during_step() {
        let mut shell = shell();
        shell.push_event(ShellEvent::PopState);
        shell.step().unwrap();

        shell.advance_time(Duration::from_millis(1000));
        let result = shell.step().unwrap();
        assert!(result.exit_window_expired);
        assert!(result.running);

        shell.push_event(ShellEvent::PopState);
        shell.step().unwrap();
        assert!(shell.is_running());
    }

    #[test]
    fn hide_flag_reaches_dispatcher() {
        let mut shell = shell();
        shell.push_event(ShellEvent::Navigate(Screen::CreatePost, None));
        shell.push_event(ShellEvent::SetHideBottomNav(true));
        shell.step().unwrap();
        assert_eq!(
            shell.outputs().frames.last().map(String::as_str),
            Some("create-post [full]")
        );
    }
}
