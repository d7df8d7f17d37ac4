//! End-to-end tests of the native back bridge through a [`NavigationContext`].
//!
//! Invariants:
//!
//! 1. Every back signal except a confirmed exit pushes exactly one entry,
//!    and it is pushed before the engine changes.
//! 2. A native back at depth `d > 0` leaves the engine at depth `d - 1`,
//!    exactly like an in-app back.
//! 3. The second root-level press exits only inside the window.

use core::cell::Cell;
use core::time::Duration;
use std::fmt;

use navgraph_runtime::{
    BackOutcome, BridgeConfig, BridgeError, Clock, ContextConfig, HistoryHost, NavigationContext,
    Notifier, SyntheticEntry, Toast,
};
use navgraph_core::{Screen, ScreenState, TabKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug)]
struct HostClosed;

impl fmt::Display for HostClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "history host closed")
    }
}

impl std::error::Error for HostClosed {}

#[derive(Debug, Default)]
struct Platform {
    entries: Vec<SyntheticEntry>,
    releases: usize,
    closed: bool,
}

impl HistoryHost for Platform {
    type Error = HostClosed;

    fn push_entry(&mut self, entry: SyntheticEntry) -> Result<(), HostClosed> {
        if self.closed {
            return Err(HostClosed);
        }
        self.entries.push(entry);
        Ok(())
    }

    fn release(&mut self) -> Result<(), HostClosed> {
        self.releases += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Toasts(Vec<Toast>);

impl Notifier for Toasts {
    fn notify(&mut self, toast: Toast) {
        self.0.push(toast);
    }
}

#[derive(Debug, Default)]
struct ManualClock(Cell<Duration>);

impl ManualClock {
    fn advance_ms(&self, ms: u64) {
        self.0.set(self.0.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now_mono(&self) -> Duration {
        self.0.get()
    }
}

type Ctx = NavigationContext<Platform, Toasts, ManualClock>;

fn mounted(window_ms: u64) -> Ctx {
    let config = ContextConfig::default().with_bridge(
        BridgeConfig::default().with_exit_window(Duration::from_millis(window_ms)),
    );
    let mut nav = NavigationContext::new(
        config,
        Platform::default(),
        Toasts::default(),
        ManualClock::default(),
    );
    nav.mount().unwrap();
    nav
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Re-push ordering
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn entry_is_pushed_before_engine_mutation() {
    let mut nav = mounted(2000);
    nav.navigate(Screen::profile("alice"), None);
    nav.navigate(Screen::post("p1"), None);
    let before = nav.engine().revision();

    let outcome = nav.handle_back_signal().unwrap();
    assert!(matches!(outcome, BackOutcome::Popped { .. }));

    let last = *nav.host().entries.last().unwrap();
    assert_eq!(last.revision, before);
    assert!(nav.engine().revision() > before);
    assert_eq!(last.seq, 2);
}

#[test]
fn mount_pushes_exactly_once() {
    let mut nav = mounted(2000);
    assert_eq!(nav.host().entries.len(), 1);
    assert!(matches!(nav.mount(), Err(BridgeError::AlreadyMounted)));
    assert_eq!(nav.host().entries.len(), 1);
}

#[test]
fn host_failure_leaves_engine_untouched() {
    let mut nav = mounted(2000);
    nav.navigate(Screen::profile("alice"), None);
    nav.navigate(Screen::post("p1"), None);
    let depth = nav.engine().depth();
    nav.host_mut().closed = true;

    let err = nav.handle_back_signal().unwrap_err();
    assert!(matches!(err, BridgeError::Host(HostClosed)));
    assert_eq!(nav.engine().depth(), depth);
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Native back equals in-app back
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn native_back_restores_state() {
    let mut nav = mounted(2000);
    let feed = nav.navigate(Screen::profile("alice"), None);
    nav.update_state(ScreenState::new().with_scroll(640).with_selected_tab(1));
    nav.navigate(Screen::post("p1"), None);

    assert_eq!(
        nav.handle_back_signal().unwrap(),
        BackOutcome::Popped { to: feed }
    );
    let state = nav.node_state(&feed).unwrap();
    assert_eq!(state.scroll_offset, Some(640));
    assert_eq!(state.selected_tab, Some(1));
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Exit confirmation window
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn second_press_inside_window_exits() {
    let mut nav = mounted(2000);
    assert!(matches!(
        nav.handle_back_signal().unwrap(),
        BackOutcome::ExitSuppressed { .. }
    ));
    nav.clock().advance_ms(1999);
    assert_eq!(nav.handle_back_signal().unwrap(), BackOutcome::Exit);
    assert_eq!(nav.host().releases, 1);
    // mount + first press; the exit does not re-push
    assert_eq!(nav.host().entries.len(), 2);
    assert_eq!(nav.notifier().0.len(), 1);
}

#[test]
fn press_at_deadline_starts_a_new_window() {
    let mut nav = mounted(2000);
    nav.handle_back_signal().unwrap();
    nav.clock().advance_ms(2000);
    assert_eq!(
        nav.handle_back_signal().unwrap(),
        BackOutcome::ExitSuppressed {
            until: Duration::from_millis(4000)
        }
    );
    assert_eq!(nav.host().releases, 0);
    assert_eq!(nav.notifier().0.len(), 2);
}

#[test]
fn engine_back_between_presses_disarms() {
    let mut nav = mounted(2000);
    nav.handle_back_signal().unwrap();
    nav.navigate(Screen::profile("alice"), None);
    nav.navigate(Screen::post("p1"), None);
    nav.handle_back_signal().unwrap();
    nav.clear_history();

    assert!(matches!(
        nav.handle_back_signal().unwrap(),
        BackOutcome::ExitSuppressed { .. }
    ));
    assert_eq!(nav.host().releases, 0);
}

#[test]
fn close_stack_keeps_tab() {
    let mut nav = mounted(2000);
    nav.switch_tab(TabKind::Reels);
    nav.navigate(Screen::ReelViewer { reel_id: "r1".into() }, None);
    assert_eq!(
        nav.handle_back_signal().unwrap(),
        BackOutcome::CloseStack { tab: TabKind::Reels }
    );
    assert!(nav.engine().is_at_root());
}

// ═════════════════════════════════════════════════════════════════════════
// Property: depth and push count stay in sync
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Step {
    Navigate(u8),
    NativeBack,
    Wait(u16),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0u8..4).prop_map(Step::Navigate),
        3 => Just(Step::NativeBack),
        1 => (0u16..3000).prop_map(Step::Wait),
    ]
}

proptest! {
    #[test]
    fn native_back_tracks_depth(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut nav = mounted(2000);
        let mut exited = false;

        for step in steps {
            if exited {
                break;
            }
            match step {
                Step::Navigate(n) => {
                    nav.navigate(Screen::profile(format!("u{n}")), None);
                }
                Step::Wait(ms) => nav.clock().advance_ms(u64::from(ms)),
                Step::NativeBack => {
                    let depth = nav.engine().depth();
                    let had_node = nav.engine().current_node().is_some();
                    let pushes = nav.host().entries.len();
                    let outcome = nav.handle_back_signal().unwrap();
                    match outcome {
                        BackOutcome::Popped { .. } => {
                            prop_assert_eq!(nav.engine().depth(), depth - 1);
                        }
                        BackOutcome::CloseStack { .. } => {
                            prop_assert!(had_node);
                            prop_assert_eq!(depth, 0);
                            prop_assert!(nav.engine().is_at_root());
                        }
                        BackOutcome::ExitSuppressed { .. } => prop_assert!(!had_node),
                        BackOutcome::Exit => {
                            prop_assert!(!had_node);
                            exited = true;
                        }
                    }
                    let expected = if exited { pushes } else { pushes + 1 };
                    prop_assert_eq!(nav.host().entries.len(), expected);
                }
            }
        }
    }
}
