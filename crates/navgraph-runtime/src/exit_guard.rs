#![forbid(unsafe_code)]

//! "Press back again to exit" guard.
//!
//! Two states, `ARMED` and `PENDING`. The first trigger at the tab root
//! moves to `PENDING` for a fixed window; a second trigger inside the window
//! is the only way the app is allowed to exit.
//!
//! Time is supplied by the caller, so transitions are plain functions of
//! `(state, now)`. The guard keeps a single deadline: arming again replaces
//! it instead of stacking a second timer.
//!
//! # Failure Modes
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | [`poll`](ExitConfirmationGuard::poll) never runs (host frozen) | Deadline still checked on the next trigger |
//! | Trigger exactly at the deadline | Treated as expired: a fresh first press |
//! | Clock jumps backwards | Still pending until the stored deadline |

use core::time::Duration;

use tracing::{debug, info};

/// Default confirmation window.
pub const DEFAULT_EXIT_WINDOW: Duration = Duration::from_millis(2000);

/// Observable guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No pending exit.
    Armed,
    /// One confirmation received; expires at `until`.
    Pending { until: Duration },
}

/// What the caller must do with the native back action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Block the exit and show the prompt; pending until `until`.
    Suppress { until: Duration },
    /// Let the native back proceed.
    AllowExit,
}

/// Time-windowed exit confirmation.
#[derive(Debug, Clone)]
pub struct ExitConfirmationGuard {
    window: Duration,
    pending_until: Option<Duration>,
}

impl Default for ExitConfirmationGuard {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_WINDOW)
    }
}

impl ExitConfirmationGuard {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending_until: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// State as last transitioned, without applying expiry.
    #[must_use]
    pub fn state(&self) -> GuardState {
        match self.pending_until {
            Some(until) => GuardState::Pending { until },
            None => GuardState::Armed,
        }
    }

    /// `true` if a trigger at `now` would be a confirmation.
    #[must_use]
    pub fn is_pending(&self, now: Duration) -> bool {
        self.pending_until.is_some_and(|until| now < until)
    }

    /// Timer tick: return to `ARMED` once the window has elapsed.
    ///
    /// Returns `true` if this call expired a pending window.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.pending_until {
            Some(until) if now >= until => {
                self.pending_until = None;
                debug!("exit confirmation window expired");
                true
            }
            _ => false,
        }
    }

    /// Handle one back press at the tab root.
    pub fn trigger(&mut self, now: Duration) -> GuardDecision {
        if self.is_pending(now) {
            self.pending_until = None;
            info!("exit confirmed");
            return GuardDecision::AllowExit;
        }
        let until = now.saturating_add(self.window);
        self.pending_until = Some(until);
        let until_ms = u64::try_from(until.as_millis()).unwrap_or(u64::MAX);
        debug!(until_ms, "exit confirmation pending");
        GuardDecision::Suppress { until }
    }

    /// Drop any pending confirmation.
    pub fn disarm(&mut self) {
        self.pending_until = None;
    }
}
