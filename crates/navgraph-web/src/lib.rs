#![forbid(unsafe_code)]

//! `navgraph-web` adapts the navigation runtime to a browser shell.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) forwards `popstate`
//!   and reads back pushed entries and toasts.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`; it models the browser history
//! surface so the full back-handling loop can be replayed in tests.

pub mod step_shell;

use core::time::Duration;

use navgraph_runtime::{Clock, HistoryHost, Notifier, SyntheticEntry, Toast};
use tracing::trace;

/// Errors raised by [`WebHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebHistoryError {
    /// The shell already let a native back leave the page.
    Released,
}

impl core::fmt::Display for WebHistoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Released => write!(f, "history was released to the browser"),
        }
    }
}

impl std::error::Error for WebHistoryError {}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

/// Model of the browser session history owned by the shell.
///
/// `entries` holds the synthetic entries above the shell's landing entry.
/// A `popstate` consumes the top one; [`HistoryHost::push_entry`] replaces
/// it. Once released, the next browser back leaves the page and further
/// pushes fail.
#[derive(Debug, Default, Clone)]
pub struct WebHistory {
    entries: Vec<SyntheticEntry>,
    pushed: Vec<SyntheticEntry>,
    released: bool,
}

impl WebHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Browser fired `popstate`: one entry was traversed.
    ///
    /// Returns the entry that was left, if any.
    pub fn on_popstate(&mut self) -> Option<SyntheticEntry> {
        let left = self.entries.pop();
        trace!(?left, depth = self.entries.len(), "popstate");
        left
    }

    /// Synthetic entries currently above the landing entry.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn top(&self) -> Option<&SyntheticEntry> {
        self.entries.last()
    }

    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Entries pushed since the last call.
    pub fn take_pushed(&mut self) -> Vec<SyntheticEntry> {
        std::mem::take(&mut self.pushed)
    }
}

impl HistoryHost for WebHistory {
    type Error = WebHistoryError;

    fn push_entry(&mut self, entry: SyntheticEntry) -> Result<(), WebHistoryError> {
        if self.released {
            return Err(WebHistoryError::Released);
        }
        self.entries.push(entry);
        self.pushed.push(entry);
        Ok(())
    }

    fn release(&mut self) -> Result<(), WebHistoryError> {
        if self.released {
            return Err(WebHistoryError::Released);
        }
        self.released = true;
        Ok(())
    }
}

/// Queue of toasts for the host to display.
#[derive(Debug, Default, Clone)]
pub struct WebToasts {
    queue: Vec<Toast>,
}

impl WebToasts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.queue)
    }

    #[must_use]
    pub fn pending(&self) -> &[Toast] {
        &self.queue
    }
}

impl Notifier for WebToasts {
    fn notify(&mut self, toast: Toast) {
        self.queue.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(seq: u64) -> SyntheticEntry {
        SyntheticEntry { seq, revision: 0 }
    }

    #[test]
    fn deterministic_clock_advances_and_saturates() {
        let mut clock = DeterministicClock::new();
        assert_eq!(clock.now_mono(), Duration::ZERO);
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.now_mono(), Duration::from_millis(16));
        clock.set(Duration::MAX);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now_mono(), Duration::MAX);
    }

    #[test]
    fn popstate_consumes_top_entry() {
        let mut history = WebHistory::new();
        history.push_entry(entry(1)).unwrap();
        history.push_entry(entry(2)).unwrap();
        assert_eq!(history.on_popstate(), Some(entry(2)));
        assert_eq!(history.depth(), 1);
        assert_eq!(history.take_pushed(), vec![entry(1), entry(2)]);
        assert!(history.take_pushed().is_empty());
    }

    #[test]
    fn released_history_rejects_pushes() {
        let mut history = WebHistory::new();
        history.release().unwrap();
        assert!(history.is_released());
        assert_eq!(history.push_entry(entry(1)), Err(WebHistoryError::Released));
        assert_eq!(history.release(), Err(WebHistoryError::Released));
    }

    #[test]
    fn toasts_drain_in_order() {
        let mut toasts = WebToasts::new();
        for message in ["a", "b"] {
            toasts.notify(Toast {
                message: message.into(),
                duration: Duration::from_secs(2),
            });
        }
        assert_eq!(toasts.pending().len(), 2);
        let drained: Vec<_> = toasts.take().into_iter().map(|t| t.message).collect();
        assert_eq!(drained, vec!["a".to_string(), "b".to_string()]);
        assert!(toasts.pending().is_empty());
    }
}
