#![forbid(unsafe_code)]

//! Native back-signal bridge.
//!
//! Makes the platform back gesture indistinguishable from an in-app back
//! while never letting the platform traverse away from the shell.
//!
//! # Algorithm
//!
//! On [`mount`](NativeHistoryBridge::mount) one synthetic entry is pushed so
//! the platform has something to go back to. On each back signal:
//!
//! 1. With a current node: re-push one synthetic entry **first**, before any
//!    engine mutation, then `go_back()`, or report
//!    [`BackOutcome::CloseStack`] if the engine has no history left.
//! 2. At the tab root the [`ExitConfirmationGuard`] decides. Inside a
//!    pending window the native back is released and
//!    [`BackOutcome::Exit`] reported; this is the only path that does not
//!    re-push. Otherwise one entry is re-pushed and the prompt shown.
//!
//! Each [`SyntheticEntry`] records the engine revision seen when it was
//! pushed, which is what the platform stores as the entry's state object.

use core::time::Duration;

use navgraph_core::{NavigationEngine, NodeId, TabKind};
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::exit_guard::{ExitConfirmationGuard, GuardDecision};

/// State object attached to each pushed platform history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticEntry {
    /// Push sequence number, starting at 1 for the mount entry.
    pub seq: u64,
    /// Engine revision at push time.
    pub revision: u64,
}

/// Platform history surface (browser `history`, Android back dispatcher, ...).
pub trait HistoryHost {
    type Error: std::error::Error + 'static;

    /// Push one entry so the next native back stays inside the shell.
    fn push_entry(&mut self, entry: SyntheticEntry) -> Result<(), Self::Error>;

    /// Let the pending native back proceed, leaving the shell.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// Transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
}

/// Surface for transient notifications.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// Result of handling one native back signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The engine returned to `to`.
    Popped { to: NodeId },
    /// The deepest screen was closed with no history behind it; the owner
    /// should reset to the root of `tab`.
    CloseStack { tab: TabKind },
    /// First press at the root: exit blocked until `until`.
    ExitSuppressed { until: Duration },
    /// Second press within the window: the native back was released.
    Exit,
}

/// Translates native back signals into engine calls.
#[derive(Debug)]
pub struct NativeHistoryBridge {
    prompt: String,
    guard: ExitConfirmationGuard,
    mounted: bool,
    pushed: u64,
}

impl NativeHistoryBridge {
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            prompt: config.exit_prompt,
            guard: ExitConfirmationGuard::new(config.exit_window),
            mounted: false,
            pushed: 0,
        }
    }

    /// Push the initial synthetic entry. Call once, when the shell mounts.
    pub fn mount<H: HistoryHost>(
        &mut self,
        engine: &NavigationEngine,
        host: &mut H,
    ) -> Result<(), BridgeError<H::Error>> {
        if self.mounted {
            return Err(BridgeError::AlreadyMounted);
        }
        self.push(engine, host)?;
        self.mounted = true;
        info!("history bridge mounted");
        Ok(())
    }

    /// Stop intercepting. A later `mount` is allowed again.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.guard.disarm();
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Handle one native back signal observed at `now`.
    pub fn on_back_signal<H: HistoryHost, N: Notifier>(
        &mut self,
        engine: &mut NavigationEngine,
        host: &mut H,
        notifier: &mut N,
        now: Duration,
    ) -> Result<BackOutcome, BridgeError<H::Error>> {
        if !self.mounted {
            return Err(BridgeError::NotMounted);
        }

        if let Some(tab) = engine.current_node().map(|n| n.origin_tab()) {
            self.push(engine, host)?;
            self.guard.disarm();
            if engine.go_back()
                && let Some(to) = engine.current_id()
            {
                return Ok(BackOutcome::Popped { to });
            }
            debug!(%tab, "back at deepest screen with no history");
            return Ok(BackOutcome::CloseStack { tab });
        }

        match self.guard.trigger(now) {
            GuardDecision::AllowExit => {
                host.release().map_err(BridgeError::Host)?;
                Ok(BackOutcome::Exit)
            }
            GuardDecision::Suppress { until } => {
                if let Err(e) = self.push(engine, host) {
                    self.guard.disarm();
                    return Err(e);
                }
                notifier.notify(Toast {
                    message: self.prompt.clone(),
                    duration: self.guard.window(),
                });
                Ok(BackOutcome::ExitSuppressed { until })
            }
        }
    }

    /// Drop a pending exit confirmation, as any engine-handled back does.
    pub fn disarm(&mut self) {
        self.guard.disarm();
    }

    /// Timer tick for the exit window; `true` if a pending exit expired.
    pub fn poll(&mut self, now: Duration) -> bool {
        self.guard.poll(now)
    }

    #[must_use]
    pub const fn guard(&self) -> &ExitConfirmationGuard {
        &self.guard
    }

    /// Synthetic entries pushed so far, mount entry included.
    #[must_use]
    pub const fn pushed_entries(&self) -> u64 {
        self.pushed
    }

    fn push<H: HistoryHost>(
        &mut self,
        engine: &NavigationEngine,
        host: &mut H,
    ) -> Result<(), BridgeError<H::Error>> {
        let entry = SyntheticEntry {
            seq: self.pushed + 1,
            revision: engine.revision(),
        };
        if let Err(e) = host.push_entry(entry) {
            warn!(seq = entry.seq, error = %e, "failed to push synthetic history entry");
            return Err(BridgeError::Host(e));
        }
        self.pushed = entry.seq;
        debug!(seq = entry.seq, revision = entry.revision, "pushed synthetic history entry");
        Ok(())
    }
}

impl Default for NativeHistoryBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}
