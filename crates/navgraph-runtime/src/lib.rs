#![forbid(unsafe_code)]

//! Navgraph runtime: platform back handling and the context provider.
//!
//! # Key Components
//!
//! - [`NavigationContext`] - application-root owner of engine and adapters
//! - [`NativeHistoryBridge`] - maps native back signals onto the engine
//! - [`ExitConfirmationGuard`] - two-press exit window at the tab root
//! - [`HistoryHost`] / [`Notifier`] / [`Clock`] - platform seams
//! - [`ScreenDispatcher`] - presentation-layer boundary
//!
//! Time is always supplied by a [`Clock`]; nothing in this crate sleeps or
//! spawns timers, so every transition can be driven deterministically.

pub mod bridge;
pub mod clock;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod exit_guard;

pub use bridge::{BackOutcome, HistoryHost, NativeHistoryBridge, Notifier, SyntheticEntry, Toast};
pub use clock::{Clock, SystemClock};
pub use config::{BridgeConfig, ContextConfig, DEFAULT_EXIT_PROMPT};
pub use context::NavigationContext;
pub use dispatch::{DispatchView, ScreenDispatcher};
pub use error::{BridgeError, ConfigError};
pub use exit_guard::{DEFAULT_EXIT_WINDOW, ExitConfirmationGuard, GuardDecision, GuardState};
