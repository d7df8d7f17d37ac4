#![forbid(unsafe_code)]

//! Navgraph public facade crate.
//!
//! Re-exports the engine, the runtime context provider and (with the `web`
//! feature) the browser shell adapter, plus a prelude for day-to-day use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use navgraph_core::{
    CommentId, ConversationId, EngineConfig, EngineStats, FollowListKind, NavigationEngine,
    NavigationNode, NodeId, ParseError, PostId, ReelId, RetentionPolicy, Screen, ScreenKind,
    ScreenState, StateValue, TabKind, UserId,
};

// --- Runtime re-exports ----------------------------------------------------

pub use navgraph_runtime::{
    BackOutcome, BridgeConfig, BridgeError, Clock, ConfigError, ContextConfig, DispatchView,
    ExitConfirmationGuard, HistoryHost, NativeHistoryBridge, NavigationContext, Notifier,
    ScreenDispatcher, SyntheticEntry, SystemClock, Toast,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use navgraph_web::{
    DeterministicClock, WebHistory, WebHistoryError, WebToasts,
    step_shell::{ShellEvent, StepResult, StepShell, WebOutputs},
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for navgraph apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while loading input.
    Io(std::io::Error),
    /// Unknown screen, tab or node id text.
    Parse(ParseError),
    /// Invalid configuration override.
    Config(ConfigError),
    /// Native history bridge failure, host error included.
    Bridge(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Bridge(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Bridge(err) => Some(err.as_ref()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl<E> From<BridgeError<E>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: BridgeError<E>) -> Self {
        Self::Bridge(Box::new(err))
    }
}

/// Standard result type for navgraph APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BackOutcome, ContextConfig, DispatchView, Error, NavigationContext, NavigationEngine,
        NodeId, Result, Screen, ScreenDispatcher, ScreenKind, ScreenState, TabKind,
    };

    #[cfg(feature = "web")]
    pub use crate::{ShellEvent, StepShell};

    pub use crate::{core, runtime};
}

pub use navgraph_core as core;
pub use navgraph_runtime as runtime;
#[cfg(feature = "web")]
pub use navgraph_web as web;
