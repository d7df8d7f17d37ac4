//! Runtime error types.

use std::fmt;

/// Errors from [`NativeHistoryBridge`](crate::bridge::NativeHistoryBridge).
///
/// A host failure is reported before the engine is touched: the synthetic
/// push is always the first side effect of a back signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError<E> {
    /// A back signal arrived before [`mount`](crate::bridge::NativeHistoryBridge::mount).
    NotMounted,
    /// `mount` was called twice; the bridge owns one listener for its lifetime.
    AlreadyMounted,
    /// The platform history host failed.
    Host(E),
}

impl<E: fmt::Display> fmt::Display for BridgeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMounted => write!(f, "history bridge is not mounted"),
            Self::AlreadyMounted => write!(f, "history bridge is already mounted"),
            Self::Host(e) => write!(f, "history host error: {e}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for BridgeError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(e) => Some(e),
            Self::NotMounted | Self::AlreadyMounted => None,
        }
    }
}

/// Invalid configuration override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    InvalidValue { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { var, value } => write!(f, "invalid value for {var}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}
