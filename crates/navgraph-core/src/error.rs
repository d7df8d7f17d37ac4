#![forbid(unsafe_code)]

//! Parse errors for the textual forms of navigation identifiers.
//!
//! Engine operations themselves are infallible: underflow is reported as
//! `false` from [`go_back`](crate::engine::NavigationEngine::go_back) and
//! state updates without a current node are silent no-ops.

use std::fmt;

/// Errors produced when parsing a [`ScreenKind`](crate::screen::ScreenKind),
/// [`TabKind`](crate::screen::TabKind) or [`NodeId`](crate::id::NodeId)
/// from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No screen kind with this name.
    UnknownScreen(String),
    /// No top-level tab with this name.
    UnknownTab(String),
    /// Not of the form `nav-<seq>`.
    MalformedNodeId(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScreen(name) => write!(f, "unknown screen kind: {name:?}"),
            Self::UnknownTab(name) => write!(f, "unknown tab: {name:?}"),
            Self::MalformedNodeId(raw) => write!(f, "malformed node id: {raw:?}"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_input() {
        assert!(
            ParseError::UnknownScreen("feed".into())
                .to_string()
                .contains("\"feed\"")
        );
        assert!(ParseError::UnknownTab("x".into()).to_string().contains("tab"));
        assert!(
            ParseError::MalformedNodeId("nav-".into())
                .to_string()
                .contains("node id")
        );
    }
}
