#![forbid(unsafe_code)]

//! Node identifiers.
//!
//! Every call to [`NavigationEngine::navigate`](crate::engine::NavigationEngine::navigate)
//! mints a fresh [`NodeId`]. Ids are ordered by creation and are never
//! reused for the lifetime of the generator, including across
//! `clear_history()`: a stale id held by a screen that is mid-teardown can
//! therefore never alias a newer node.

use std::fmt;
use std::str::FromStr;

use web_time::{SystemTime, UNIX_EPOCH};

use crate::error::ParseError;

const PREFIX: &str = "nav-";

/// Unique identifier of one navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u64);

impl NodeId {
    /// Creation sequence number.
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(PREFIX)
            .and_then(|seq| seq.parse::<u64>().ok())
            .map(NodeId)
            .ok_or_else(|| ParseError::MalformedNodeId(s.to_string()))
    }
}

/// Mints [`NodeId`]s together with their creation timestamp.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next: u64,
}

impl NodeIdGenerator {
    /// Generator whose first id is `nav-1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Next id and the wall-clock time in milliseconds since the Unix epoch.
    ///
    /// The timestamp is informational; ordering comes from the sequence.
    pub fn next_id(&mut self) -> (NodeId, u64) {
        // `Default` starts at 0; skip it so ids stay 1-based either way.
        if self.next == 0 {
            self.next = 1;
        }
        let id = NodeId(self.next);
        self.next = self.next.saturating_add(1);
        (id, now_millis())
    }

    /// Number of ids minted so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next.saturating_sub(1)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().min(u128::from(u64::MAX)) as u64)
        .unwrap_or(0)
}
