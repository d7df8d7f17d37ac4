//! Engine configuration.

use crate::screen::TabKind;
use crate::store::RetentionPolicy;

/// Configuration for a [`NavigationEngine`](crate::engine::NavigationEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Tab tracked as the origin of new nodes until `set_origin_tab` runs.
    pub initial_tab: TabKind,
    /// Store eviction policy.
    pub retention: RetentionPolicy,
}

impl EngineConfig {
    #[must_use]
    pub fn with_initial_tab(mut self, tab: TabKind) -> Self {
        self.initial_tab = tab;
        self
    }

    #[must_use]
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }
}
