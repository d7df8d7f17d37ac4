//! Runtime configuration.
//!
//! Environment overrides use the `NAVGRAPH_` prefix:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `NAVGRAPH_EXIT_WINDOW_MS` | [`BridgeConfig::exit_window`] |
//! | `NAVGRAPH_EXIT_PROMPT` | [`BridgeConfig::exit_prompt`] |

use core::time::Duration;

use navgraph_core::EngineConfig;

use crate::error::ConfigError;
use crate::exit_guard::DEFAULT_EXIT_WINDOW;

pub const ENV_EXIT_WINDOW_MS: &str = "NAVGRAPH_EXIT_WINDOW_MS";
pub const ENV_EXIT_PROMPT: &str = "NAVGRAPH_EXIT_PROMPT";

/// Prompt shown on the first back press at the tab root.
pub const DEFAULT_EXIT_PROMPT: &str = "Press back again to exit";

/// Native back handling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// How long a first root-level back press stays pending.
    pub exit_window: Duration,
    /// Text of the transient "press again" notification.
    pub exit_prompt: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            exit_window: DEFAULT_EXIT_WINDOW,
            exit_prompt: DEFAULT_EXIT_PROMPT.to_string(),
        }
    }
}

impl BridgeConfig {
    #[must_use]
    pub fn with_exit_window(mut self, window: Duration) -> Self {
        self.exit_window = window;
        self
    }

    #[must_use]
    pub fn with_exit_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.exit_prompt = prompt.into();
        self
    }

    /// Defaults overridden by `NAVGRAPH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_EXIT_WINDOW_MS) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: ENV_EXIT_WINDOW_MS,
                    value: raw.clone(),
                })?;
            config.exit_window = Duration::from_millis(ms);
        }
        if let Some(prompt) = lookup(ENV_EXIT_PROMPT)
            && !prompt.trim().is_empty()
        {
            config.exit_prompt = prompt;
        }
        Ok(config)
    }
}

/// Configuration for a [`NavigationContext`](crate::context::NavigationContext).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextConfig {
    pub engine: EngineConfig,
    pub bridge: BridgeConfig,
    /// Derive `hide_bottom_nav` from whether the current screen is full-screen.
    pub auto_hide_bottom_nav: bool,
}

impl ContextConfig {
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn with_bridge(mut self, bridge: BridgeConfig) -> Self {
        self.bridge = bridge;
        self
    }

    #[must_use]
    pub fn with_auto_hide_bottom_nav(mut self, enabled: bool) -> Self {
        self.auto_hide_bottom_nav = enabled;
        self
    }
}
