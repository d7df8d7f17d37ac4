//! Screen-owned UI state and its shallow-merge semantics.
//!
//! A [`ScreenState`] is both the cached state of a node and the partial
//! update a screen sends while the user interacts with it. Merging follows
//! one rule: whatever the patch sets wins, whatever it leaves unset is kept.

use std::collections::BTreeMap;
use std::fmt;

/// A value in the free-form part of a screen's state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl StateValue {
    /// Parse loosely from text: booleans, then integers, then floats, then text.
    #[must_use]
    pub fn parse_loose(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(n) = raw.parse::<i64>() {
            return Self::Int(n);
        }
        if let Ok(x) = raw.parse::<f64>() {
            return Self::Float(x);
        }
        Self::Text(raw.to_string())
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for StateValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Mutable UI state of one node.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenState {
    /// Vertical scroll offset in logical pixels.
    pub scroll_offset: Option<u32>,
    /// Index of the selected sub-tab (posts / reels / tagged, ...).
    pub selected_tab: Option<u16>,
    /// Per-screen filter text.
    pub filter: Option<String>,
    /// Anything else a screen wants restored.
    pub extra: BTreeMap<String, StateValue>,
}

impl ScreenState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scroll(mut self, offset: u32) -> Self {
        self.scroll_offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_selected_tab(mut self, index: u16) -> Self {
        self.selected_tab = Some(index);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Shallow merge: fields and `extra` keys present in `patch` overwrite.
    pub fn merge(&mut self, patch: ScreenState) {
        let ScreenState {
            scroll_offset,
            selected_tab,
            filter,
            extra,
        } = patch;
        if scroll_offset.is_some() {
            self.scroll_offset = scroll_offset;
        }
        if selected_tab.is_some() {
            self.selected_tab = selected_tab;
        }
        if filter.is_some() {
            self.filter = filter;
        }
        self.extra.extend(extra);
    }

    /// `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scroll_offset.is_none()
            && self.selected_tab.is_none()
            && self.filter.is_none()
            && self.extra.is_empty()
    }
}
