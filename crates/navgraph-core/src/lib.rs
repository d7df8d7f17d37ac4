#![forbid(unsafe_code)]

//! Navgraph core: the in-process navigation graph.
//!
//! A single persistent shell renders one logical screen at a time. This
//! crate tracks the stack of screens behind it and the UI state each one
//! left behind, with no knowledge of rendering or of the platform.
//!
//! # Key Components
//!
//! - [`NavigationEngine`] - current pointer, history stack and node store
//! - [`NavigationNode`] - one navigational position
//! - [`Screen`] / [`ScreenKind`] - typed screens and their parameters
//! - [`ScreenState`] - per-screen UI state with shallow-merge updates
//! - [`NodeStore`] - authoritative snapshots, keyed by [`NodeId`]
//! - [`HistoryStack`] - back-navigation trail
//!
//! # Role in Navgraph
//! `navgraph-runtime` layers platform back handling and the exit guard on
//! top of the engine; `navgraph-web` adapts that to a browser shell.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod id;
pub mod node;
pub mod screen;
pub mod state;
pub mod store;

pub use config::EngineConfig;
pub use engine::{EngineStats, NavigationEngine};
pub use error::ParseError;
pub use history::HistoryStack;
pub use id::{NodeId, NodeIdGenerator};
pub use node::NavigationNode;
pub use screen::{
    CommentId, ConversationId, FollowListKind, PostId, ReelId, Screen, ScreenKind, TabKind,
    UserId,
};
pub use state::{ScreenState, StateValue};
pub use store::{NodeStore, RetentionPolicy};
