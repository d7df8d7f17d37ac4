#![forbid(unsafe_code)]

//! Navgraph demo library: script parsing, a text dispatcher, and the
//! runner that replays scripts against the browser shell adapter.

pub mod cli;
pub mod runner;
pub mod script;
