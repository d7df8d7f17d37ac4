#![forbid(unsafe_code)]

//! Command-line argument parsing for the navigation demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `NAVGRAPH_DEMO_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

use navgraph::TabKind;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_SCRIPT: &str = "NAVGRAPH_DEMO_SCRIPT";
pub const ENV_TAB: &str = "NAVGRAPH_DEMO_TAB";
pub const ENV_EXIT_WINDOW_MS: &str = "NAVGRAPH_DEMO_EXIT_WINDOW_MS";

const HELP_TEXT: &str = "\
Navgraph Demo: replay a navigation script against the browser shell adapter

USAGE:
    navgraph-demo [OPTIONS] [SCRIPT]

ARGS:
    SCRIPT                 Script file to replay; '-' reads stdin.
                           Without one, a built-in tour runs.

OPTIONS:
    --tab=TAB              Starting tab: home (default), explore, reels,
                           activity, profile
    --exit-window-ms=N     Exit confirmation window (default: 2000, or
                           NAVGRAPH_EXIT_WINDOW_MS)
    --auto-hide-nav        Hide the bottom nav on full-screen screens
    --json                 Print one JSON object per command
    --help, -h             Show this help message
    --version, -V          Show version

SCRIPT COMMANDS:
    nav <screen-kind> [arg..]   Open a screen (e.g. nav profile alice)
    scroll <n>                  Save scroll offset on the current screen
    tab <index>                 Save selected sub-tab
    filter <text>               Save filter text
    set <key> <value>           Save a custom state value
    back                        Native back signal (hardware / gesture)
    wait <ms>                   Advance the clock
    switch <tab>                Switch top-level tab
    hide-nav on|off             Toggle the bottom nav
    state                       Print the current screen's state

ENVIRONMENT VARIABLES:
    NAVGRAPH_DEMO_SCRIPT           Override SCRIPT
    NAVGRAPH_DEMO_TAB              Override --tab
    NAVGRAPH_DEMO_EXIT_WINDOW_MS   Override --exit-window-ms
    NAVGRAPH_EXIT_PROMPT           Text of the \"press again\" toast
    RUST_LOG                       Log filter (default: navgraph=info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Script path; `None` runs the built-in tour, `-` reads stdin.
    pub script: Option<PathBuf>,
    pub tab: TabKind,
    /// `None` keeps the runtime default (or `NAVGRAPH_EXIT_WINDOW_MS`).
    pub exit_window_ms: Option<u64>,
    pub auto_hide_nav: bool,
    pub json: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            script: None,
            tab: TabKind::Home,
            exit_window_ms: None,
            auto_hide_nav: false,
            json: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting the
    /// process on `--help`, `--version` or bad input.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |var| env::var(var).ok()) {
            Ok(Action::Run(opts)) => opts,
            Ok(Action::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Action::Version) => {
                println!("navgraph-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Environment variables take precedence over defaults but are
    /// overridden by explicit command-line flags.
    pub fn parse_from(
        args: impl IntoIterator<Item = String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Action, String> {
        let mut opts = Self::default();

        if let Some(val) = lookup(ENV_SCRIPT)
            && !val.is_empty()
        {
            opts.script = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup(ENV_TAB)
            && let Ok(tab) = val.parse()
        {
            opts.tab = tab;
        }
        if let Some(val) = lookup(ENV_EXIT_WINDOW_MS)
            && let Ok(n) = val.parse()
        {
            opts.exit_window_ms = Some(n);
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-V" => return Ok(Action::Version),
                "--json" => opts.json = true,
                "--auto-hide-nav" => opts.auto_hide_nav = true,
                other => {
                    if let Some(val) = other.strip_prefix("--tab=") {
                        opts.tab = val
                            .parse()
                            .map_err(|_| format!("Invalid --tab value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--exit-window-ms=") {
                        let ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-window-ms value: {val}"))?;
                        opts.exit_window_ms = Some(ms);
                    } else if other.starts_with("--") {
                        return Err(format!("Unknown argument: {other}"));
                    } else {
                        opts.script = Some(PathBuf::from(other));
                    }
                }
            }
        }

        Ok(Action::Run(opts))
    }
}
