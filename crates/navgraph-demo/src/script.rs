#![forbid(unsafe_code)]

//! Navigation script parser.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! nav profile alice          # open a screen: nav <screen-kind> [arg..]
//! scroll 640                 # patch scroll_offset
//! tab 1                      # patch selected_tab
//! filter photos              # patch filter
//! set liked true             # patch an extra key
//! back                       # native back signal
//! wait 500                   # advance the clock
//! switch explore             # switch top-level tab
//! hide-nav on                # set hide_bottom_nav
//! state                      # print the current node's state
//! ```

use core::time::Duration;
use std::fmt;

use navgraph::{FollowListKind, ParseError, Screen, ScreenKind, StateValue, TabKind};

/// One parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Nav(Screen),
    Scroll(u32),
    Tab(u16),
    Filter(String),
    Set(String, StateValue),
    Back,
    Wait(Duration),
    Switch(TabKind),
    HideNav(bool),
    State,
}

/// A command with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    /// Source text without the comment.
    pub text: String,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptErrorKind {
    UnknownCommand(String),
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    TrailingArguments(&'static str),
    InvalidNumber(String),
    InvalidArgument {
        expected: &'static str,
        got: String,
    },
    Parse(ParseError),
}

/// Script error, tagged with its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub kind: ScriptErrorKind,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ScriptErrorKind::UnknownCommand(cmd) => write!(f, "unknown command {cmd:?}"),
            ScriptErrorKind::MissingArgument { command, expected } => {
                write!(f, "{command}: missing {expected}")
            }
            ScriptErrorKind::TrailingArguments(command) => {
                write!(f, "{command}: unexpected extra arguments")
            }
            ScriptErrorKind::InvalidNumber(raw) => write!(f, "not a number: {raw:?}"),
            ScriptErrorKind::InvalidArgument { expected, got } => {
                write!(f, "expected {expected}, got {got:?}")
            }
            ScriptErrorKind::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ScriptErrorKind::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Parse a whole script. Stops at the first bad line.
pub fn parse(source: &str) -> Result<Vec<Line>, ScriptError> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        let text = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
        if text.is_empty() {
            continue;
        }
        let command = parse_command(text).map_err(|kind| ScriptError { line: number, kind })?;
        lines.push(Line {
            number,
            text: text.to_string(),
            command,
        });
    }
    Ok(lines)
}

fn parse_command(text: &str) -> Result<Command, ScriptErrorKind> {
    let mut words = text.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ScriptErrorKind::UnknownCommand(String::new()));
    };
    let rest: Vec<&str> = words.collect();

    match head {
        "nav" => {
            let (kind, args) = rest.split_first().ok_or(ScriptErrorKind::MissingArgument {
                command: "nav",
                expected: "screen kind",
            })?;
            let kind = kind.parse::<ScreenKind>().map_err(ScriptErrorKind::Parse)?;
            build_screen(kind, args).map(Command::Nav)
        }
        "scroll" => Ok(Command::Scroll(number(single("scroll", "offset", &rest)?)?)),
        "tab" => Ok(Command::Tab(number(single("tab", "index", &rest)?)?)),
        "filter" => {
            if rest.is_empty() {
                return Err(ScriptErrorKind::MissingArgument {
                    command: "filter",
                    expected: "text",
                });
            }
            Ok(Command::Filter(rest.join(" ")))
        }
        "set" => match rest.as_slice() {
            [key, value @ ..] if !value.is_empty() => Ok(Command::Set(
                (*key).to_string(),
                StateValue::parse_loose(&value.join(" ")),
            )),
            _ => Err(ScriptErrorKind::MissingArgument {
                command: "set",
                expected: "key and value",
            }),
        },
        "back" => none("back", &rest).map(|()| Command::Back),
        "wait" => {
            let ms: u64 = number(single("wait", "milliseconds", &rest)?)?;
            Ok(Command::Wait(Duration::from_millis(ms)))
        }
        "switch" => single("switch", "tab", &rest)?
            .parse::<TabKind>()
            .map(Command::Switch)
            .map_err(ScriptErrorKind::Parse),
        "hide-nav" => match single("hide-nav", "on|off", &rest)? {
            "on" => Ok(Command::HideNav(true)),
            "off" => Ok(Command::HideNav(false)),
            other => Err(ScriptErrorKind::InvalidArgument {
                expected: "on|off",
                got: other.to_string(),
            }),
        },
        "state" => none("state", &rest).map(|()| Command::State),
        other => Err(ScriptErrorKind::UnknownCommand(other.to_string())),
    }
}

fn build_screen(kind: ScreenKind, args: &[&str]) -> Result<Screen, ScriptErrorKind> {
    let missing = |expected: &'static str| ScriptErrorKind::MissingArgument {
        command: "nav",
        expected,
    };
    let first = || args.first().copied().ok_or_else(|| missing("id"));

    let screen = match kind {
        ScreenKind::Profile => Screen::profile(first()?),
        ScreenKind::PostDetail => Screen::post(first()?),
        ScreenKind::CommentThread => Screen::CommentThread {
            post_id: first()?.into(),
            highlight: args.get(1).map(|c| (*c).into()),
        },
        ScreenKind::ReelViewer => Screen::ReelViewer {
            reel_id: first()?.into(),
        },
        ScreenKind::StoryViewer => Screen::StoryViewer {
            user_id: first()?.into(),
        },
        ScreenKind::Search => Screen::Search {
            query: (!args.is_empty()).then(|| args.join(" ")),
        },
        ScreenKind::FollowList => {
            let list = match args.get(1).copied() {
                None | Some("followers") => FollowListKind::Followers,
                Some("following") => FollowListKind::Following,
                Some(other) => {
                    return Err(ScriptErrorKind::InvalidArgument {
                        expected: "followers|following",
                        got: other.to_string(),
                    });
                }
            };
            Screen::FollowList {
                user_id: first()?.into(),
                list,
            }
        }
        ScreenKind::DmThread => {
            let [conversation, peer] = args else {
                return Err(missing("conversation id and peer id"));
            };
            Screen::DmThread {
                conversation_id: (*conversation).into(),
                peer_id: (*peer).into(),
            }
        }
        ScreenKind::Notifications => Screen::Notifications,
        ScreenKind::CreatePost => Screen::CreatePost,
        ScreenKind::CreateStory => Screen::CreateStory,
        ScreenKind::EditProfile => Screen::EditProfile,
        ScreenKind::Settings => Screen::Settings,
        ScreenKind::AdminPanel => Screen::AdminPanel,
    };
    Ok(screen)
}

fn single<'a>(
    command: &'static str,
    expected: &'static str,
    rest: &[&'a str],
) -> Result<&'a str, ScriptErrorKind> {
    match rest {
        [one] => Ok(*one),
        [] => Err(ScriptErrorKind::MissingArgument { command, expected }),
        _ => Err(ScriptErrorKind::TrailingArguments(command)),
    }
}

fn none(command: &'static str, rest: &[&str]) -> Result<(), ScriptErrorKind> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ScriptErrorKind::TrailingArguments(command))
    }
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, ScriptErrorKind> {
    raw.parse()
        .map_err(|_| ScriptErrorKind::InvalidNumber(raw.to_string()))
}
