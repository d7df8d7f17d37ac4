//! Typed navigation contract: screens, their parameters, and top-level tabs.
//!
//! Each [`Screen`] variant carries exactly the parameters that screen is
//! opened with, so a call site cannot open a profile without a user id or a
//! DM thread without a conversation. The fieldless [`ScreenKind`] mirrors
//! the variants for matching, parsing and display.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

macro_rules! string_id {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
            pub struct $name(pub String);

            impl $name {
                /// Borrow the raw backend id.
                #[must_use]
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl From<&str> for $name {
                fn from(raw: &str) -> Self {
                    Self(raw.to_string())
                }
            }

            impl From<String> for $name {
                fn from(raw: String) -> Self {
                    Self(raw)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

string_id! {
    /// Backend id of a user account.
    UserId,
    /// Backend id of a feed post.
    PostId,
    /// Backend id of a comment.
    CommentId,
    /// Backend id of a short-form video.
    ReelId,
    /// Backend id of a direct-message conversation.
    ConversationId,
}

/// Which side of the follow graph a follow list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowListKind {
    Followers,
    Following,
}

/// Top-level tab the navigation graph was entered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TabKind {
    #[default]
    Home,
    Explore,
    Reels,
    Activity,
    Profile,
}

impl TabKind {
    /// All tabs in bottom-bar order.
    pub const ALL: &'static [TabKind] = &[
        TabKind::Home,
        TabKind::Explore,
        TabKind::Reels,
        TabKind::Activity,
        TabKind::Profile,
    ];

    /// Lowercase name, also accepted by `FromStr`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Explore => "explore",
            Self::Reels => "reels",
            Self::Activity => "activity",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TabKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tab| tab.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownTab(s.to_string()))
    }
}

/// Closed set of logical screen types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScreenKind {
    Profile,
    PostDetail,
    CommentThread,
    ReelViewer,
    StoryViewer,
    Search,
    FollowList,
    DmThread,
    Notifications,
    CreatePost,
    CreateStory,
    EditProfile,
    Settings,
    AdminPanel,
}

impl ScreenKind {
    /// Every screen kind.
    pub const ALL: &'static [ScreenKind] = &[
        ScreenKind::Profile,
        ScreenKind::PostDetail,
        ScreenKind::CommentThread,
        ScreenKind::ReelViewer,
        ScreenKind::StoryViewer,
        ScreenKind::Search,
        ScreenKind::FollowList,
        ScreenKind::DmThread,
        ScreenKind::Notifications,
        ScreenKind::CreatePost,
        ScreenKind::CreateStory,
        ScreenKind::EditProfile,
        ScreenKind::Settings,
        ScreenKind::AdminPanel,
    ];

    /// Kebab-case name, also accepted by `FromStr`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::PostDetail => "post-detail",
            Self::CommentThread => "comment-thread",
            Self::ReelViewer => "reel-viewer",
            Self::StoryViewer => "story-viewer",
            Self::Search => "search",
            Self::FollowList => "follow-list",
            Self::DmThread => "dm-thread",
            Self::Notifications => "notifications",
            Self::CreatePost => "create-post",
            Self::CreateStory => "create-story",
            Self::EditProfile => "edit-profile",
            Self::Settings => "settings",
            Self::AdminPanel => "admin-panel",
        }
    }

    /// Screens that take over the whole viewport, bottom bar included.
    #[must_use]
    pub const fn is_full_screen(self) -> bool {
        matches!(
            self,
            Self::CreatePost | Self::CreateStory | Self::StoryViewer | Self::ReelViewer
        )
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScreenKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownScreen(s.to_string()))
    }
}

/// A screen together with the read-only parameters it was opened with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Screen {
    Profile {
        user_id: UserId,
    },
    PostDetail {
        post_id: PostId,
    },
    CommentThread {
        post_id: PostId,
        /// Comment to scroll to and highlight on open.
        highlight: Option<CommentId>,
    },
    ReelViewer {
        reel_id: ReelId,
    },
    StoryViewer {
        user_id: UserId,
    },
    Search {
        query: Option<String>,
    },
    FollowList {
        user_id: UserId,
        list: FollowListKind,
    },
    DmThread {
        conversation_id: ConversationId,
        peer_id: UserId,
    },
    Notifications,
    CreatePost,
    CreateStory,
    EditProfile,
    Settings,
    AdminPanel,
}

impl Screen {
    #[must_use]
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::Profile { .. } => ScreenKind::Profile,
            Self::PostDetail { .. } => ScreenKind::PostDetail,
            Self::CommentThread { .. } => ScreenKind::CommentThread,
            Self::ReelViewer { .. } => ScreenKind::ReelViewer,
            Self::StoryViewer { .. } => ScreenKind::StoryViewer,
            Self::Search { .. } => ScreenKind::Search,
            Self::FollowList { .. } => ScreenKind::FollowList,
            Self::DmThread { .. } => ScreenKind::DmThread,
            Self::Notifications => ScreenKind::Notifications,
            Self::CreatePost => ScreenKind::CreatePost,
            Self::CreateStory => ScreenKind::CreateStory,
            Self::EditProfile => ScreenKind::EditProfile,
            Self::Settings => ScreenKind::Settings,
            Self::AdminPanel => ScreenKind::AdminPanel,
        }
    }

    /// Shorthand for [`Screen::Profile`].
    #[must_use]
    pub fn profile(user_id: impl Into<UserId>) -> Self {
        Self::Profile {
            user_id: user_id.into(),
        }
    }

    /// Shorthand for [`Screen::PostDetail`].
    #[must_use]
    pub fn post(post_id: impl Into<PostId>) -> Self {
        Self::PostDetail {
            post_id: post_id.into(),
        }
    }

    /// Shorthand for [`Screen::CommentThread`] without a highlighted comment.
    #[must_use]
    pub fn comments(post_id: impl Into<PostId>) -> Self {
        Self::CommentThread {
            post_id: post_id.into(),
            highlight: None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile { user_id } | Self::StoryViewer { user_id } => {
                write!(f, "{}({user_id})", self.kind())
            }
            Self::PostDetail { post_id } => write!(f, "{}({post_id})", self.kind()),
            Self::CommentThread { post_id, highlight } => match highlight {
                Some(comment) => write!(f, "{}({post_id}#{comment})", self.kind()),
                None => write!(f, "{}({post_id})", self.kind()),
            },
            Self::ReelViewer { reel_id } => write!(f, "{}({reel_id})", self.kind()),
            Self::Search { query } => match query {
                Some(q) => write!(f, "{}({q:?})", self.kind()),
                None => write!(f, "{}", self.kind()),
            },
            Self::FollowList { user_id, list } => {
                write!(f, "{}({user_id}, {list:?})", self.kind())
            }
            Self::DmThread {
                conversation_id,
                peer_id,
            } => write!(f, "{}({conversation_id}, {peer_id})", self.kind()),
            Self::Notifications
            | Self::CreatePost
            | Self::CreateStory
            | Self::EditProfile
            | Self::Settings
            | Self::AdminPanel => write!(f, "{}", self.kind()),
        }
    }
}
