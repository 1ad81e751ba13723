use gl_core::ID;
use gl_core::Unique;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;

/// Third-party services a member can link a handle for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitch,
    Discord,
    Instagram,
    Youtube,
}

impl Platform {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Twitch => "Twitch account",
            Self::Discord => "Discord account",
            Self::Instagram => "Instagram account",
            Self::Youtube => "YouTube channel",
        }
    }
}

impl TryFrom<&str> for Platform {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "twitch" => Ok(Self::Twitch),
            "discord" => Ok(Self::Discord),
            "instagram" => Ok(Self::Instagram),
            "youtube" => Ok(Self::Youtube),
            _ => Err(format!("unknown platform: {}", s)),
        }
    }
}

/// Linked handles. Unset handles are left out of JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitch_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_channel: Option<String>,
}

impl Links {
    pub fn get(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Twitch => self.twitch_username.as_deref(),
            Platform::Discord => self.discord_username.as_deref(),
            Platform::Instagram => self.instagram_handle.as_deref(),
            Platform::Youtube => self.youtube_channel.as_deref(),
        }
    }
    pub fn set(&mut self, platform: Platform, handle: Option<String>) {
        match platform {
            Platform::Twitch => self.twitch_username = handle,
            Platform::Discord => self.discord_username = handle,
            Platform::Instagram => self.instagram_handle = handle,
            Platform::Youtube => self.youtube_channel = handle,
        }
    }
}

/// Registered user. The password hash never lives here, so a `Member`
/// can be serialized anywhere without leaking credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub(crate) id: ID<Self>,
    pub(crate) username: String,
    #[serde(flatten)]
    pub(crate) links: Links,
    #[serde(rename = "connectedGames")]
    pub(crate) games: BTreeSet<String>,
    #[serde(rename = "isPrivate")]
    pub(crate) private: bool,
}

impl Member {
    /// Fresh account as created at registration: public, nothing linked.
    pub fn new(id: ID<Self>, username: String) -> Self {
        Self {
            id,
            username,
            links: Links::default(),
            games: BTreeSet::new(),
            private: false,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn links(&self) -> &Links {
        &self.links
    }
    pub fn games(&self) -> &BTreeSet<String> {
        &self.games
    }
    pub fn private(&self) -> bool {
        self.private
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use gl_pg::*;

    /// Schema implementation for Member (users table).
    /// Note: hashword is a database-only field, not part of Member domain type.
    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id                UUID PRIMARY KEY,
                    username          VARCHAR(255) UNIQUE NOT NULL,
                    hashword          TEXT NOT NULL,
                    twitch_username   VARCHAR(255),
                    discord_username  VARCHAR(255),
                    instagram_handle  VARCHAR(255),
                    youtube_channel   VARCHAR(255),
                    connected_games   TEXT[] NOT NULL DEFAULT '{}',
                    is_private        BOOLEAN NOT NULL DEFAULT FALSE
                );"
            )
        }
        /// The UNIQUE constraint on username already carries its index.
        fn indices() -> &'static str {
            ""
        }
    }

}
