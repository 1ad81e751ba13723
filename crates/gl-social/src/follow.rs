use super::*;
use gl_core::ID;

/// Directed edge: `follower` follows `following`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    follower: ID<Member>,
    following: ID<Member>,
    created: std::time::SystemTime,
}

impl Follow {
    pub fn new(follower: ID<Member>, following: ID<Member>) -> Self {
        Self {
            follower,
            following,
            created: std::time::SystemTime::now(),
        }
    }
    pub fn follower(&self) -> ID<Member> {
        self.follower
    }
    pub fn following(&self) -> ID<Member> {
        self.following
    }
    pub fn created_at(&self) -> std::time::SystemTime {
        self.created
    }
    pub fn is_loop(&self) -> bool {
        self.follower == self.following
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use gl_pg::*;

    /// The composite primary key is what makes a duplicate follow fail.
    impl Schema for Follow {
        fn name() -> &'static str {
            FOLLOWERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                FOLLOWERS,
                " (
                    follower_id   UUID NOT NULL REFERENCES ",
                USERS,
                "(id),
                    following_id  UUID NOT NULL REFERENCES ",
                USERS,
                "(id),
                    created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
                    PRIMARY KEY (follower_id, following_id)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_followers_following ON ",
                FOLLOWERS,
                " (following_id);"
            )
        }
    }
}
