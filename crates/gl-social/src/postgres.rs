use super::*;
use gl_core::ID;
use gl_core::Unique;
use gl_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Creates both tables and their indices. Users first, since follow
/// edges reference them.
pub async fn migrate(client: &Client) -> Result<(), PgErr> {
    gl_pg::create::<Member>(client).await?;
    gl_pg::create::<Follow>(client).await?;
    Ok(())
}

const MEMBER: &str = "id, username, twitch_username, discord_username, instagram_handle, youtube_channel, connected_games, is_private";

impl From<Row> for Member {
    fn from(row: Row) -> Self {
        Self {
            id: ID::from(row.get::<_, uuid::Uuid>(0)),
            username: row.get::<_, String>(1),
            links: Links {
                twitch_username: row.get::<_, Option<String>>(2),
                discord_username: row.get::<_, Option<String>>(3),
                instagram_handle: row.get::<_, Option<String>>(4),
                youtube_channel: row.get::<_, Option<String>>(5),
            },
            games: row.get::<_, Vec<String>>(6).into_iter().collect(),
            private: row.get::<_, bool>(7),
        }
    }
}

impl Directory for Arc<Client> {
    async fn ping(&self) -> Result<(), StoreError> {
        self.execute("SELECT 1", &[]).await?;
        Ok(())
    }

    async fn taken(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT 1 FROM ", USERS, " WHERE username = $1"),
                &[&username],
            )
            .await?
            .is_some())
    }

    async fn create(&self, member: &Member, hashword: &str) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, username, hashword) VALUES ($1, $2, $3)"
            ),
            &[&member.id().inner(), &member.username(), &hashword],
        )
        .await?;
        Ok(())
    }

    async fn credentials(&self, username: &str) -> Result<Option<(Member, String)>, StoreError> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT ",
                    MEMBER,
                    ", hashword FROM ",
                    USERS,
                    " WHERE username = $1"
                ),
                &[&username],
            )
            .await?
            .map(|row| {
                let hashword = row.get::<_, String>(8);
                (Member::from(row), hashword)
            }))
    }

    async fn find(&self, username: &str) -> Result<Option<Member>, StoreError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT ", MEMBER, " FROM ", USERS, " WHERE username = $1"),
                &[&username],
            )
            .await?
            .map(Member::from))
    }

    async fn resolve(&self, username: &str) -> Result<Option<ID<Member>>, StoreError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT id FROM ", USERS, " WHERE username = $1"),
                &[&username],
            )
            .await?
            .map(|row| ID::from(row.get::<_, uuid::Uuid>(0))))
    }

    async fn everyone(&self) -> Result<Vec<Member>, StoreError> {
        Ok(self
            .query(
                const_format::concatcp!("SELECT ", MEMBER, " FROM ", USERS, " ORDER BY id DESC"),
                &[],
            )
            .await?
            .into_iter()
            .map(Member::from)
            .collect())
    }

    async fn set_link(
        &self,
        username: &str,
        platform: Platform,
        handle: Option<&str>,
    ) -> Result<u64, StoreError> {
        let sql = match platform {
            Platform::Twitch => const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET twitch_username = $2 WHERE username = $1"
            ),
            Platform::Discord => const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET discord_username = $2 WHERE username = $1"
            ),
            Platform::Instagram => const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET instagram_handle = $2 WHERE username = $1"
            ),
            Platform::Youtube => const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET youtube_channel = $2 WHERE username = $1"
            ),
        };
        Ok(self.execute(sql, &[&username, &handle]).await?)
    }

    async fn set_privacy(&self, username: &str, private: bool) -> Result<u64, StoreError> {
        Ok(self
            .execute(
                const_format::concatcp!("UPDATE ", USERS, " SET is_private = $2 WHERE username = $1"),
                &[&username, &private],
            )
            .await?)
    }

    async fn add_game(&self, username: &str, game: &str) -> Result<u64, StoreError> {
        Ok(self
            .execute(
                const_format::concatcp!(
                    "UPDATE ",
                    USERS,
                    " SET connected_games = array_append(connected_games, $2::TEXT)",
                    " WHERE username = $1 AND NOT ($2::TEXT = ANY(connected_games))"
                ),
                &[&username, &game],
            )
            .await?)
    }

    async fn remove_game(&self, username: &str, game: &str) -> Result<u64, StoreError> {
        Ok(self
            .execute(
                const_format::concatcp!(
                    "UPDATE ",
                    USERS,
                    " SET connected_games = array_remove(connected_games, $2::TEXT)",
                    " WHERE username = $1 AND $2::TEXT = ANY(connected_games)"
                ),
                &[&username, &game],
            )
            .await?)
    }

    async fn search_games(&self, query: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT DISTINCT game FROM ",
                    USERS,
                    ", unnest(connected_games) AS game",
                    " WHERE strpos(lower(game), lower($1)) > 0",
                    " ORDER BY game LIMIT $2"
                ),
                &[&query, &(limit as i64)],
            )
            .await?
            .into_iter()
            .map(|row| row.get::<_, String>(0))
            .collect())
    }
}

impl Graph for Arc<Client> {
    async fn has_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<bool, StoreError> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT 1 FROM ",
                    FOLLOWERS,
                    " WHERE follower_id = $1 AND following_id = $2"
                ),
                &[&follower.inner(), &following.inner()],
            )
            .await?
            .is_some())
    }

    async fn add_edge(&self, edge: &Follow) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                FOLLOWERS,
                " (follower_id, following_id, created_at) VALUES ($1, $2, $3)"
            ),
            &[
                &edge.follower().inner(),
                &edge.following().inner(),
                &edge.created_at(),
            ],
        )
        .await?;
        Ok(())
    }

    async fn remove_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<u64, StoreError> {
        Ok(self
            .execute(
                const_format::concatcp!(
                    "DELETE FROM ",
                    FOLLOWERS,
                    " WHERE follower_id = $1 AND following_id = $2"
                ),
                &[&follower.inner(), &following.inner()],
            )
            .await?)
    }

    async fn count_followers(&self, user: ID<Member>) -> Result<i64, StoreError> {
        Ok(self
            .query_one(
                const_format::concatcp!("SELECT COUNT(*) FROM ", FOLLOWERS, " WHERE following_id = $1"),
                &[&user.inner()],
            )
            .await?
            .get::<_, i64>(0))
    }

    async fn count_following(&self, user: ID<Member>) -> Result<i64, StoreError> {
        Ok(self
            .query_one(
                const_format::concatcp!("SELECT COUNT(*) FROM ", FOLLOWERS, " WHERE follower_id = $1"),
                &[&user.inner()],
            )
            .await?
            .get::<_, i64>(0))
    }
}
