use super::*;
use gl_core::ID;
use gl_pg::StoreError;

/// Repository trait for user records.
/// Every mutation is keyed by username and reports rows affected,
/// so callers can tell a missing user from a successful write.
#[allow(async_fn_in_trait)]
pub trait Directory {
    async fn ping(&self) -> Result<(), StoreError>;
    async fn taken(&self, username: &str) -> Result<bool, StoreError>;
    /// Fails with [`StoreError::Conflict`] when the username already exists.
    async fn create(&self, member: &Member, hashword: &str) -> Result<(), StoreError>;
    /// Member together with its password hash, for login.
    async fn credentials(&self, username: &str) -> Result<Option<(Member, String)>, StoreError>;
    async fn find(&self, username: &str) -> Result<Option<Member>, StoreError>;
    async fn resolve(&self, username: &str) -> Result<Option<ID<Member>>, StoreError>;
    /// Every member, most recently registered first.
    async fn everyone(&self) -> Result<Vec<Member>, StoreError>;
    async fn set_link(
        &self,
        username: &str,
        platform: Platform,
        handle: Option<&str>,
    ) -> Result<u64, StoreError>;
    async fn set_privacy(&self, username: &str, private: bool) -> Result<u64, StoreError>;
    /// No-op (zero rows) when the game is already connected.
    async fn add_game(&self, username: &str, game: &str) -> Result<u64, StoreError>;
    async fn remove_game(&self, username: &str, game: &str) -> Result<u64, StoreError>;
    /// Distinct connected games containing `query`, case-insensitively.
    async fn search_games(&self, query: &str, limit: usize) -> Result<Vec<String>, StoreError>;
}
