use super::*;
use gl_core::ID;
use gl_core::Unique;
use gl_pg::StoreError;
use std::collections::BTreeMap;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Process-local store with the same uniqueness rules as the database:
/// one row per username and one edge per ordered pair.
#[derive(Debug, Default)]
pub struct Memory {
    users: RwLock<Vec<(Member, String)>>,
    edges: RwLock<BTreeMap<(ID<Member>, ID<Member>), SystemTime>>,
}

impl Memory {
    async fn update<F>(&self, username: &str, f: F) -> u64
    where
        F: FnOnce(&mut Member) -> bool,
    {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|(m, _)| m.username == username) {
            Some((member, _)) => f(member) as u64,
            None => 0,
        }
    }
}

impl Directory for Memory {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn taken(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.find(username).await?.is_some())
    }

    async fn create(&self, member: &Member, hashword: &str) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|(m, _)| m.username == member.username) {
            return Err(StoreError::Conflict);
        }
        users.push((member.clone(), hashword.to_owned()));
        Ok(())
    }

    async fn credentials(&self, username: &str) -> Result<Option<(Member, String)>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|(m, _)| m.username == username).cloned())
    }

    async fn find(&self, username: &str) -> Result<Option<Member>, StoreError> {
        Ok(self.credentials(username).await?.map(|(m, _)| m))
    }

    async fn resolve(&self, username: &str) -> Result<Option<ID<Member>>, StoreError> {
        Ok(self.find(username).await?.map(|m| m.id()))
    }

    async fn everyone(&self) -> Result<Vec<Member>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().rev().map(|(m, _)| m.clone()).collect())
    }

    async fn set_link(
        &self,
        username: &str,
        platform: Platform,
        handle: Option<&str>,
    ) -> Result<u64, StoreError> {
        let handle = handle.map(str::to_owned);
        Ok(self
            .update(username, |m| {
                m.links.set(platform, handle);
                true
            })
            .await)
    }

    async fn set_privacy(&self, username: &str, private: bool) -> Result<u64, StoreError> {
        Ok(self
            .update(username, |m| {
                m.private = private;
                true
            })
            .await)
    }

    async fn add_game(&self, username: &str, game: &str) -> Result<u64, StoreError> {
        Ok(self
            .update(username, |m| m.games.insert(game.to_owned()))
            .await)
    }

    async fn remove_game(&self, username: &str, game: &str) -> Result<u64, StoreError> {
        Ok(self.update(username, |m| m.games.remove(game)).await)
    }

    async fn search_games(&self, query: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        let query = query.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .iter()
            .flat_map(|(m, _)| m.games.iter())
            .filter(|g| g.to_lowercase().contains(&query))
            .cloned()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .take(limit)
            .collect())
    }
}

impl Graph for Memory {
    async fn has_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<bool, StoreError> {
        Ok(self.edges.read().await.contains_key(&(follower, following)))
    }

    async fn add_edge(&self, edge: &Follow) -> Result<(), StoreError> {
        let mut edges = self.edges.write().await;
        let key = (edge.follower(), edge.following());
        if edges.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        edges.insert(key, edge.created_at());
        Ok(())
    }

    async fn remove_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<u64, StoreError> {
        let mut edges = self.edges.write().await;
        Ok(edges.remove(&(follower, following)).is_some() as u64)
    }

    async fn count_followers(&self, user: ID<Member>) -> Result<i64, StoreError> {
        let edges = self.edges.read().await;
        Ok(edges.keys().filter(|(_, to)| *to == user).count() as i64)
    }

    async fn count_following(&self, user: ID<Member>) -> Result<i64, StoreError> {
        let edges = self.edges.read().await;
        Ok(edges.keys().filter(|(from, _)| *from == user).count() as i64)
    }
}

/// [`Memory`] with selected reads sabotaged: `blind` makes every edge
/// lookup miss, `broken` makes follower counts fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Faulty {
    pub(crate) inner: Memory,
    pub(crate) blind: bool,
    pub(crate) broken: bool,
}

#[cfg(test)]
impl Directory for Faulty {
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
    async fn taken(&self, username: &str) -> Result<bool, StoreError> {
        self.inner.taken(username).await
    }
    async fn create(&self, member: &Member, hashword: &str) -> Result<(), StoreError> {
        self.inner.create(member, hashword).await
    }
    async fn credentials(&self, username: &str) -> Result<Option<(Member, String)>, StoreError> {
        self.inner.credentials(username).await
    }
    async fn find(&self, username: &str) -> Result<Option<Member>, StoreError> {
        self.inner.find(username).await
    }
    async fn resolve(&self, username: &str) -> Result<Option<ID<Member>>, StoreError> {
        self.inner.resolve(username).await
    }
    async fn everyone(&self) -> Result<Vec<Member>, StoreError> {
        self.inner.everyone().await
    }
    async fn set_link(
        &self,
        username: &str,
        platform: Platform,
        handle: Option<&str>,
    ) -> Result<u64, StoreError> {
        self.inner.set_link(username, platform, handle).await
    }
    async fn set_privacy(&self, username: &str, private: bool) -> Result<u64, StoreError> {
        self.inner.set_privacy(username, private).await
    }
    async fn add_game(&self, username: &str, game: &str) -> Result<u64, StoreError> {
        self.inner.add_game(username, game).await
    }
    async fn remove_game(&self, username: &str, game: &str) -> Result<u64, StoreError> {
        self.inner.remove_game(username, game).await
    }
    async fn search_games(&self, query: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        self.inner.search_games(query, limit).await
    }
}

#[cfg(test)]
impl Graph for Faulty {
    async fn has_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<bool, StoreError> {
        match self.blind {
            true => Ok(false),
            false => self.inner.has_edge(follower, following).await,
        }
    }
    async fn add_edge(&self, edge: &Follow) -> Result<(), StoreError> {
        self.inner.add_edge(edge).await
    }
    async fn remove_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<u64, StoreError> {
        self.inner.remove_edge(follower, following).await
    }
    async fn count_followers(&self, user: ID<Member>) -> Result<i64, StoreError> {
        match self.broken {
            true => Err(StoreError::Conflict),
            false => self.inner.count_followers(user).await,
        }
    }
    async fn count_following(&self, user: ID<Member>) -> Result<i64, StoreError> {
        self.inner.count_following(user).await
    }
}
