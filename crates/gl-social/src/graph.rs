use super::*;
use gl_core::ID;
use gl_pg::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    #[error("user not found")]
    NotFound,
    #[error("already following this user")]
    AlreadyFollowing,
    #[error("not following this user")]
    NotFollowing,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Repository trait for follow edges.
#[allow(async_fn_in_trait)]
pub trait Graph {
    async fn has_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<bool, StoreError>;
    /// Fails with [`StoreError::Conflict`] when the edge already exists.
    async fn add_edge(&self, edge: &Follow) -> Result<(), StoreError>;
    async fn remove_edge(&self, follower: ID<Member>, following: ID<Member>) -> Result<u64, StoreError>;
    async fn count_followers(&self, user: ID<Member>) -> Result<i64, StoreError>;
    async fn count_following(&self, user: ID<Member>) -> Result<i64, StoreError>;
}

/// Adds the edge `follower -> target`.
///
/// The existence check only produces a friendlier error; two racing
/// follows both pass it, and the store's primary key rejects the loser.
pub async fn follow<S>(store: &S, follower: &str, target: &str) -> Result<Follow, SocialError>
where
    S: Directory + Graph,
{
    let (follower, following) = endpoints(store, follower, target).await?;
    if store.has_edge(follower, following).await? {
        return Err(SocialError::AlreadyFollowing);
    }
    let edge = Follow::new(follower, following);
    if edge.is_loop() {
        log::debug!("member {} follows themself", follower);
    }
    match store.add_edge(&edge).await {
        Ok(()) => Ok(edge),
        Err(StoreError::Conflict) => Err(SocialError::AlreadyFollowing),
        Err(e) => Err(e.into()),
    }
}

/// Removes the edge `follower -> target`.
pub async fn unfollow<S>(store: &S, follower: &str, target: &str) -> Result<(), SocialError>
where
    S: Directory + Graph,
{
    let (follower, following) = endpoints(store, follower, target).await?;
    match store.remove_edge(follower, following).await? {
        0 => Err(SocialError::NotFollowing),
        _ => Ok(()),
    }
}

pub async fn is_following<S>(
    store: &S,
    follower: ID<Member>,
    following: ID<Member>,
) -> Result<bool, StoreError>
where
    S: Graph,
{
    store.has_edge(follower, following).await
}

pub async fn counts<S>(store: &S, user: ID<Member>) -> Result<Counts, StoreError>
where
    S: Graph,
{
    Ok(Counts {
        followers_count: store.count_followers(user).await?,
        following_count: store.count_following(user).await?,
    })
}

async fn endpoints<S>(
    store: &S,
    follower: &str,
    target: &str,
) -> Result<(ID<Member>, ID<Member>), SocialError>
where
    S: Directory,
{
    let follower = store.resolve(follower).await?.ok_or(SocialError::NotFound)?;
    let following = store.resolve(target).await?.ok_or(SocialError::NotFound)?;
    Ok((follower, following))
}
