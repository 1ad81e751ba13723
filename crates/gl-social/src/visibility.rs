use super::*;
use gl_core::Unique;
use gl_pg::StoreError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub followers_count: i64,
    pub following_count: i64,
}

/// How much of a profile a viewer may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Full,
    Reduced,
}

impl Visibility {
    /// Private profiles are reduced for everyone except the owner
    /// and members with an edge to them.
    pub fn decide(viewer: Option<&str>, target: &Member, following: bool) -> Self {
        match () {
            _ if viewer == Some(target.username()) => Self::Full,
            _ if !target.private() => Self::Full,
            _ if following => Self::Full,
            _ => Self::Reduced,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProfile {
    #[serde(flatten)]
    pub member: Member,
    #[serde(flatten)]
    pub counts: Counts,
    pub is_following: bool,
}

/// What a non-follower sees of a private account. Links and games are
/// not fields here at all, so they cannot leak as nulls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReducedProfile {
    pub username: String,
    pub is_private: bool,
    #[serde(flatten)]
    pub counts: Counts,
    pub is_following: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Full(FullProfile),
    Reduced(ReducedProfile),
}

impl Profile {
    pub fn new(viewer: Option<&str>, member: Member, counts: Counts, following: bool) -> Self {
        match Visibility::decide(viewer, &member, following) {
            Visibility::Full => Self::Full(FullProfile {
                member,
                counts,
                is_following: following,
            }),
            Visibility::Reduced => Self::Reduced(ReducedProfile {
                username: member.username,
                is_private: member.private,
                counts,
                is_following: following,
            }),
        }
    }
    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Full(_) => Visibility::Full,
            Self::Reduced(_) => Visibility::Reduced,
        }
    }
}

/// Profile of `username` as seen by `viewer`, decided fresh per call.
/// Any store failure fails the whole view.
pub async fn view<S>(
    store: &S,
    viewer: Option<&str>,
    username: &str,
) -> Result<Option<Profile>, StoreError>
where
    S: Directory + Graph,
{
    let Some(member) = store.find(username).await? else {
        return Ok(None);
    };
    let counts = counts(store, member.id()).await?;
    let following = match viewer {
        None => false,
        Some(viewer) => match store.resolve(viewer).await? {
            None => false,
            Some(id) => is_following(store, id, member.id()).await?,
        },
    };
    Ok(Some(Profile::new(viewer, member, counts, following)))
}

/// The caller's own profile. Unlike [`view`], a failed count lookup is
/// logged and reported as zero instead of failing the request.
pub async fn own<S>(store: &S, username: &str) -> Result<Option<FullProfile>, StoreError>
where
    S: Directory + Graph,
{
    let Some(member) = store.find(username).await? else {
        return Ok(None);
    };
    let counts = counts(store, member.id())
        .await
        .inspect_err(|e| log::error!("counting follows for {}: {}", username, e))
        .unwrap_or_default();
    Ok(Some(FullProfile {
        member,
        counts,
        is_following: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gl_core::ID;

    fn member(name: &str, private: bool) -> Member {
        let mut member = Member::new(ID::default(), name.to_owned());
        member.private = private;
        member
    }

    #[test]
    fn decision_table() {
        let public = member("alice", false);
        let private = member("alice", true);
        use Visibility::*;
        assert_eq!(Visibility::decide(None, &public, false), Full);
        assert_eq!(Visibility::decide(Some("bob"), &public, false), Full);
        assert_eq!(Visibility::decide(None, &private, false), Reduced);
        assert_eq!(Visibility::decide(Some("bob"), &private, false), Reduced);
        assert_eq!(Visibility::decide(Some("bob"), &private, true), Full);
        assert_eq!(Visibility::decide(Some("alice"), &private, false), Full);
    }

    #[test]
    fn reduced_profile_omits_links_and_games() {
        let mut alice = member("alice", true);
        alice.links.set(Platform::Twitch, Some("alice_tv".to_owned()));
        alice.games.insert("Chess".to_owned());
        let counts = Counts {
            followers_count: 3,
            following_count: 1,
        };
        let json = serde_json::to_value(Profile::new(Some("bob"), alice, counts, false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "alice",
                "isPrivate": true,
                "followersCount": 3,
                "followingCount": 1,
                "isFollowing": false,
            })
        );
    }

    #[test]
    fn full_profile_carries_everything() {
        let mut alice = member("alice", true);
        alice.links.set(Platform::Youtube, Some("alicechan".to_owned()));
        alice.games.insert("Chess".to_owned());
        let json = serde_json::to_value(Profile::new(Some("bob"), alice, Counts::default(), true))
            .unwrap();
        assert_eq!(json["youtubeChannel"], "alicechan");
        assert_eq!(json["connectedGames"], serde_json::json!(["Chess"]));
        assert_eq!(json["isFollowing"], true);
        assert_eq!(json["followersCount"], 0);
        assert!(json.get("id").is_some());
    }

    #[tokio::test]
    async fn view_follows_the_edge() {
        let store = Memory::default();
        for name in ["alice", "bob"] {
            store
                .create(&Member::new(ID::default(), name.to_owned()), "hash")
                .await
                .unwrap();
        }
        store.set_privacy("alice", true).await.unwrap();
        assert_eq!(seen(&store, None).await, Visibility::Reduced);
        assert_eq!(seen(&store, Some("bob")).await, Visibility::Reduced);
        assert_eq!(seen(&store, Some("alice")).await, Visibility::Full);
        assert_eq!(seen(&store, Some("ghost")).await, Visibility::Reduced);
        follow(&store, "bob", "alice").await.unwrap();
        assert_eq!(seen(&store, Some("bob")).await, Visibility::Full);
        store.set_privacy("alice", false).await.unwrap();
        assert_eq!(seen(&store, None).await, Visibility::Full);
    }

    async fn seen(store: &Memory, viewer: Option<&str>) -> Visibility {
        view(store, viewer, "alice")
            .await
            .unwrap()
            .unwrap()
            .visibility()
    }

    #[tokio::test]
    async fn failed_counts_only_degrade_the_own_profile() {
        let store = Faulty {
            broken: true,
            ..Faulty::default()
        };
        store
            .create(&Member::new(ID::default(), "alice".to_owned()), "hash")
            .await
            .unwrap();
        let own = own(&store, "alice").await.unwrap().unwrap();
        assert_eq!(own.counts, Counts::default());
        assert_eq!(own.member.username(), "alice");
        assert!(view(&store, Some("alice"), "alice").await.is_err());
        assert!(view(&store, None, "alice").await.is_err());
    }

    #[tokio::test]
    async fn view_of_missing_member_is_none() {
        let store = Memory::default();
        assert!(view(&store, None, "ghost").await.unwrap().is_none());
        assert!(own(&store, "ghost").await.unwrap().is_none());
    }
}
