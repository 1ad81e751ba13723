//! gamerlink HTTP server.
//!
//! Every handler is generic over its store, so the same routes run
//! against PostgreSQL in production and against
//! [`gl_social::Memory`] in tests.
//!
//! ## Submodules
//!
//! - [`accounts`] - Registration and login
//! - [`profiles`] - User listing, profiles, game search, health
//! - [`follows`] - Follow and unfollow
//! - [`links`] - Privacy and linked platforms
mod config;
mod cors;
mod error;

pub mod accounts;
pub mod follows;
pub mod links;
pub mod profiles;

pub use config::*;
pub use error::*;

use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use gl_auth::Crypto;
use gl_auth::Hasher;
use gl_social::Directory;
use gl_social::Graph;
use std::sync::Arc;
use tokio_postgres::Client;

/// Malformed or mistyped JSON bodies answer 400 with the usual error body.
fn json() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|e, _| {
        log::debug!("rejected request body: {}", e);
        ApiError::Validation("Invalid request body").into()
    })
}

/// Registers every route against store `S`.
#[rustfmt::skip]
pub fn routes<S>(cfg: &mut web::ServiceConfig)
where
    S: Directory + Graph + 'static,
{
    cfg.app_data(json())
        .route("/health",                 web::get().to(profiles::health::<S>))
        .route("/register",               web::post().to(accounts::register::<S>))
        .route("/login",                  web::post().to(accounts::login::<S>))
        .route("/users",                  web::get().to(profiles::users::<S>))
        .route("/profile",                web::get().to(profiles::own::<S>))
        .route("/profile/{username}",     web::get().to(profiles::profile::<S>))
        .route("/games/search",           web::get().to(profiles::search::<S>))
        .route("/follow/{username}",      web::post().to(follows::follow::<S>))
        .route("/unfollow/{username}",    web::post().to(follows::unfollow::<S>))
        .route("/privacy",                web::post().to(links::privacy::<S>))
        .route("/connect/game",           web::post().to(links::connect_game::<S>))
        .route("/connect/{platform}",     web::post().to(links::connect::<S>))
        .route("/disconnect/game",        web::post().to(links::disconnect_game::<S>))
        .route("/disconnect/{platform}",  web::post().to(links::disconnect::<S>));
}

/// Connects, migrates, and serves until shutdown.
pub async fn run(config: Config) -> anyhow::Result<()> {
    anyhow::ensure!(!config.jwt_secret.is_empty(), "JWT_SECRET must not be empty");
    cors::headers(&config.cors_origin)?;
    let client = gl_pg::db(&config.db_url).await?;
    gl_social::migrate(&client).await?;
    let store = web::Data::new(client);
    let crypto = web::Data::new(Crypto::new(config.jwt_secret.as_bytes()));
    let hasher = web::Data::new(Hasher::new(config.hash_cost)?);
    let origin = config.cors_origin.clone();
    log::info!("starting server on {} (origin {})", config.bind, origin);
    HttpServer::new(move || {
        App::new()
            .wrap(cors::headers(&origin).unwrap_or_default())
            .wrap(cors::cors(&origin))
            .wrap(Logger::new("%r %s %Ts"))
            .app_data(store.clone())
            .app_data(crypto.clone())
            .app_data(hasher.clone())
            .configure(routes::<Arc<Client>>)
    })
    .workers(config.workers)
    .bind(&config.bind)?
    .run()
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test;
    use gl_social::Memory;
    use serde_json::Value;
    use serde_json::json;

    const ORIGIN: &str = "http://localhost:3000";
    const SECRET: &[u8] = b"test-secret";

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .wrap(cors::headers(ORIGIN).unwrap())
                    .wrap(cors::cors(ORIGIN))
                    .app_data(web::Data::new(Memory::default()))
                    .app_data(web::Data::new(Crypto::new(SECRET)))
                    .app_data(web::Data::new(Hasher::new(1).unwrap()))
                    .configure(routes::<Memory>),
            )
            .await
        };
    }

    fn post(uri: &str, token: Option<&str>, body: Value) -> actix_http::Request {
        let req = test::TestRequest::post().uri(uri).set_json(body);
        let req = match token {
            Some(token) => req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token))),
            None => req,
        };
        req.to_request()
    }

    fn get(uri: &str, token: Option<&str>) -> actix_http::Request {
        let req = test::TestRequest::get().uri(uri);
        let req = match token {
            Some(token) => req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token))),
            None => req,
        };
        req.to_request()
    }

    fn credentials(username: &str) -> Value {
        json!({ "username": username, "password": format!("{}-password", username) })
    }

    /// Registers and logs in, returning the bearer token.
    async fn signup<S, B>(app: &S, username: &str) -> String
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        let resp = test::call_service(app, post("/register", None, credentials(username))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value =
            test::call_and_read_body_json(app, post("/login", None, credentials(username))).await;
        body["token"].as_str().unwrap().to_owned()
    }

    #[actix_web::test]
    async fn register_trims_and_rejects_duplicates() {
        let app = app!();
        let resp = test::call_service(
            &app,
            post("/register", None, json!({ "username": "  alice ", "password": " pw " })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "User created successfully", "username": "alice" }));
        let resp = test::call_service(
            &app,
            post("/register", None, json!({ "username": "alice", "password": "other" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Username already exists" }));
    }

    #[actix_web::test]
    async fn register_rejects_blank_and_malformed_bodies() {
        let app = app!();
        let blank = post("/register", None, json!({ "username": "   ", "password": "pw" }));
        assert_eq!(test::call_service(&app, blank).await.status(), StatusCode::BAD_REQUEST);
        let garbage = test::TestRequest::post()
            .uri("/register")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, garbage).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Invalid request body" }));
    }

    #[actix_web::test]
    async fn login_rejects_bad_credentials() {
        let app = app!();
        signup(&app, "alice").await;
        let wrong = post("/login", None, json!({ "username": "alice", "password": "nope" }));
        assert_eq!(test::call_service(&app, wrong).await.status(), StatusCode::UNAUTHORIZED);
        let ghost = post("/login", None, credentials("ghost"));
        let resp = test::call_service(&app, ghost).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Invalid credentials" }));
    }

    #[actix_web::test]
    async fn login_issues_a_token_for_the_user() {
        let app = app!();
        let token = signup(&app, "alice").await;
        let claims = Crypto::new(SECRET).validate(&token).unwrap();
        assert_eq!(claims.username(), "alice");
    }

    #[actix_web::test]
    async fn protected_routes_reject_with_cors_headers() {
        let app = app!();
        let resp = test::call_service(&app, get("/profile", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
        let resp = test::call_service(&app, post("/follow/bob", Some("garbage"), json!({}))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Invalid token" }));
    }

    #[actix_web::test]
    async fn preflight_is_answered() {
        let app = app!();
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/follow/alice")
            .insert_header((header::ORIGIN, ORIGIN))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn preflight_accepts_browser_headers() {
        let app = app!();
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/profile")
            .insert_header((header::ORIGIN, ORIGIN))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .insert_header((
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                "accept, authorization, content-type, origin",
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let allowed = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_lowercase();
        for name in ["accept", "authorization", "content-type", "origin"] {
            assert!(allowed.contains(name), "{} missing from {}", name, allowed);
        }
    }

    #[actix_web::test]
    async fn connected_handles_are_trimmed() {
        let app = app!();
        let alice = signup(&app, "alice").await;
        let resp = test::call_service(
            &app,
            post("/connect/twitch", Some(alice.as_str()), json!({ "twitchUsername": "  alice_tv " })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let own: Value = test::call_and_read_body_json(&app, get("/profile", Some(alice.as_str()))).await;
        assert_eq!(own["twitchUsername"], "alice_tv");
        let blank = post("/connect/twitch", Some(alice.as_str()), json!({ "twitchUsername": "   " }));
        assert_eq!(test::call_service(&app, blank).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn private_profiles_open_up_to_followers() {
        let app = app!();
        let alice = signup(&app, "alice").await;
        let bob = signup(&app, "bob").await;
        let resp = test::call_service(
            &app,
            post("/connect/twitch", Some(alice.as_str()), json!({ "twitchUsername": "alice_tv" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, post("/follow/alice", Some(bob.as_str()), json!({}))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Successfully followed user" }));

        let body: Value =
            test::call_and_read_body_json(&app, post("/privacy", Some(alice.as_str()), json!({ "isPrivate": true })))
                .await;
        assert_eq!(body, json!({ "message": "Privacy settings updated", "isPrivate": true }));

        let anonymous: Value = test::call_and_read_body_json(&app, get("/profile/alice", None)).await;
        assert_eq!(
            anonymous,
            json!({
                "username": "alice",
                "isPrivate": true,
                "followersCount": 1,
                "followingCount": 0,
                "isFollowing": false,
            })
        );
        let follower: Value =
            test::call_and_read_body_json(&app, get("/profile/alice", Some(bob.as_str()))).await;
        assert_eq!(follower["twitchUsername"], "alice_tv");
        assert_eq!(follower["isFollowing"], true);
        assert_eq!(follower["followersCount"], 1);

        let bogus: Value =
            test::call_and_read_body_json(&app, get("/profile/alice", Some("not-a-token"))).await;
        assert!(bogus.get("twitchUsername").is_none());

        let own: Value = test::call_and_read_body_json(&app, get("/profile", Some(bob.as_str()))).await;
        assert_eq!(own["username"], "bob");
        assert_eq!(own["followingCount"], 1);
        assert_eq!(own["followersCount"], 0);
    }

    #[actix_web::test]
    async fn follow_rules() {
        let app = app!();
        let bob = signup(&app, "bob").await;
        signup(&app, "alice").await;
        let follow = post("/follow/alice", Some(bob.as_str()), json!({}));
        assert_eq!(test::call_service(&app, follow).await.status(), StatusCode::OK);
        let again = post("/follow/alice", Some(bob.as_str()), json!({}));
        let resp = test::call_service(&app, again).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Already following this user" }));
        let ghost = post("/follow/ghost", Some(bob.as_str()), json!({}));
        assert_eq!(test::call_service(&app, ghost).await.status(), StatusCode::NOT_FOUND);
        let unfollow = post("/unfollow/alice", Some(bob.as_str()), json!({}));
        assert_eq!(test::call_service(&app, unfollow).await.status(), StatusCode::OK);
        let again = post("/unfollow/alice", Some(bob.as_str()), json!({}));
        assert_eq!(test::call_service(&app, again).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn games_connect_once_and_are_searchable() {
        let app = app!();
        let alice = signup(&app, "alice").await;
        let bob = signup(&app, "bob").await;
        for (token, game) in [(&alice, "Rocket League"), (&alice, "Rocket League"), (&bob, "League of Legends")] {
            let body: Value = test::call_and_read_body_json(
                &app,
                post("/connect/game", Some(token.as_str()), json!({ "gameName": game })),
            )
            .await;
            assert_eq!(body["message"], format!("Successfully connected to {}", game));
        }
        let own: Value = test::call_and_read_body_json(&app, get("/profile", Some(alice.as_str()))).await;
        assert_eq!(own["connectedGames"], json!(["Rocket League"]));

        let found: Value =
            test::call_and_read_body_json(&app, get("/games/search?q=LEAGUE", None)).await;
        assert_eq!(found, json!(["League of Legends", "Rocket League"]));
        let resp = test::call_service(&app, get("/games/search?q=", None)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = test::call_service(&app, get("/games/search", None)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::call_and_read_body_json(
            &app,
            post("/disconnect/game", Some(alice.as_str()), json!({ "gameName": "Rocket League" })),
        )
        .await;
        assert_eq!(body, json!({ "message": "Game disconnected successfully" }));
        let own: Value = test::call_and_read_body_json(&app, get("/profile", Some(alice.as_str()))).await;
        assert_eq!(own["connectedGames"], json!([]));
    }

    #[actix_web::test]
    async fn platforms_connect_and_disconnect() {
        let app = app!();
        let alice = signup(&app, "alice").await;
        let body: Value = test::call_and_read_body_json(
            &app,
            post("/connect/youtube", Some(alice.as_str()), json!({ "youtubeChannel": "alicechan" })),
        )
        .await;
        assert_eq!(body, json!({ "message": "YouTube channel connected successfully" }));
        let body: Value = test::call_and_read_body_json(
            &app,
            post("/disconnect/youtube", Some(alice.as_str()), json!({})),
        )
        .await;
        assert_eq!(body, json!({ "message": "YouTube channel disconnected successfully" }));
        let own: Value = test::call_and_read_body_json(&app, get("/profile", Some(alice.as_str()))).await;
        assert!(own.get("youtubeChannel").is_none());

        let missing = post("/connect/discord", Some(alice.as_str()), json!({ "twitchUsername": "x" }));
        assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::BAD_REQUEST);
        let unknown = post("/connect/myspace", Some(alice.as_str()), json!({}));
        assert_eq!(test::call_service(&app, unknown).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn users_are_listed_newest_first_without_passwords() {
        let app = app!();
        signup(&app, "alice").await;
        signup(&app, "bob").await;
        let users: Value = test::call_and_read_body_json(&app, get("/users", None)).await;
        let names = users
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["username"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, ["bob", "alice"]);
        assert!(users[0].get("password").is_none());
        assert!(users[0].get("hashword").is_none());
    }

    #[actix_web::test]
    async fn unknown_profile_is_not_found() {
        let app = app!();
        let resp = test::call_service(&app, get("/profile/ghost", None)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "User not found" }));
    }

    #[actix_web::test]
    async fn health_pings_the_store() {
        let app = app!();
        let body: Value = test::call_and_read_body_json(&app, get("/health", None)).await;
        assert_eq!(body, json!({ "status": "healthy" }));
    }
}
