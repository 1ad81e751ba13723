use super::*;
use gl_auth::Auth;
use gl_social::Directory;
use gl_social::Links;
use gl_social::Platform;
use serde::Deserialize;

/// Body of every connect and disconnect call. Only the field named by
/// the route is read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(flatten)]
    links: Links,
    game_name: Option<String>,
}

impl Connection {
    /// Handles are stored without surrounding whitespace.
    fn handle(&self, platform: Platform) -> Result<&str, ApiError> {
        self.links
            .get(platform)
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ApiError::Validation("Account handle is required"))
    }
    fn game(&self) -> Result<&str, ApiError> {
        self.game_name
            .as_deref()
            .filter(|g| !g.trim().is_empty())
            .ok_or(ApiError::Validation("Game name is required"))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privacy {
    is_private: bool,
}

fn platform(path: &str) -> Result<Platform, ApiError> {
    Platform::try_from(path).map_err(|_| ApiError::NotFound("Unknown platform"))
}

fn message(text: String) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": text }))
}

/// Zero rows touched means the caller's row is gone.
fn touched(rows: u64) -> Result<(), ApiError> {
    match rows {
        0 => Err(ApiError::NotFound("User not found")),
        _ => Ok(()),
    }
}

/// Game updates touch zero rows for a no-op too, so only a missing
/// user is an error.
async fn present<S: Directory>(store: &S, username: &str, rows: u64) -> Result<(), ApiError> {
    match rows {
        0 => match store
            .taken(username)
            .await
            .map_err(ApiError::internal("checking user"))?
        {
            true => Ok(()),
            false => Err(ApiError::NotFound("User not found")),
        },
        _ => Ok(()),
    }
}

pub async fn privacy<S>(
    store: web::Data<S>,
    auth: Auth,
    body: web::Json<Privacy>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    store
        .set_privacy(auth.username(), body.is_private)
        .await
        .map_err(ApiError::internal("updating privacy"))
        .and_then(touched)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Privacy settings updated",
        "isPrivate": body.is_private,
    })))
}

pub async fn connect<S>(
    store: web::Data<S>,
    auth: Auth,
    path: web::Path<String>,
    body: web::Json<Connection>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    let platform = platform(&path)?;
    let handle = body.handle(platform)?;
    store
        .set_link(auth.username(), platform, Some(handle))
        .await
        .map_err(ApiError::internal("connecting account"))
        .and_then(touched)?;
    Ok(message(format!("{} connected successfully", platform.label())))
}

pub async fn disconnect<S>(
    store: web::Data<S>,
    auth: Auth,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    let platform = platform(&path)?;
    store
        .set_link(auth.username(), platform, None)
        .await
        .map_err(ApiError::internal("disconnecting account"))
        .and_then(touched)?;
    Ok(message(format!("{} disconnected successfully", platform.label())))
}

/// Connecting a game twice leaves a single entry.
pub async fn connect_game<S>(
    store: web::Data<S>,
    auth: Auth,
    body: web::Json<Connection>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    let game = body.game()?;
    let rows = store
        .add_game(auth.username(), game)
        .await
        .map_err(ApiError::internal("connecting game"))?;
    present(store.get_ref(), auth.username(), rows).await?;
    Ok(message(format!("Successfully connected to {}", game)))
}

pub async fn disconnect_game<S>(
    store: web::Data<S>,
    auth: Auth,
    body: web::Json<Connection>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    let game = body.game()?;
    let rows = store
        .remove_game(auth.username(), game)
        .await
        .map_err(ApiError::internal("disconnecting game"))?;
    present(store.get_ref(), auth.username(), rows).await?;
    Ok(message("Game disconnected successfully".to_owned()))
}
