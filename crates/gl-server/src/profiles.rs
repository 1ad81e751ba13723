use super::*;
use gl_auth::Auth;
use gl_auth::MaybeAuth;
use gl_social::Directory;
use gl_social::Graph;
use serde::Deserialize;

/// Results returned per game search.
const SEARCH_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct Search {
    #[serde(default)]
    q: String,
}

pub async fn users<S>(store: web::Data<S>) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    let members = store
        .everyone()
        .await
        .map_err(ApiError::internal("listing users"))?;
    Ok(HttpResponse::Ok().json(members))
}

/// Public profile. A bad bearer token is read as an anonymous viewer.
pub async fn profile<S>(
    store: web::Data<S>,
    viewer: MaybeAuth,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + Graph + 'static,
{
    gl_social::view(store.get_ref(), viewer.username(), &path)
        .await
        .map_err(ApiError::internal("loading profile"))?
        .map(|profile| HttpResponse::Ok().json(profile))
        .ok_or(ApiError::NotFound("User not found"))
}

pub async fn own<S>(store: web::Data<S>, auth: Auth) -> Result<HttpResponse, ApiError>
where
    S: Directory + Graph + 'static,
{
    gl_social::own(store.get_ref(), auth.username())
        .await
        .map_err(ApiError::internal("loading own profile"))?
        .map(|profile| HttpResponse::Ok().json(profile))
        .ok_or(ApiError::NotFound("User not found"))
}

pub async fn search<S>(
    store: web::Data<S>,
    query: web::Query<Search>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    if query.q.is_empty() {
        return Err(ApiError::Validation("Search query is required"));
    }
    let games = store
        .search_games(&query.q, SEARCH_LIMIT)
        .await
        .map_err(ApiError::internal("searching games"))?;
    Ok(HttpResponse::Ok().json(games))
}

pub async fn health<S>(store: web::Data<S>) -> HttpResponse
where
    S: Directory + 'static,
{
    match store
        .ping()
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" })),
        Err(_) => HttpResponse::ServiceUnavailable()
            .json(serde_json::json!({ "error": "database unavailable" })),
    }
}
