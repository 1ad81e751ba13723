use super::*;
use gl_auth::Auth;
use gl_social::Directory;
use gl_social::Graph;

pub async fn follow<S>(
    store: web::Data<S>,
    auth: Auth,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + Graph + 'static,
{
    gl_social::follow(store.get_ref(), auth.username(), &path).await?;
    log::info!("{} followed {}", auth.username(), path);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Successfully followed user" })))
}

pub async fn unfollow<S>(
    store: web::Data<S>,
    auth: Auth,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + Graph + 'static,
{
    gl_social::unfollow(store.get_ref(), auth.username(), &path).await?;
    log::info!("{} unfollowed {}", auth.username(), path);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Successfully unfollowed user" })))
}
