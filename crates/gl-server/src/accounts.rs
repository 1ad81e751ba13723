use super::*;
use gl_auth::Credentials;
use gl_auth::Crypto;
use gl_auth::Hasher;
use gl_auth::LoggedIn;
use gl_auth::Registered;
use gl_core::ID;
use gl_pg::StoreError;
use gl_social::Directory;
use gl_social::Member;

pub async fn register<S>(
    store: web::Data<S>,
    hasher: web::Data<Hasher>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    let (username, password) = body.trimmed();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Username and password are required"));
    }
    if store
        .taken(username)
        .await
        .map_err(ApiError::internal("checking username"))?
    {
        return Err(ApiError::Conflict("Username already exists"));
    }
    let hashword = hasher
        .hash(password)
        .map_err(ApiError::internal("hashing password"))?;
    let member = Member::new(ID::default(), username.to_owned());
    match store.create(&member, &hashword).await {
        Ok(()) => {}
        Err(StoreError::Conflict) => return Err(ApiError::Conflict("Username already exists")),
        Err(e) => return Err(ApiError::internal("creating user")(e)),
    }
    log::info!("registered {}", username);
    Ok(HttpResponse::Created().json(Registered {
        message: "User created successfully",
        username: username.to_owned(),
    }))
}

pub async fn login<S>(
    store: web::Data<S>,
    hasher: web::Data<Hasher>,
    crypto: web::Data<Crypto>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse, ApiError>
where
    S: Directory + 'static,
{
    let Some((member, hashword)) = store
        .credentials(&body.username)
        .await
        .map_err(ApiError::internal("loading credentials"))?
    else {
        return Err(ApiError::Unauthenticated("Invalid credentials"));
    };
    if !hasher
        .verify(&hashword, &body.password)
        .map_err(ApiError::internal("verifying password"))?
    {
        return Err(ApiError::Unauthenticated("Invalid credentials"));
    }
    let token = crypto
        .issue(member.username())
        .map_err(ApiError::internal("issuing token"))?;
    Ok(HttpResponse::Ok().json(LoggedIn {
        token,
        username: member.username().to_owned(),
        message: "Login successful",
    }))
}
