use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::HttpResponse;
use actix_web::error::InternalError;
use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use std::future::Ready;

/// Extractor for authenticated requests.
/// Rejects with 401 before the handler runs when the bearer token
/// is missing or fails validation.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn username(&self) -> &str {
        self.0.username()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(authenticate(req).map(Auth))
    }
}

/// Optional authentication extractor - does not fail if unauthenticated.
/// An invalid token is treated the same as no token.
pub struct MaybeAuth(pub Option<Claims>);

impl MaybeAuth {
    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }
    pub fn username(&self) -> Option<&str> {
        self.0.as_ref().map(|c| c.username())
    }
}

impl FromRequest for MaybeAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(Ok(MaybeAuth(authenticate(req).ok())))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Claims, actix_web::Error> {
    let crypto = req
        .app_data::<web::Data<Crypto>>()
        .ok_or_else(|| reject(HttpResponse::InternalServerError(), "internal server error"))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| reject(HttpResponse::Unauthorized(), "Authentication required"))?
        .to_str()
        .map_err(|_| reject(HttpResponse::Unauthorized(), "Invalid token"))?;
    crypto
        .validate(bearer(header))
        .inspect_err(|e| log::debug!("rejected bearer token: {}", e))
        .map_err(|_| reject(HttpResponse::Unauthorized(), "Invalid token"))
}

/// Rejection carrying the same `{"error": ...}` body as handler errors.
fn reject(mut status: actix_web::HttpResponseBuilder, error: &'static str) -> actix_web::Error {
    #[derive(serde::Serialize)]
    struct Body {
        error: &'static str,
    }
    InternalError::from_response(error, status.json(Body { error })).into()
}
