use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use gl_social::SocialError;
use std::fmt::Display;

/// Everything a handler can answer with besides success.
/// The message is the whole client-facing body; internal causes are
/// logged where they are converted and never sent.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0}")]
    Unauthenticated(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Logs the cause under `context` and collapses it to [`ApiError::Internal`].
    pub fn internal<E: Display>(context: &'static str) -> impl FnOnce(E) -> Self {
        move |e| {
            log::error!("{}: {}", context, e);
            Self::Internal
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

impl From<SocialError> for ApiError {
    fn from(e: SocialError) -> Self {
        match e {
            SocialError::NotFound => Self::NotFound("User not found"),
            SocialError::AlreadyFollowing => Self::Validation("Already following this user"),
            SocialError::NotFollowing => Self::Validation("Not following this user"),
            SocialError::Store(e) => Self::internal("follow graph")(e),
        }
    }
}
