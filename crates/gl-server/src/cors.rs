use actix_cors::Cors;
use actix_web::http::header;
use actix_web::http::header::HeaderValue;
use actix_web::http::header::InvalidHeaderValue;
use actix_web::middleware::DefaultHeaders;

/// Answers preflight requests for the one allowed origin.
pub fn cors(origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(origin)
        .allowed_methods(["GET", "POST", "OPTIONS"])
        .allowed_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .expose_headers([header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}

/// Stamps the CORS headers on every response, including ones produced
/// before a handler runs, such as auth rejections and requests sent
/// without an `Origin` header.
pub fn headers(origin: &str) -> Result<DefaultHeaders, InvalidHeaderValue> {
    Ok(DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_str(origin)?))
        .add((
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        )))
}
