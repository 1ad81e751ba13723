use super::*;
use jsonwebtoken::Algorithm;
use jsonwebtoken::errors::ErrorKind;

const ACCESS_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signature or algorithm mismatch")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

/// HS256 token service keyed by the process-wide secret.
///
/// Built once at startup and shared read-only between workers.
/// Expiry is checked against an explicit clock so callers can
/// validate at any instant; [`Crypto::validate`] uses the wall clock.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = jsonwebtoken::Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            validation,
        }
    }
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, now())
    }
    pub fn issue_at(&self, username: &str, now: i64) -> Result<String, TokenError> {
        self.encode(&Claims::new(username.to_owned(), now))
    }
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, now())
    }
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;
        match claims.expired(now) {
            true => Err(TokenError::Expired),
            false => Ok(claims),
        }
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS256),
            claims,
            &self.encoding,
        )
        .map_err(TokenError::Signing)
    }
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
    pub const fn duration() -> std::time::Duration {
        ACCESS_TOKEN_DURATION
    }
}

/// Strips one leading `"Bearer "` (case-sensitive). Headers without the
/// prefix are passed through unchanged and fail later as malformed tokens.
pub fn bearer(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header)
}
