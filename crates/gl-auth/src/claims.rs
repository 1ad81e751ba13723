use super::*;

/// Verified payload of an identity token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: String, now: i64) -> Self {
        Self {
            username,
            iat: now,
            exp: now + Crypto::duration().as_secs() as i64,
        }
    }
    /// Expired strictly after `exp`; the last second is still valid.
    pub fn expired(&self, now: i64) -> bool {
        now > self.exp
    }
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Seconds since the unix epoch.
pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
