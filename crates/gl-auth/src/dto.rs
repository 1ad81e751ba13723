use serde::Deserialize;
use serde::Serialize;

/// Body of both `/register` and `/login`.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct Registered {
    pub message: &'static str,
    pub username: String,
}

#[derive(Serialize)]
pub struct LoggedIn {
    pub token: String,
    pub username: String,
    pub message: &'static str,
}

impl Credentials {
    /// Registration ignores surrounding whitespace in both fields.
    pub fn trimmed(&self) -> (&str, &str) {
        (self.username.trim(), self.password.trim())
    }
}
