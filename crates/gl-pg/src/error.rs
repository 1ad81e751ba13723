use super::PgErr;
use tokio_postgres::error::SqlState;

/// Failure of a single store statement.
///
/// Uniqueness is enforced by the store, not by the application, so a
/// duplicate insert that slipped past an existence check arrives here as
/// [`StoreError::Conflict`] and callers map it to their own domain error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[source] PgErr),
}

impl From<PgErr> for StoreError {
    fn from(e: PgErr) -> Self {
        match e.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => Self::Conflict,
            _ => Self::Database(e),
        }
    }
}
