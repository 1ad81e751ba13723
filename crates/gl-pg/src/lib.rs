//! PostgreSQL integration.
//!
//! Connectivity, DDL metadata, and the error type shared by every
//! repository in the workspace.
//!
//! ## Connectivity
//!
//! - [`db()`] - Establishes a database connection from a URL
//! - [`create()`] - Applies a [`Schema`] (table + indices) idempotently
//!
//! ## Errors
//!
//! - [`StoreError`] - Unique-constraint violations surface as
//!   [`StoreError::Conflict`], everything else as [`StoreError::Database`]
//!
//! ## Table Names
//!
//! Constants for all persistent entities: users and follow edges.
mod error;
mod schema;

pub use error::*;
pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across request handlers.
/// The connection task is spawned onto the current runtime and logs
/// when it terminates with an error.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Creates the table and indices described by `S` if they are missing.
pub async fn create<S: Schema>(client: &Client) -> Result<(), PgErr> {
    log::info!("creating table ({})", S::name());
    client.batch_execute(S::creates()).await?;
    log::info!("indexing table ({})", S::name());
    client.batch_execute(S::indices()).await?;
    Ok(())
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:     &str = "users";
/// Table for directed follow edges.
#[rustfmt::skip]
pub const FOLLOWERS: &str = "followers";
