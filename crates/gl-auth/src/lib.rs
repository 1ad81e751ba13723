//! Authentication and identity tokens.
//!
//! JWT-based authentication with Argon2 password hashing. Tokens carry
//! only a username and an expiry; there is no session table and no
//! revocation, so a token is valid until it expires.
//!
//! ## Security
//!
//! - [`Hasher`] - Argon2id hashing and verification
//! - [`Crypto`] - JWT signing and verification
//! - [`Claims`] - JWT payload structure
//!
//! ## Request Gate (feature `server`)
//!
//! - [`Auth`] - Rejects requests without a valid bearer token
//! - [`MaybeAuth`] - Optional identity for public routes
mod claims;
mod crypto;
mod dto;
mod password;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use password::*;

#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use middleware::*;
