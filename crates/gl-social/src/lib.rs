//! Members, follow edges, and who gets to see what.
//!
//! ## Domain
//!
//! - [`Member`] - Registered user with linked handles and games
//! - [`Follow`] - Directed edge between two members
//! - [`Profile`] - Full or reduced view, decided per request
//!
//! ## Repositories
//!
//! - [`Directory`] - User records keyed by username
//! - [`Graph`] - Follow edges keyed by member id
//!
//! Implemented for `Arc<tokio_postgres::Client>` (feature `database`)
//! and for the process-local [`Memory`] store (feature `memory`).
mod directory;
mod follow;
mod graph;
mod member;
mod visibility;

pub use directory::*;
pub use follow::*;
pub use graph::*;
pub use member::*;
pub use visibility::*;

#[cfg(any(test, feature = "memory"))]
mod memory;
#[cfg(any(test, feature = "memory"))]
pub use memory::*;

#[cfg(feature = "database")]
mod postgres;
#[cfg(feature = "database")]
pub use postgres::*;
