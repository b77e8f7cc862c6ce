//! User persistence seam.
//!
//! - `repository.rs`: [`UserRepository`] trait, lookup errors, PostgreSQL implementation
//! - `memory.rs`: in-memory implementation (tests and the `test-utils` feature)

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryUserRepository;
pub use repository::{LookupError, PgUserRepository, UserRepository};
