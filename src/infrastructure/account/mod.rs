//! Account and setup storage implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::{InMemoryAccountRepository, InMemorySetupRepository};
pub use postgres_repository::{PostgresAccountRepository, PostgresSetupRepository};
