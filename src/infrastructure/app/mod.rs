//! App storage implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryAppRepository;
pub use postgres_repository::PostgresAppRepository;
