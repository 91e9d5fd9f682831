//! Draft variable storage implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryDraftVariableRepository;
pub use postgres_repository::PostgresDraftVariableRepository;
