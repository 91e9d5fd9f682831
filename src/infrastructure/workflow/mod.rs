//! Workflow storage implementations

mod in_memory_repository;
mod postgres_repository;

pub use in_memory_repository::InMemoryWorkflowRepository;
pub use postgres_repository::PostgresWorkflowRepository;
