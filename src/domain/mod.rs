//! Domain layer - Core business logic and entities

pub mod account;
pub mod app;
pub mod draft_variable;
pub mod error;
pub mod workflow;

pub use error::DomainError;
