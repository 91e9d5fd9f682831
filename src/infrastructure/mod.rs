//! Infrastructure layer - storage backends, services and observability

pub mod account;
pub mod app;
pub mod auth;
pub mod draft_variable;
pub mod logging;
pub mod observability;
pub mod services;
pub mod storage;
pub mod workflow;
