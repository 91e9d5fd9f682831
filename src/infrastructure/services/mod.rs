//! Infrastructure services

mod draft_variable_service;

pub use draft_variable_service::{DraftVariableService, ResetOutcome, UpdateVariableRequest};
