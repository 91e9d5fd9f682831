//! App domain - the workflow apps that own draft variables

mod entity;
mod repository;

pub use entity::{App, AppId, AppMode};
pub use repository::AppRepository;
#[cfg(test)]
pub use repository::MockAppRepository;
