//! Account domain - console users, their tenant and role

mod entity;
mod repository;

pub use entity::{Account, AccountId, AccountRole, AccountStatus, TenantId};
pub use repository::{AccountRepository, SetupRepository};
#[cfg(test)]
pub use repository::{MockAccountRepository, MockSetupRepository};
