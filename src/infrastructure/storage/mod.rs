//! Storage infrastructure - backend selection, pooling, migrations and seeding

mod factory;
pub mod migrations;
mod postgres;
mod seed;

pub use factory::{Repositories, StorageType};
pub use migrations::{run_storage_migrations, storage_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::{connect_pool, PostgresConfig};
pub use seed::SeedData;
