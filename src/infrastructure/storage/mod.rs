//! Storage infrastructure - backend selection and shared helpers

mod factory;
mod in_memory;
mod postgres;

pub use factory::{Repositories, StorageConfig, StorageFactory, StorageType};
pub use in_memory::{InMemoryStore, SoftDeleteTable};
pub use postgres::{connect, PostgresConfig};
pub(crate) use postgres::{
    live, map_sqlx_error, read_error, row_to_owner, soft_delete_sql, OWNER_COLUMNS,
};
