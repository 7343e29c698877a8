//! Storage infrastructure - PostgreSQL pool and schema migrations

mod migrations;
mod postgres;

pub use migrations::{clinic_migrations, run_migrations, Migration, PostgresMigrator};
pub use postgres::PostgresConfig;

pub(crate) use postgres::map_insert_error;
