/// Entity helper tests against an in-memory SQLite store
pub mod crud_tests;

use sea_orm::DatabaseConnection;

use crate::db::{connect_and_migrate, DatabaseConfig};

/// Fresh, fully migrated in-memory database for one test.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    connect_and_migrate(&cfg).await
}
