//! Migrator registering one table per record collection.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20241001_000001_create_student;
mod m20241001_000002_create_location;
mod m20241001_000003_create_report;
mod m20241001_000004_create_transaction;
mod m20241001_000005_create_recycle_bin;
mod m20241001_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_create_student::Migration),
            Box::new(m20241001_000002_create_location::Migration),
            Box::new(m20241001_000003_create_report::Migration),
            Box::new(m20241001_000004_create_transaction::Migration),
            Box::new(m20241001_000005_create_recycle_bin::Migration),
            // Indexes should always be applied last
            Box::new(m20241001_000010_add_indexes::Migration),
        ]
    }
}
