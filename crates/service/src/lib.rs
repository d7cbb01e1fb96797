//! Service layer for the bus-fee records backend.
//! - Repository traits decouple the services from the store (SeaORM or in-memory).
//! - One service per collection, plus the raw-CRUD ledger.
//! - All failures surface as [`errors::ServiceError`].

pub mod errors;
pub mod domain;
pub mod repository;
pub mod repo;
pub mod student_directory;
pub mod location_catalog;
pub mod report_workflow;
pub mod recycle_bin;
pub mod transaction_ledger;
pub mod ledger;
pub mod services;
#[cfg(test)]
pub mod test_support;

pub use repository::Repositories;
pub use services::RecordServices;
pub use ledger::LedgerService;
