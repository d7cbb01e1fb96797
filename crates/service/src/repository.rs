//! Repository abstractions, one per record collection.
//!
//! Services only ever talk to these traits; the concrete store is chosen once
//! at startup and injected through [`Repositories`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::recycle_bin::EntryKind;
use models::{location, recycle_bin, report, student, transaction};

use crate::errors::ServiceError;
use crate::repo::{memory::MemoryStore, seaorm::SeaOrmStore};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn find_by_natural_key(&self, phone: &str, dob: NaiveDate) -> Result<Option<student::Model>, ServiceError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<student::Model>, ServiceError>;
    async fn exists(&self, record_id: Uuid) -> Result<bool, ServiceError>;
    async fn insert(&self, record: student::Model) -> Result<student::Model, ServiceError>;
    async fn save(&self, record: student::Model) -> Result<student::Model, ServiceError>;
    async fn set_report_generated(&self, phone: &str, at: DateTime<FixedOffset>) -> Result<bool, ServiceError>;
    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<location::Model>, ServiceError>;
    async fn find_by_external_id(&self, id: &str) -> Result<Option<location::Model>, ServiceError>;
    async fn exists(&self, record_id: Uuid) -> Result<bool, ServiceError>;
    async fn insert(&self, record: location::Model) -> Result<location::Model, ServiceError>;
    async fn save(&self, record: location::Model) -> Result<location::Model, ServiceError>;
    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<report::Model>, ServiceError>;
    async fn insert(&self, record: report::Model) -> Result<report::Model, ServiceError>;
    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<transaction::Model>, ServiceError>;
    async fn insert(&self, record: transaction::Model) -> Result<transaction::Model, ServiceError>;
    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait RecycleBinRepository: Send + Sync {
    async fn create(&self, kind: EntryKind, data: serde_json::Value) -> Result<recycle_bin::Model, ServiceError>;
    /// All tombstones, most recently deleted first.
    async fn list_newest_first(&self) -> Result<Vec<recycle_bin::Model>, ServiceError>;
    async fn find(&self, record_id: Uuid) -> Result<Option<recycle_bin::Model>, ServiceError>;
    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError>;
}

/// The store handle shared by every request.
#[derive(Clone)]
pub struct Repositories {
    pub students: Arc<dyn StudentRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub recycle_bin: Arc<dyn RecycleBinRepository>,
}

impl Repositories {
    /// SeaORM-backed repositories over one pooled connection.
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self::from_store(Arc::new(SeaOrmStore { db }))
    }

    /// Process-local store, used by tests and doc examples.
    pub fn memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::default()))
    }

    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: StudentRepository
            + LocationRepository
            + ReportRepository
            + TransactionRepository
            + RecycleBinRepository
            + 'static,
    {
        Self {
            students: store.clone(),
            locations: store.clone(),
            reports: store.clone(),
            transactions: store.clone(),
            recycle_bin: store,
        }
    }
}
