use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use models::recycle_bin::EntryKind;
use models::{location, recycle_bin, report, student, transaction};

use crate::errors::ServiceError;
use crate::repository::{
    LocationRepository, RecycleBinRepository, ReportRepository, StudentRepository, TransactionRepository,
};

/// In-memory store keeping each collection in insertion order.
///
/// Mirrors the SeaORM store's observable behavior (surrogate-key uniqueness,
/// first-match lookups) so services can be exercised without a database.
#[derive(Default)]
pub struct MemoryStore {
    students: RwLock<Vec<student::Model>>,
    locations: RwLock<Vec<location::Model>>,
    reports: RwLock<Vec<report::Model>>,
    transactions: RwLock<Vec<transaction::Model>>,
    recycle_bin: RwLock<Vec<recycle_bin::Model>>,
}

fn duplicate(record_id: Uuid) -> ServiceError {
    ServiceError::Db(format!("duplicate key value violates unique constraint: {record_id}"))
}

fn not_updated(record_id: Uuid) -> ServiceError {
    ServiceError::Db(format!("none of the records are updated: {record_id}"))
}

fn remove_by<T>(rows: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|r| !pred(r));
    rows.len() != before
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(self.students.read().await.clone())
    }

    async fn find_by_natural_key(&self, phone: &str, dob: NaiveDate) -> Result<Option<student::Model>, ServiceError> {
        let rows = self.students.read().await;
        Ok(rows
            .iter()
            .find(|s| s.phone.as_deref() == Some(phone) && s.dob == Some(dob))
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<student::Model>, ServiceError> {
        let rows = self.students.read().await;
        Ok(rows.iter().find(|s| s.phone.as_deref() == Some(phone)).cloned())
    }

    async fn exists(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.students.read().await.iter().any(|s| s.record_id == record_id))
    }

    async fn insert(&self, record: student::Model) -> Result<student::Model, ServiceError> {
        let mut rows = self.students.write().await;
        if rows.iter().any(|s| s.record_id == record.record_id) {
            return Err(duplicate(record.record_id));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn save(&self, record: student::Model) -> Result<student::Model, ServiceError> {
        let mut rows = self.students.write().await;
        let slot = rows
            .iter_mut()
            .find(|s| s.record_id == record.record_id)
            .ok_or_else(|| not_updated(record.record_id))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn set_report_generated(&self, phone: &str, at: DateTime<FixedOffset>) -> Result<bool, ServiceError> {
        let mut rows = self.students.write().await;
        match rows.iter_mut().find(|s| s.phone.as_deref() == Some(phone)) {
            Some(s) => {
                s.report_generated = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        let mut rows = self.students.write().await;
        Ok(remove_by(&mut rows, |s| s.record_id == record_id))
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<location::Model>, ServiceError> {
        Ok(self.locations.read().await.clone())
    }

    async fn find_by_external_id(&self, id: &str) -> Result<Option<location::Model>, ServiceError> {
        let rows = self.locations.read().await;
        Ok(rows.iter().find(|l| l.id.as_deref() == Some(id)).cloned())
    }

    async fn exists(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.locations.read().await.iter().any(|l| l.record_id == record_id))
    }

    async fn insert(&self, record: location::Model) -> Result<location::Model, ServiceError> {
        let mut rows = self.locations.write().await;
        if rows.iter().any(|l| l.record_id == record.record_id) {
            return Err(duplicate(record.record_id));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn save(&self, record: location::Model) -> Result<location::Model, ServiceError> {
        let mut rows = self.locations.write().await;
        let slot = rows
            .iter_mut()
            .find(|l| l.record_id == record.record_id)
            .ok_or_else(|| not_updated(record.record_id))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        let mut rows = self.locations.write().await;
        Ok(remove_by(&mut rows, |l| l.record_id == record_id))
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let mut rows = self.locations.write().await;
        let n = rows.len() as u64;
        rows.clear();
        Ok(n)
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<report::Model>, ServiceError> {
        Ok(self.reports.read().await.clone())
    }

    async fn insert(&self, record: report::Model) -> Result<report::Model, ServiceError> {
        let mut rows = self.reports.write().await;
        if rows.iter().any(|r| r.record_id == record.record_id) {
            return Err(duplicate(record.record_id));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        let mut rows = self.reports.write().await;
        Ok(remove_by(&mut rows, |r| r.record_id == record_id))
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<transaction::Model>, ServiceError> {
        Ok(self.transactions.read().await.clone())
    }

    async fn insert(&self, record: transaction::Model) -> Result<transaction::Model, ServiceError> {
        let mut rows = self.transactions.write().await;
        if rows.iter().any(|t| t.record_id == record.record_id) {
            return Err(duplicate(record.record_id));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        let mut rows = self.transactions.write().await;
        Ok(remove_by(&mut rows, |t| t.record_id == record_id))
    }
}

#[async_trait]
impl RecycleBinRepository for MemoryStore {
    async fn create(&self, kind: EntryKind, data: serde_json::Value) -> Result<recycle_bin::Model, ServiceError> {
        let entry = recycle_bin::Model {
            record_id: Uuid::new_v4(),
            kind,
            data,
            deleted_at: Utc::now().into(),
        };
        self.recycle_bin.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_newest_first(&self) -> Result<Vec<recycle_bin::Model>, ServiceError> {
        let mut rows = self.recycle_bin.read().await.clone();
        rows.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(rows)
    }

    async fn find(&self, record_id: Uuid) -> Result<Option<recycle_bin::Model>, ServiceError> {
        let rows = self.recycle_bin.read().await;
        Ok(rows.iter().find(|e| e.record_id == record_id).cloned())
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        let mut rows = self.recycle_bin.write().await;
        Ok(remove_by(&mut rows, |e| e.record_id == record_id))
    }
}
