use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::recycle_bin::EntryKind;
use models::{location, recycle_bin, report, student, transaction};

use crate::errors::ServiceError;
use crate::repository::{
    LocationRepository, RecycleBinRepository, ReportRepository, StudentRepository, TransactionRepository,
};

/// All collections over a single pooled SeaORM connection.
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StudentRepository for SeaOrmStore {
    async fn list(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::list(&self.db).await?)
    }

    async fn find_by_natural_key(&self, phone: &str, dob: NaiveDate) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::find_by_natural_key(&self.db, phone, dob).await?)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::find_by_phone(&self.db, phone).await?)
    }

    async fn exists(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(student::find(&self.db, record_id).await?.is_some())
    }

    async fn insert(&self, record: student::Model) -> Result<student::Model, ServiceError> {
        Ok(student::insert(&self.db, record).await?)
    }

    async fn save(&self, record: student::Model) -> Result<student::Model, ServiceError> {
        Ok(student::save(&self.db, record).await?)
    }

    async fn set_report_generated(&self, phone: &str, at: DateTime<FixedOffset>) -> Result<bool, ServiceError> {
        Ok(student::set_report_generated(&self.db, phone, at).await?)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(student::delete(&self.db, record_id).await?)
    }
}

#[async_trait]
impl LocationRepository for SeaOrmStore {
    async fn list(&self) -> Result<Vec<location::Model>, ServiceError> {
        Ok(location::list(&self.db).await?)
    }

    async fn find_by_external_id(&self, id: &str) -> Result<Option<location::Model>, ServiceError> {
        Ok(location::find_by_external_id(&self.db, id).await?)
    }

    async fn exists(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(location::find(&self.db, record_id).await?.is_some())
    }

    async fn insert(&self, record: location::Model) -> Result<location::Model, ServiceError> {
        Ok(location::insert(&self.db, record).await?)
    }

    async fn save(&self, record: location::Model) -> Result<location::Model, ServiceError> {
        Ok(location::save(&self.db, record).await?)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(location::delete(&self.db, record_id).await?)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        Ok(location::delete_all(&self.db).await?)
    }
}

#[async_trait]
impl ReportRepository for SeaOrmStore {
    async fn list(&self) -> Result<Vec<report::Model>, ServiceError> {
        Ok(report::list(&self.db).await?)
    }

    async fn insert(&self, record: report::Model) -> Result<report::Model, ServiceError> {
        Ok(report::insert(&self.db, record).await?)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(report::delete(&self.db, record_id).await?)
    }
}

#[async_trait]
impl TransactionRepository for SeaOrmStore {
    async fn list(&self) -> Result<Vec<transaction::Model>, ServiceError> {
        Ok(transaction::list(&self.db).await?)
    }

    async fn insert(&self, record: transaction::Model) -> Result<transaction::Model, ServiceError> {
        Ok(transaction::insert(&self.db, record).await?)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(transaction::delete(&self.db, record_id).await?)
    }
}

#[async_trait]
impl RecycleBinRepository for SeaOrmStore {
    async fn create(&self, kind: EntryKind, data: serde_json::Value) -> Result<recycle_bin::Model, ServiceError> {
        Ok(recycle_bin::create(&self.db, kind, data).await?)
    }

    async fn list_newest_first(&self) -> Result<Vec<recycle_bin::Model>, ServiceError> {
        Ok(recycle_bin::list_newest_first(&self.db).await?)
    }

    async fn find(&self, record_id: Uuid) -> Result<Option<recycle_bin::Model>, ServiceError> {
        Ok(recycle_bin::find(&self.db, record_id).await?)
    }

    async fn delete(&self, record_id: Uuid) -> Result<bool, ServiceError> {
        Ok(recycle_bin::delete(&self.db, record_id).await?)
    }
}
