use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use common::metrics::RECORDS_RESTORED_TOTAL;
use models::recycle_bin::{self, EntryKind};
use models::{location, student};

use crate::errors::ServiceError;
use crate::repository::{LocationRepository, RecycleBinRepository, StudentRepository};

/// Tombstones for soft-deleted records, restorable into their collection.
#[derive(Clone)]
pub struct RecycleBin {
    bin: Arc<dyn RecycleBinRepository>,
    students: Arc<dyn StudentRepository>,
    locations: Arc<dyn LocationRepository>,
}

// 非 UUID 的 id 视为不存在
fn parse_entry_id(entry_id: &str) -> Option<Uuid> {
    Uuid::parse_str(entry_id.trim()).ok()
}

/// Split the snapshot's own `_id` out and decode the rest with a fresh one.
fn decode_snapshot<T: serde::de::DeserializeOwned>(data: &Value) -> Result<(T, Option<Uuid>), ServiceError> {
    let mut obj = data
        .as_object()
        .cloned()
        .ok_or_else(|| ServiceError::Snapshot("tombstone data is not an object".into()))?;
    let original = obj.remove("_id").and_then(|v| v.as_str().and_then(|s| Uuid::parse_str(s).ok()));
    obj.insert("_id".into(), Value::String(Uuid::new_v4().to_string()));
    let decoded = serde_json::from_value(Value::Object(obj))?;
    Ok((decoded, original))
}

impl RecycleBin {
    pub fn new(
        bin: Arc<dyn RecycleBinRepository>,
        students: Arc<dyn StudentRepository>,
        locations: Arc<dyn LocationRepository>,
    ) -> Self {
        Self { bin, students, locations }
    }

    /// Newest tombstone first.
    pub async fn list(&self) -> Result<Vec<recycle_bin::Model>, ServiceError> {
        self.bin.list_newest_first().await
    }

    /// Write a tombstone holding `data`.
    #[instrument(skip(self, data), fields(kind = kind.as_str()))]
    pub async fn move_to_bin(&self, kind: EntryKind, data: Value) -> Result<recycle_bin::Model, ServiceError> {
        let entry = self.bin.create(kind, data).await?;
        debug!(entry_id = %entry.record_id, "tombstone_written");
        Ok(entry)
    }

    /// Recreate the entity from its tombstone, then drop the tombstone.
    ///
    /// Returns the kind restored, or `None` when no such entry exists. The
    /// snapshot keeps its original `_id` unless that id is already taken.
    #[instrument(skip(self))]
    pub async fn restore(&self, entry_id: &str) -> Result<Option<EntryKind>, ServiceError> {
        let Some(id) = parse_entry_id(entry_id) else {
            debug!("malformed entry id, nothing to restore");
            return Ok(None);
        };
        let Some(entry) = self.bin.find(id).await? else {
            debug!("entry not found, nothing to restore");
            return Ok(None);
        };

        match entry.kind {
            EntryKind::Student => {
                let (mut record, original): (student::Model, _) = decode_snapshot(&entry.data)?;
                if let Some(original) = original {
                    if !self.students.exists(original).await? {
                        record.record_id = original;
                    }
                }
                self.students.insert(record).await?;
            }
            EntryKind::Location => {
                let (mut record, original): (location::Model, _) = decode_snapshot(&entry.data)?;
                if let Some(original) = original {
                    if !self.locations.exists(original).await? {
                        record.record_id = original;
                    }
                }
                self.locations.insert(record).await?;
            }
        }

        if !self.bin.delete(id).await? {
            warn!(entry_id = %id, "tombstone vanished before removal");
        }
        RECORDS_RESTORED_TOTAL.with_label_values(&[entry.kind.as_str()]).inc();
        info!(entry_id = %id, kind = entry.kind.as_str(), "record_restored");
        Ok(Some(entry.kind))
    }

    /// Drop a tombstone for good; returns whether one was removed.
    #[instrument(skip(self))]
    pub async fn purge(&self, entry_id: &str) -> Result<bool, ServiceError> {
        let Some(id) = parse_entry_id(entry_id) else {
            return Ok(false);
        };
        let removed = self.bin.delete(id).await?;
        if removed {
            info!(entry_id = %id, "tombstone_purged");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentPatch;
    use crate::repository::Repositories;

    fn bin(repos: &Repositories) -> RecycleBin {
        RecycleBin::new(repos.recycle_bin.clone(), repos.students.clone(), repos.locations.clone())
    }

    #[tokio::test]
    async fn restore_location_recreates_snapshot() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let rb = bin(&repos);
        let snapshot = location::Model {
            record_id: Uuid::new_v4(),
            id: Some("L9".into()),
            name: Some("Ridge".into()),
            fee: Some(720.0),
        };
        let entry = rb.move_to_bin(EntryKind::Location, serde_json::to_value(&snapshot)?).await?;

        let kind = rb.restore(&entry.record_id.to_string()).await?;
        assert_eq!(kind, Some(EntryKind::Location));
        assert!(rb.list().await?.is_empty());
        let locations = repos.locations.list().await?;
        assert_eq!(locations, vec![snapshot]);
        Ok(())
    }

    #[tokio::test]
    async fn restore_student_inserts_even_when_key_is_live() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let rb = bin(&repos);
        let live = StudentPatch { phone: Some("9000000001".into()), ..Default::default() }.into_new_record();
        repos.students.insert(live.clone()).await?;

        // snapshot of the same row: `_id` collides, so it gets a fresh one
        let entry = rb.move_to_bin(EntryKind::Student, serde_json::to_value(&live)?).await?;
        rb.restore(&entry.record_id.to_string()).await?;

        let students = repos.students.list().await?;
        assert_eq!(students.len(), 2);
        assert_ne!(students[0].record_id, students[1].record_id);
        assert_eq!(students[1].phone, live.phone);
        Ok(())
    }

    #[tokio::test]
    async fn restore_missing_or_malformed_is_noop() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let rb = bin(&repos);
        assert_eq!(rb.restore(&Uuid::new_v4().to_string()).await?, None);
        assert_eq!(rb.restore("definitely-not-an-id").await?, None);
        assert!(repos.locations.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_snapshot_keeps_tombstone() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let rb = bin(&repos);
        let entry = rb.move_to_bin(EntryKind::Location, serde_json::json!("not an object")).await?;
        let err = rb.restore(&entry.record_id.to_string()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Snapshot(_)));
        assert_eq!(rb.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn purge_is_idempotent() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let rb = bin(&repos);
        let entry = rb.move_to_bin(EntryKind::Location, serde_json::json!({"id": "L1"})).await?;
        let id = entry.record_id.to_string();
        assert!(rb.purge(&id).await?);
        assert!(!rb.purge(&id).await?);
        assert!(!rb.purge("garbage").await?);
        assert!(rb.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let rb = bin(&repos);
        let older = rb.move_to_bin(EntryKind::Location, serde_json::json!({"id": "A"})).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = rb.move_to_bin(EntryKind::Location, serde_json::json!({"id": "B"})).await?;
        let listed: Vec<_> = rb.list().await?.into_iter().map(|e| e.record_id).collect();
        assert_eq!(listed, vec![newer.record_id, older.record_id]);
        Ok(())
    }
}
