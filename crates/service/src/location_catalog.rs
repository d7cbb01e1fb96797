use std::sync::Arc;

use tracing::{debug, info, instrument};

use common::metrics::LOCATIONS_TOMBSTONED_TOTAL;
use models::location;
use models::recycle_bin::EntryKind;

use crate::domain::{LocationInput, UpsertOutcome, Upserted};
use crate::errors::ServiceError;
use crate::recycle_bin::RecycleBin;
use crate::repository::LocationRepository;

/// Fee locations keyed on their external `id`.
#[derive(Clone)]
pub struct LocationCatalog {
    repo: Arc<dyn LocationRepository>,
    bin: RecycleBin,
}

impl LocationCatalog {
    pub fn new(repo: Arc<dyn LocationRepository>, bin: RecycleBin) -> Self { Self { repo, bin } }

    pub async fn list(&self) -> Result<Vec<location::Model>, ServiceError> {
        self.repo.list().await
    }

    /// Overwrite `name`/`fee` on the location with this `id`, or insert.
    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub async fn upsert(&self, input: LocationInput) -> Result<Upserted<location::Model>, ServiceError> {
        let existing = match input.id.as_deref() {
            Some(id) => self.repo.find_by_external_id(id).await?,
            None => None,
        };
        let upserted = match existing {
            Some(mut record) => {
                input.patch().apply_to(&mut record);
                let record = self.repo.save(record).await?;
                Upserted { record, outcome: UpsertOutcome::Updated }
            }
            None => {
                let record = self.repo.insert(input.into_new_record()).await?;
                Upserted { record, outcome: UpsertOutcome::Created }
            }
        };
        info!(record_id = %upserted.record.record_id, outcome = upserted.outcome.as_str(), "location_upserted");
        Ok(upserted)
    }

    /// Move the location into the recycle bin. Returns whether one existed.
    ///
    /// The tombstone is written first; if that fails the location stays put.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let Some(found) = self.repo.find_by_external_id(id).await? else {
            debug!("no location with this id");
            return Ok(false);
        };
        let snapshot = serde_json::to_value(&found)?;
        let entry = self.bin.move_to_bin(EntryKind::Location, snapshot).await?;
        self.repo.delete(found.record_id).await?;
        LOCATIONS_TOMBSTONED_TOTAL.inc();
        info!(record_id = %found.record_id, entry_id = %entry.record_id, "location_tombstoned");
        Ok(true)
    }

    /// Remove every location without tombstones.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        let n = self.repo.delete_all().await?;
        info!(removed = n, "locations_cleared");
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repositories;

    fn catalog(repos: &Repositories) -> (LocationCatalog, RecycleBin) {
        let bin = RecycleBin::new(repos.recycle_bin.clone(), repos.students.clone(), repos.locations.clone());
        (LocationCatalog::new(repos.locations.clone(), bin.clone()), bin)
    }

    fn input(id: &str, name: &str, fee: f64) -> LocationInput {
        LocationInput { id: Some(id.into()), name: Some(name.into()), fee: Some(fee) }
    }

    #[tokio::test]
    async fn upsert_same_id_renames_in_place() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let (catalog, _) = catalog(&repos);
        let first = catalog.upsert(input("L1", "Zone A", 500.0)).await?;
        assert_eq!(first.outcome, UpsertOutcome::Created);
        let second = catalog.upsert(input("L1", "Zone A Renamed", 600.0)).await?;
        assert_eq!(second.outcome, UpsertOutcome::Updated);

        let all = catalog.list().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].record_id, first.record.record_id);
        assert_eq!(all[0].name.as_deref(), Some("Zone A Renamed"));
        assert_eq!(all[0].fee, Some(600.0));
        Ok(())
    }

    #[tokio::test]
    async fn delete_moves_state_into_bin() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let (catalog, bin) = catalog(&repos);
        let kept = catalog.upsert(input("L1", "Zone A", 500.0)).await?.record;
        catalog.upsert(input("L2", "Zone B", 700.0)).await?;

        assert!(catalog.delete("L1").await?);
        assert_eq!(catalog.list().await?.len(), 1);
        let entries = bin.list().await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Location);
        assert_eq!(entries[0].data, serde_json::to_value(&kept)?);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_changes_nothing() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let (catalog, bin) = catalog(&repos);
        catalog.upsert(input("L1", "Zone A", 500.0)).await?;
        assert!(!catalog.delete("nope").await?);
        assert_eq!(catalog.list().await?.len(), 1);
        assert!(bin.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_restore_round_trips() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let (catalog, bin) = catalog(&repos);
        let original = catalog.upsert(input("L1", "Zone A", 500.0)).await?.record;
        catalog.delete("L1").await?;
        let entry = bin.list().await?.remove(0);
        bin.restore(&entry.record_id.to_string()).await?;
        assert_eq!(catalog.list().await?, vec![original]);
        assert!(bin.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_bypasses_bin() -> Result<(), anyhow::Error> {
        let repos = Repositories::memory();
        let (catalog, bin) = catalog(&repos);
        catalog.upsert(input("L1", "Zone A", 500.0)).await?;
        catalog.upsert(input("L2", "Zone B", 700.0)).await?;
        assert_eq!(catalog.delete_all().await?, 2);
        assert!(catalog.list().await?.is_empty());
        assert!(bin.list().await?.is_empty());
        Ok(())
    }
}
