//! Raw CRUD over the four primary collections.
//!
//! Backs the `ledger` API profile: plain inserts, full listings and permanent
//! deletes by surrogate id. No upserts, no recycle bin, no audit stamping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{now, LocationInput, ReportInput, StudentPatch, TransactionInput};
use crate::errors::ServiceError;
use crate::repository::Repositories;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Students,
    Locations,
    Reports,
    Transactions,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Locations => "locations",
            Collection::Reports => "reports",
            Collection::Transactions => "transactions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ServiceError> {
    serde_json::from_value(body).map_err(|e| ServiceError::Validation(e.to_string()))
}

fn to_values<T: Serialize>(rows: Vec<T>) -> Result<Vec<Value>, ServiceError> {
    rows.into_iter().map(|r| serde_json::to_value(r).map_err(ServiceError::from)).collect()
}

#[derive(Clone)]
pub struct LedgerService {
    repos: Repositories,
}

impl LedgerService {
    pub fn new(repos: Repositories) -> Self { Self { repos } }

    #[instrument(skip(self, body), fields(collection = collection.as_str()))]
    pub async fn insert(&self, collection: Collection, body: Value) -> Result<InsertAck, ServiceError> {
        let inserted_id = match collection {
            Collection::Students => {
                let record = decode::<StudentPatch>(body)?.into_new_record();
                self.repos.students.insert(record).await?.record_id
            }
            Collection::Locations => {
                let record = decode::<LocationInput>(body)?.into_new_record();
                self.repos.locations.insert(record).await?.record_id
            }
            Collection::Reports => {
                let record = decode::<ReportInput>(body)?.into_record(now());
                self.repos.reports.insert(record).await?.record_id
            }
            Collection::Transactions => {
                let record = decode::<TransactionInput>(body)?.into_record(now());
                self.repos.transactions.insert(record).await?.record_id
            }
        };
        info!(%inserted_id, "ledger_inserted");
        Ok(InsertAck { acknowledged: true, inserted_id })
    }

    pub async fn list(&self, collection: Collection) -> Result<Vec<Value>, ServiceError> {
        match collection {
            Collection::Students => to_values(self.repos.students.list().await?),
            Collection::Locations => to_values(self.repos.locations.list().await?),
            Collection::Reports => to_values(self.repos.reports.list().await?),
            Collection::Transactions => to_values(self.repos.transactions.list().await?),
        }
    }

    /// Permanent delete. Succeeds whether or not the row existed.
    #[instrument(skip(self), fields(collection = collection.as_str()))]
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<DeleteAck, ServiceError> {
        let record_id = Uuid::parse_str(id.trim())
            .map_err(|e| ServiceError::Validation(format!("invalid id `{id}`: {e}")))?;
        let removed = match collection {
            Collection::Students => self.repos.students.delete(record_id).await?,
            Collection::Locations => self.repos.locations.delete(record_id).await?,
            Collection::Reports => self.repos.reports.delete(record_id).await?,
            Collection::Transactions => self.repos.transactions.delete(record_id).await?,
        };
        info!(%record_id, removed, "ledger_deleted");
        Ok(DeleteAck { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_list_delete_round() -> Result<(), anyhow::Error> {
        let ledger = LedgerService::new(Repositories::memory());
        let body = json!({"phone": "9000000001", "dob": "2012-03-09", "name": "Asha"});
        let first = ledger.insert(Collection::Students, body.clone()).await?;
        let second = ledger.insert(Collection::Students, body).await?;
        assert!(first.acknowledged);
        assert_ne!(first.inserted_id, second.inserted_id);

        let listed = ledger.list(Collection::Students).await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["_id"], json!(first.inserted_id.to_string()));
        assert!(listed[0]["lastUpdated"].is_null());

        let ack = ledger.delete(Collection::Students, &first.inserted_id.to_string()).await?;
        assert!(ack.success);
        assert_eq!(ledger.list(Collection::Students).await?.len(), 1);
        // deleting again is still a success
        assert!(ledger.delete(Collection::Students, &first.inserted_id.to_string()).await?.success);
        Ok(())
    }

    #[tokio::test]
    async fn stamps_creation_time_for_reports_and_transactions() -> Result<(), anyhow::Error> {
        let ledger = LedgerService::new(Repositories::memory());
        ledger.insert(Collection::Reports, json!({"phone": "1"})).await?;
        ledger.insert(Collection::Transactions, json!({"amount": 12.5})).await?;
        assert!(ledger.list(Collection::Reports).await?[0]["generatedAt"].is_string());
        assert!(ledger.list(Collection::Transactions).await?[0]["createdAt"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_input_is_an_error() {
        let ledger = LedgerService::new(Repositories::memory());
        assert!(ledger.delete(Collection::Locations, "nope").await.is_err());
        assert!(ledger.insert(Collection::Locations, json!({"fee": "cheap"})).await.is_err());
    }

    #[test]
    fn collection_names_are_lowercase() {
        let c: Collection = serde_json::from_value(json!("transactions")).unwrap();
        assert_eq!(c, Collection::Transactions);
        assert_eq!(c.as_str(), "transactions");
    }
}
