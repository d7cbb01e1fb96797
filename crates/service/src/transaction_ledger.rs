use std::sync::Arc;

use tracing::{info, instrument};

use models::transaction;

use crate::domain::{now, TransactionInput};
use crate::errors::ServiceError;
use crate::repository::TransactionRepository;

/// Append-only payment attempts.
#[derive(Clone)]
pub struct TransactionLedger {
    repo: Arc<dyn TransactionRepository>,
}

impl TransactionLedger {
    pub fn new(repo: Arc<dyn TransactionRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(payment_id = ?input.payment_id, order_id = ?input.order_id))]
    pub async fn record(&self, input: TransactionInput) -> Result<transaction::Model, ServiceError> {
        if input.amount.is_some_and(|a| !a.is_finite()) {
            return Err(ServiceError::Validation("amount must be a finite number".into()));
        }
        let created = self.repo.insert(input.into_record(now())).await?;
        info!(record_id = %created.record_id, "transaction_recorded");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<transaction::Model>, ServiceError> {
        self.repo.list().await
    }
}
