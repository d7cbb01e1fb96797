use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, instrument};

use common::metrics::STUDENTS_UPSERTED_TOTAL;
use models::student;

use crate::domain::{now, StudentPatch, UpsertOutcome, Upserted};
use crate::errors::ServiceError;
use crate::repository::StudentRepository;

/// Student profiles keyed on `(phone, dob)`.
#[derive(Clone)]
pub struct StudentDirectory {
    repo: Arc<dyn StudentRepository>,
}

impl StudentDirectory {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<student::Model>, ServiceError> {
        self.repo.list().await
    }

    /// Merge into the record matching `(phone, dob)`, or insert a new one.
    ///
    /// # Examples
    /// ```
    /// use service::domain::{StudentPatch, UpsertOutcome};
    /// use service::repository::Repositories;
    /// use service::student_directory::StudentDirectory;
    /// let repos = Repositories::memory();
    /// let dir = StudentDirectory::new(repos.students.clone());
    /// let patch: StudentPatch = serde_json::from_str(r#"{"phone":"9000000001","dob":"2012-03-09","name":"Asha"}"#).unwrap();
    /// let first = tokio_test::block_on(dir.upsert(patch.clone())).unwrap();
    /// assert_eq!(first.outcome, UpsertOutcome::Created);
    /// let again = tokio_test::block_on(dir.upsert(patch)).unwrap();
    /// assert_eq!(again.outcome, UpsertOutcome::Updated);
    /// assert_eq!(tokio_test::block_on(dir.list()).unwrap().len(), 1);
    /// ```
    #[instrument(skip(self, patch), fields(phone = ?patch.phone, dob = ?patch.dob))]
    pub async fn upsert(&self, patch: StudentPatch) -> Result<Upserted<student::Model>, ServiceError> {
        let existing = match patch.natural_key() {
            Some((phone, dob)) => self.repo.find_by_natural_key(phone, dob).await?,
            None => None,
        };

        let upserted = match existing {
            Some(mut record) => {
                patch.apply_to(&mut record);
                record.last_updated = Some(now());
                let record = self.repo.save(record).await?;
                Upserted { record, outcome: UpsertOutcome::Updated }
            }
            None => {
                let mut record = patch.into_new_record();
                record.last_updated = Some(now());
                let record = self.repo.insert(record).await?;
                Upserted { record, outcome: UpsertOutcome::Created }
            }
        };

        STUDENTS_UPSERTED_TOTAL.with_label_values(&[upserted.outcome.as_str()]).inc();
        info!(record_id = %upserted.record.record_id, outcome = upserted.outcome.as_str(), "student_upserted");
        Ok(upserted)
    }

    /// Apply `patch` to the student with this phone. `None` if nobody has it.
    #[instrument(skip(self, patch))]
    pub async fn update_by_phone(&self, phone: &str, patch: StudentPatch) -> Result<Option<student::Model>, ServiceError> {
        let Some(mut record) = self.repo.find_by_phone(phone).await? else {
            debug!("no student with this phone");
            return Ok(None);
        };
        patch.apply_to(&mut record);
        record.last_updated = Some(now());
        let saved = self.repo.save(record).await?;
        info!(record_id = %saved.record_id, "student_updated");
        Ok(Some(saved))
    }

    /// Stamp `reportGenerated`; returns whether a student matched.
    #[instrument(skip(self))]
    pub async fn mark_report_generated(&self, phone: &str, at: DateTime<FixedOffset>) -> Result<bool, ServiceError> {
        self.repo.set_report_generated(phone, at).await
    }
}
