use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use common::metrics::REPORT_STAMP_FAILURES_TOTAL;
use models::report;

use crate::domain::{now, ReportInput};
use crate::errors::ServiceError;
use crate::repository::ReportRepository;
use crate::student_directory::StudentDirectory;

/// Immutable billing reports plus the student `reportGenerated` stamp.
#[derive(Clone)]
pub struct ReportWorkflow {
    reports: Arc<dyn ReportRepository>,
    students: StudentDirectory,
}

impl ReportWorkflow {
    pub fn new(reports: Arc<dyn ReportRepository>, students: StudentDirectory) -> Self {
        Self { reports, students }
    }

    /// Persist the report, then try to stamp the student it was generated for.
    ///
    /// Only the report insert can fail the call; the stamp is best-effort.
    #[instrument(skip(self, input), fields(phone = ?input.phone))]
    pub async fn generate(&self, input: ReportInput) -> Result<report::Model, ServiceError> {
        let generated_at = now();
        let phone = input.phone.clone();
        let created = self.reports.insert(input.into_record(generated_at)).await?;
        info!(record_id = %created.record_id, "report_generated");

        if let Some(phone) = phone {
            match self.students.mark_report_generated(&phone, generated_at).await {
                Ok(true) => debug!("student stamped"),
                Ok(false) => debug!("no student with this phone to stamp"),
                Err(e) => {
                    REPORT_STAMP_FAILURES_TOTAL.inc();
                    warn!(error = %e, record_id = %created.record_id, "report_stamp_failed");
                }
            }
        }
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<report::Model>, ServiceError> {
        self.reports.list().await
    }
}
