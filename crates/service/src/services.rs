use crate::location_catalog::LocationCatalog;
use crate::recycle_bin::RecycleBin;
use crate::report_workflow::ReportWorkflow;
use crate::repository::Repositories;
use crate::student_directory::StudentDirectory;
use crate::transaction_ledger::TransactionLedger;

/// Every service of the `records` profile, wired over one set of repositories.
#[derive(Clone)]
pub struct RecordServices {
    pub students: StudentDirectory,
    pub locations: LocationCatalog,
    pub reports: ReportWorkflow,
    pub recycle_bin: RecycleBin,
    pub transactions: TransactionLedger,
}

impl RecordServices {
    pub fn new(repos: &Repositories) -> Self {
        let students = StudentDirectory::new(repos.students.clone());
        let recycle_bin = RecycleBin::new(repos.recycle_bin.clone(), repos.students.clone(), repos.locations.clone());
        Self {
            locations: LocationCatalog::new(repos.locations.clone(), recycle_bin.clone()),
            reports: ReportWorkflow::new(repos.reports.clone(), students.clone()),
            transactions: TransactionLedger::new(repos.transactions.clone()),
            students,
            recycle_bin,
        }
    }
}
