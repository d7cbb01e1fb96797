use service::{LedgerService, RecordServices, Repositories};

/// Shared handler state; cheap to clone (everything inside is `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub services: RecordServices,
    pub ledger: LedgerService,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        Self { services: RecordServices::new(&repos), ledger: LedgerService::new(repos) }
    }
}
