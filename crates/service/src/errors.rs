use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("snapshot error: {0}")]
    Snapshot(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { Self::Snapshot(e.to_string()) }
}
