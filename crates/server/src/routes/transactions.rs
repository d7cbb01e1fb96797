use axum::{extract::State, http::StatusCode, Json};
use service::domain::TransactionInput;
use models::transaction;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/api/transactions", tag = "transactions",
    responses((status = 200, body = [crate::openapi::TransactionDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<transaction::Model>>, JsonApiError> {
    Ok(Json(state.services.transactions.list().await?))
}

#[utoipa::path(post, path = "/api/transactions", tag = "transactions",
    request_body = crate::openapi::TransactionDoc,
    responses((status = 201, body = crate::openapi::TransactionDoc)))]
pub async fn record(
    State(state): State<AppState>,
    Json(input): Json<TransactionInput>,
) -> Result<(StatusCode, Json<transaction::Model>), JsonApiError> {
    let created = state.services.transactions.record(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
