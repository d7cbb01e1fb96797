use axum::{extract::{Path, State}, Json};
use serde_json::Value;
use service::ledger::{Collection, DeleteAck, InsertAck};

use crate::errors::LedgerError;
use crate::state::AppState;

#[utoipa::path(get, path = "/{collection}", tag = "ledger",
    params(("collection" = String, Path, description = "students | locations | reports | transactions")),
    responses((status = 200, description = "every row of the collection"), (status = 500, body = crate::openapi::ErrorDoc)))]
pub async fn list(State(state): State<AppState>, Path(collection): Path<Collection>) -> Result<Json<Vec<Value>>, LedgerError> {
    Ok(Json(state.ledger.list(collection).await?))
}

#[utoipa::path(post, path = "/{collection}", tag = "ledger",
    params(("collection" = String, Path, description = "students | locations | reports | transactions")),
    responses((status = 200, body = crate::openapi::InsertAckDoc), (status = 500, body = crate::openapi::ErrorDoc)))]
pub async fn insert(
    State(state): State<AppState>,
    Path(collection): Path<Collection>,
    Json(body): Json<Value>,
) -> Result<Json<InsertAck>, LedgerError> {
    Ok(Json(state.ledger.insert(collection, body).await?))
}

#[utoipa::path(delete, path = "/{collection}/{id}", tag = "ledger",
    params(
        ("collection" = String, Path, description = "students | locations | reports | transactions"),
        ("id" = String, Path, description = "row `_id`"),
    ),
    responses((status = 200, body = crate::openapi::DeleteAckDoc), (status = 500, body = crate::openapi::ErrorDoc)))]
pub async fn delete(
    State(state): State<AppState>,
    Path((collection, id)): Path<(Collection, String)>,
) -> Result<Json<DeleteAck>, LedgerError> {
    Ok(Json(state.ledger.delete(collection, &id).await?))
}
