use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::recycle_bin;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/api/recyclebin", tag = "recyclebin",
    responses((status = 200, description = "newest deletion first", body = [crate::openapi::RecycleBinEntryDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<recycle_bin::Model>>, JsonApiError> {
    Ok(Json(state.services.recycle_bin.list().await?))
}

#[utoipa::path(post, path = "/api/recyclebin/restore/{id}", tag = "recyclebin",
    params(("id" = String, Path, description = "recycle bin entry id")),
    responses((status = 200)))]
pub async fn restore(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    state.services.recycle_bin.restore(&id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(delete, path = "/api/recyclebin/{id}", tag = "recyclebin",
    params(("id" = String, Path, description = "recycle bin entry id")),
    responses((status = 204)))]
pub async fn purge(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    state.services.recycle_bin.purge(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
