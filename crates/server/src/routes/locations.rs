use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::domain::{LocationInput, UpsertOutcome};
use models::location;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/api/locations", tag = "locations",
    responses((status = 200, body = [crate::openapi::LocationDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<location::Model>>, JsonApiError> {
    Ok(Json(state.services.locations.list().await?))
}

#[utoipa::path(post, path = "/api/locations", tag = "locations",
    request_body = crate::openapi::LocationDoc,
    responses(
        (status = 201, description = "created", body = crate::openapi::LocationDoc),
        (status = 200, description = "name/fee overwritten", body = crate::openapi::LocationDoc),
    ))]
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<LocationInput>,
) -> Result<(StatusCode, Json<location::Model>), JsonApiError> {
    let res = state.services.locations.upsert(input).await?;
    let status = if res.outcome == UpsertOutcome::Created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(res.record)))
}

/// 删除前先写入回收站；id 不存在时同样返回 204
#[utoipa::path(delete, path = "/api/locations/{id}", tag = "locations",
    params(("id" = String, Path, description = "external location id")),
    responses((status = 204)))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    state.services.locations.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/locations", tag = "locations", responses((status = 204)))]
pub async fn delete_all(State(state): State<AppState>) -> Result<StatusCode, JsonApiError> {
    state.services.locations.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
