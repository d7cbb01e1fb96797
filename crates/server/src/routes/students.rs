use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::domain::{StudentPatch, UpsertOutcome};
use models::student;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// 列出全部学生
#[utoipa::path(get, path = "/api/students", tag = "students",
    responses((status = 200, body = [crate::openapi::StudentDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    Ok(Json(state.services.students.list().await?))
}

/// 按 (phone, dob) 新建或合并
#[utoipa::path(post, path = "/api/students", tag = "students",
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 201, description = "created", body = crate::openapi::StudentDoc),
        (status = 200, description = "merged into existing", body = crate::openapi::StudentDoc),
    ))]
pub async fn upsert(
    State(state): State<AppState>,
    Json(patch): Json<StudentPatch>,
) -> Result<(StatusCode, Json<student::Model>), JsonApiError> {
    let res = state.services.students.upsert(patch).await?;
    let status = match res.outcome {
        UpsertOutcome::Created => StatusCode::CREATED,
        UpsertOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(res.record)))
}

/// 按手机号局部更新；不存在时返回 null
#[utoipa::path(put, path = "/api/students/{phone}", tag = "students",
    params(("phone" = String, Path, description = "student phone number")),
    request_body = crate::openapi::StudentDoc,
    responses((status = 200, description = "updated student, or null", body = crate::openapi::StudentDoc)))]
pub async fn update_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
    Json(patch): Json<StudentPatch>,
) -> Result<Json<Option<student::Model>>, JsonApiError> {
    Ok(Json(state.services.students.update_by_phone(&phone, patch).await?))
}
