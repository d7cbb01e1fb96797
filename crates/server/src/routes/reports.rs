use axum::{extract::State, http::StatusCode, Json};
use service::domain::ReportInput;
use models::report;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// 生成报告，并尽力更新学生的 reportGenerated
#[utoipa::path(post, path = "/api/reports", tag = "reports",
    request_body = crate::openapi::ReportDoc,
    responses((status = 201, body = crate::openapi::ReportDoc)))]
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<ReportInput>,
) -> Result<(StatusCode, Json<report::Model>), JsonApiError> {
    let created = state.services.reports.generate(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/reports", tag = "reports",
    responses((status = 200, body = [crate::openapi::ReportDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<report::Model>>, JsonApiError> {
    Ok(Json(state.services.reports.list().await?))
}
