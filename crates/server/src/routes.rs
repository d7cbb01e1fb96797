pub mod students;
pub mod locations;
pub mod reports;
pub mod recycle_bin;
pub mod transactions;
pub mod ledger;

use axum::{
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use configs::ApiProfile;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{metrics::encode_metrics, types::Health};

use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `/api/*` routes with upsert and recycle-bin semantics.
fn records_routes() -> Router<AppState> {
    Router::new()
        .route("/api/students", get(students::list).post(students::upsert))
        .route("/api/students/:phone", put(students::update_by_phone))
        .route("/api/locations", get(locations::list).post(locations::upsert).delete(locations::delete_all))
        .route("/api/locations/:id", delete(locations::delete))
        .route("/api/recyclebin", get(recycle_bin::list))
        .route("/api/recyclebin/restore/:id", post(recycle_bin::restore))
        .route("/api/recyclebin/:id", delete(recycle_bin::purge))
        .route("/api/reports", get(reports::list).post(reports::generate))
        .route("/api/transactions", get(transactions::list).post(transactions::record))
}

/// Unprefixed raw CRUD over the four collections.
fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/:collection", get(ledger::list).post(ledger::insert))
        .route("/:collection/:id", delete(ledger::delete))
}

/// Build the application router for one API profile.
pub fn build_router(state: AppState, profile: ApiProfile, cors: CorsLayer) -> Router {
    let ambient = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    let api = match profile {
        ApiProfile::Records => records_routes(),
        ApiProfile::Ledger => ledger_routes(),
    };

    ambient
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
