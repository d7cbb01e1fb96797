#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use configs::ApiProfile;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use server::routes::build_router;
use server::startup::build_cors;
use server::state::AppState;
use service::Repositories;

pub fn app(profile: ApiProfile) -> Router {
    build_router(AppState::new(Repositories::memory()), profile, build_cors())
}

/// Fire one request and decode the body as JSON (`Value::Null` when empty).
pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, json)
}
