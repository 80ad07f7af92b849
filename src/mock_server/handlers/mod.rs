//! HTTP request handlers for the mock server.
//!
//! One set of handlers serves every collection under `/v3/:collection`.

pub mod crud;
pub mod list;

pub use crud::*;
pub use list::*;

use std::sync::Arc;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub type SharedState = Arc<RwLock<MockState>>;

/// Build a V3 error envelope: `{"errors": [{code, title, detail}]}`.
pub(crate) fn cf_error(status: StatusCode, code: i64, title: &str, detail: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "errors": [{ "code": code, "title": title, "detail": detail }]
        })),
    )
        .into_response()
}

pub(crate) fn not_found(collection: &str) -> Response {
    cf_error(
        StatusCode::NOT_FOUND,
        10010,
        "CF-ResourceNotFound",
        &format!("{} not found", display_kind(collection)),
    )
}

pub(crate) fn unknown_request() -> Response {
    cf_error(StatusCode::NOT_FOUND, 10000, "CF-NotFound", "Unknown request")
}

/// Reject the request unless it carries the required bearer token.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(required) = state.required_token.as_deref() else {
        return Ok(());
    };

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.get(..7).filter(|p| p.eq_ignore_ascii_case("bearer ")).map(|_| &v[7..]));

    if presented == Some(required) {
        Ok(())
    } else {
        Err(cf_error(
            StatusCode::UNAUTHORIZED,
            10002,
            "CF-NotAuthenticated",
            "Authentication error",
        ))
    }
}

/// Singular resource kind for a collection, e.g. `apps` -> `app`.
pub(crate) fn kind(collection: &str) -> &str {
    collection.strip_suffix('s').unwrap_or(collection)
}

/// Human-readable kind for error details, e.g. `Service credential binding`.
fn display_kind(collection: &str) -> String {
    let words = kind(collection).replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => words,
    }
}
