//! Single-resource endpoints: get, create, update and delete.

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::{authorize, kind, not_found, unknown_request, SharedState};
use crate::mock_server::state::{MockState, JOBS};

/// 202 Accepted pointing at a job.
fn accepted(state: &MockState, job_guid: &str) -> Response {
    let location = state.url(&format!("v3/{JOBS}/{job_guid}"));
    (StatusCode::ACCEPTED, [(LOCATION, location)]).into_response()
}

/// GET /v3/{collection}/{guid}
pub async fn get_resource(
    State(state): State<SharedState>,
    Path((collection, guid)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get(&collection, &guid) {
        Some(resource) => (StatusCode::OK, Json(resource.clone())).into_response(),
        None if state.has_collection(&collection) => not_found(&collection),
        None => unknown_request(),
    }
}

/// POST /v3/{collection}
pub async fn create_resource(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if collection == JOBS || !state.has_collection(&collection) {
        return unknown_request();
    }

    let created = state.create(&collection, body);

    if state.deferred_creates.contains(&collection) {
        let job = state.complete_job(&format!("{}.create", kind(&collection)));
        return accepted(&state, &job);
    }

    (StatusCode::CREATED, Json(created)).into_response()
}

/// PATCH /v3/{collection}/{guid}
pub async fn update_resource(
    State(state): State<SharedState>,
    Path((collection, guid)): Path<(String, String)>,
    headers: HeaderMap,
    Json(patch): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if collection == JOBS {
        return unknown_request();
    }

    match state.update(&collection, &guid, patch) {
        Some(updated) => (StatusCode::OK, Json(updated)).into_response(),
        None => not_found(&collection),
    }
}

/// DELETE /v3/{collection}/{guid}
///
/// Deletes always run as a job, which is already complete when the 202 is
/// sent.
pub async fn delete_resource(
    State(state): State<SharedState>,
    Path((collection, guid)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if collection == JOBS {
        return unknown_request();
    }

    if state.remove(&collection, &guid).is_none() {
        return not_found(&collection);
    }

    let job = state.complete_job(&format!("{}.delete", kind(&collection)));
    accepted(&state, &job)
}
