//! Call Routes - Sales call management
//!
//! HTTP handlers that delegate to CallService for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{
    ApiError, ApiResponse, CallResponse, CreateCallRequest, ListCallsQuery, UpdateCallRequest,
};
use crate::AppState;

/// List calls, optionally filtered
#[utoipa::path(
    get,
    path = "/api/calls",
    params(ListCallsQuery),
    responses(
        (status = 200, description = "Matching calls, newest first", body = Vec<CallResponse>),
        (status = 400, description = "Malformed query string"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Call"
)]
pub async fn list_calls(
    State(state): State<AppState>,
    query: Result<Query<ListCallsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<CallResponse>>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()).for_list())?;

    let calls = state
        .call_service
        .list(&query.into())
        .await
        .map_err(|e| ApiError::from(e).for_list())?;

    Ok(Json(ApiResponse::ok(
        calls.into_iter().map(CallResponse::from).collect(),
    )))
}

/// Create new call
#[utoipa::path(
    post,
    path = "/api/calls",
    request_body = CreateCallRequest,
    responses(
        (status = 201, description = "Call created", body = CallResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Malformed payload or internal error")
    ),
    tag = "Call"
)]
pub async fn create_call(
    State(state): State<AppState>,
    payload: Result<Json<CreateCallRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CallResponse>>), ApiError> {
    let Json(payload) = payload
        .map_err(|e| ApiError::internal(format!("Failed to create call: {}", e.body_text())))?;

    let call = state.call_service.create(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(call.into()))))
}

/// Get call by ID
#[utoipa::path(
    get,
    path = "/api/calls/{id}",
    params(("id" = String, Path, description = "Call ID")),
    responses(
        (status = 200, description = "Call found", body = CallResponse),
        (status = 404, description = "Call not found"),
        (status = 401, description = "Missing or invalid API key")
    ),
    tag = "Call"
)]
pub async fn get_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CallResponse>>, ApiError> {
    let call = state.call_service.get(&id).await?;

    Ok(Json(ApiResponse::ok(call.into())))
}

/// Update call (partial merge, id is kept)
#[utoipa::path(
    put,
    path = "/api/calls/{id}",
    params(("id" = String, Path, description = "Call ID")),
    request_body = UpdateCallRequest,
    responses(
        (status = 200, description = "Call updated", body = CallResponse),
        (status = 400, description = "Invalid field values"),
        (status = 404, description = "Call not found"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Malformed payload or internal error")
    ),
    tag = "Call"
)]
pub async fn update_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCallRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CallResponse>>, ApiError> {
    let Json(payload) = payload
        .map_err(|e| ApiError::internal(format!("Failed to update call: {}", e.body_text())))?;

    let call = state.call_service.update(&id, payload.into()).await?;

    Ok(Json(ApiResponse::ok(call.into())))
}

/// Delete call
#[utoipa::path(
    delete,
    path = "/api/calls/{id}",
    params(("id" = String, Path, description = "Call ID")),
    responses(
        (status = 200, description = "Call deleted, body holds the removed call", body = CallResponse),
        (status = 404, description = "Call not found"),
        (status = 401, description = "Missing or invalid API key")
    ),
    tag = "Call"
)]
pub async fn delete_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CallResponse>>, ApiError> {
    let call = state.call_service.delete(&id).await?;

    Ok(Json(ApiResponse::ok(call.into())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/calls", get(list_calls).post(create_call))
        .route(
            "/api/calls/:id",
            get(get_call).put(update_call).delete(delete_call),
        )
}
