//! Dashboard Routes - Aggregate call figures

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use crate::models::{ApiError, ApiResponse, DashboardResponse, ListCallsQuery};
use crate::AppState;

/// Get dashboard figures, using the same filters as the call list
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(ListCallsQuery),
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 400, description = "Malformed query string"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<ListCallsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let stats = state.call_service.stats(&query.into()).await?;

    Ok(Json(ApiResponse::ok(stats.into())))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(get_dashboard))
}
