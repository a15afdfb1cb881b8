//! Calltrack API Server
//!
//! HTTP surface and storage adapters for the Calltrack domain library.

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use calltrack::CallRepository;

pub mod adapters;
pub mod application;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;

use application::CallService;

/// Call service over whichever repository the server was configured with
pub type AppCallService = CallService<dyn CallRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub call_service: Arc<AppCallService>,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn CallRepository>, api_key: Option<String>) -> Self {
        Self {
            call_service: Arc::new(CallService::new(repo)),
            api_key: api_key.map(Arc::from),
        }
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Calltrack API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full application router: `/api/*` behind auth, health and docs open
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(routes::call::router())
        .merge(routes::dashboard::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
