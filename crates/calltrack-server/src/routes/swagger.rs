//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.
//! Every documented body is wrapped in `{ data, success, error }`.

use utoipa::OpenApi;

use crate::models::{
    CallResponse, CreateCallRequest, DashboardResponse, OutcomeCountResponse, UpdateCallRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Call endpoints
        super::call::list_calls,
        super::call::create_call,
        super::call::get_call,
        super::call::update_call,
        super::call::delete_call,
        // Dashboard endpoints
        super::dashboard::get_dashboard,
    ),
    info(
        title = "Calltrack API",
        version = "0.1.0",
        description = "Sales call tracking - list, search, record and review calls.\n\nResponses are wrapped in `{ data, success, error }`.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Call", description = "Call - Sales call records"),
        (name = "Dashboard", description = "Dashboard - Aggregate figures"),
    ),
    components(
        schemas(
            CallResponse,
            CreateCallRequest,
            UpdateCallRequest,
            DashboardResponse,
            OutcomeCountResponse,
        )
    ),
)]
pub struct ApiDoc;
