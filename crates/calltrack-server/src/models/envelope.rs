//! Response envelope and HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use calltrack::DomainError;

/// Uniform response body: `{ "data": ..., "success": bool, "error"?: "..." }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            success: true,
            error: None,
        }
    }
}

/// Failure response. `data` is `null`, or `[]` for list routes.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    data: serde_json::Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: serde_json::Value::Null,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Report `data: []` instead of `null`
    pub fn for_list(mut self) -> Self {
        self.data = serde_json::Value::Array(Vec::new());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                Self::new(StatusCode::NOT_FOUND, format!("{} not found", entity_type))
            }
            DomainError::MissingFields { .. } | DomainError::Validation(_) => {
                Self::bad_request(err.to_string())
            }
            DomainError::Conflict(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
            DomainError::Repository(_) => Self::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self.message);
        }

        let body = ApiResponse {
            data: self.data,
            success: false,
            error: Some(self.message),
        };

        (self.status, Json(body)).into_response()
    }
}
