//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Every body carries `success`; failures add a `message`
//! - "Not found" is a normal outcome mapped to 404, not an error log

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::content::ContentEnvelope;

/// Body of a successful resolution.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub success: bool,
    pub data: ContentEnvelope,
}

impl ResolveResponse {
    pub fn new(data: ContentEnvelope) -> Self {
        Self { success: true, data }
    }
}

#[derive(Debug)]
pub enum ApiError {
    MissingSlug,
    InvalidBody(String),
    NotFound,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSlug | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MissingSlug => "Slug parameter is required".to_string(),
            ApiError::InvalidBody(reason) => format!("Invalid request body: {}", reason),
            ApiError::NotFound => "Content not found".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Content resolution error");
        }
        let body = json!({ "success": false, "message": self.message() });
        (self.status(), Json(body)).into_response()
    }
}
