use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use eventbook_core::api::{api_error_to_status_code, ApiError};

use crate::context::RequestId;
use crate::logging::Logger;

/// An API error bound to the request it failed.
///
/// Carries the handle of the component that rejected the request so the
/// failure is logged under its span.
#[derive(Debug)]
pub struct AppError {
    pub request_id: RequestId,
    pub error: ApiError,
    log: Logger,
}

impl AppError {
    pub fn new(log: &Logger, request_id: RequestId, error: ApiError) -> Self {
        Self {
            request_id,
            error,
            log: log.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = StatusCode::from_u16(api_error_to_status_code(&self.error))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            tracing::error!(
                parent: self.log.span(),
                request_id = %self.request_id,
                code = self.error.code(),
                error = %self.error,
                "operation failed"
            );
        } else {
            tracing::debug!(
                parent: self.log.span(),
                request_id = %self.request_id,
                code = self.error.code(),
                error = %self.error,
                "operation rejected"
            );
        }

        let body = json!({
            "error": {
                "code": self.error.code(),
                "message": self.error.to_string(),
            }
        });

        (status_code, Json(body)).into_response()
    }
}
