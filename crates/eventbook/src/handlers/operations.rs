//! The single operation endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use eventbook_core::api::{ApiError, Operation, OperationRequest};

use crate::{context::RequestContext, gateway::Gateway, handlers::AppError};

/// POST /api - Run a named query or mutation.
///
/// Body: `{"operation": "<name>", "variables": {...}}`.
/// Responds with `{"data": ...}` or an error body.
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn run_operation(
    State(gateway): State<Gateway>,
    ctx: RequestContext,
    body: Result<Json<OperationRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = body.map_err(|e| {
        AppError::new(gateway.log(), ctx.request_id, ApiError::InvalidRequest(e.body_text()))
    })?;

    let operation = Operation::try_from(request)
        .map_err(|e| AppError::new(gateway.log(), ctx.request_id, e))?;

    let data = gateway
        .execute(&ctx, operation)
        .await
        .map_err(|e| AppError::new(gateway.log(), ctx.request_id, e))?;

    Ok(Json(json!({ "data": data })))
}
