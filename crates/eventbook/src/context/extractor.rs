//! Axum extractor for RequestContext.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use super::types::{RequestContext, RequestId};
use crate::handlers::error::AppError;
use crate::identity::IdentityResolver;

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.trim().is_empty())
}

impl<S> FromRequestParts<S> for RequestContext
where
    IdentityResolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = extract_request_id(&parts.headers);
        let resolver = IdentityResolver::from_ref(state);

        let user = resolver
            .resolve(extract_credential(&parts.headers))
            .await
            .map_err(|e| AppError::new(resolver.log(), request_id, e.into()))?;

        Ok(RequestContext { request_id, user })
    }
}
