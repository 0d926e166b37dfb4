use thiserror::Error;

use crate::event::EventSourceError;
use crate::storage::StoreError;
use crate::user::UserError;

/// Errors surfaced by the query/mutation façade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Upstream(#[from] EventSourceError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::User(UserError::Store(err))
    }
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::User(UserError::InvalidIdentity(_)) => "INVALID_IDENTITY",
            Self::User(UserError::InvalidEventId) => "INVALID_EVENT_ID",
            Self::User(UserError::UserNotFound(_)) => "USER_NOT_FOUND",
            Self::User(UserError::CorruptState { .. }) => "CORRUPT_STATE",
            Self::User(UserError::Store(_)) => "STORE_ERROR",
            Self::Upstream(_) => "UPSTREAM_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ApiError::Unauthenticated.code(), "UNAUTHENTICATED");
        assert_eq!(
            ApiError::from(UserError::InvalidEventId).code(),
            "INVALID_EVENT_ID"
        );
        assert_eq!(
            ApiError::from(StoreError::QueryFailed("x".to_string())).code(),
            "STORE_ERROR"
        );
        assert_eq!(
            ApiError::from(EventSourceError::Request("x".to_string())).code(),
            "UPSTREAM_ERROR"
        );
    }
}
