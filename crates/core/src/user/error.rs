use thiserror::Error;

use crate::storage::StoreError;

/// Errors raised by the user repository and the saved-events manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid identity: {0:?}")]
    InvalidIdentity(String),
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Event id cannot be empty")]
    InvalidEventId,
    #[error("Corrupt state for user {identity}: {reason}")]
    CorruptState { identity: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_display() {
        assert_eq!(
            UserError::InvalidIdentity("nope".to_string()).to_string(),
            "Invalid identity: \"nope\""
        );
        assert_eq!(
            UserError::UserNotFound("a@b.com".to_string()).to_string(),
            "User not found: a@b.com"
        );
        assert_eq!(
            UserError::InvalidEventId.to_string(),
            "Event id cannot be empty"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error = UserError::from(StoreError::QueryFailed("boom".to_string()));
        assert_eq!(error.to_string(), "Query failed: boom");
    }
}
