//! Pure functions for mapping façade errors to HTTP status codes.

use crate::storage::store_error_to_status_code;
use crate::user::UserError;

use super::ApiError;

/// Maps an [`ApiError`] to an HTTP status code.
///
/// - `InvalidRequest`, `InvalidIdentity`, `InvalidEventId` -> 400
/// - `Unauthenticated` -> 401
/// - `UserNotFound` -> 404
/// - `CorruptState` -> 500
/// - `Store` -> see [`store_error_to_status_code`]
/// - `Upstream` -> 502
///
/// # Examples
///
/// ```
/// use eventbook_core::api::{api_error_to_status_code, ApiError};
///
/// assert_eq!(api_error_to_status_code(&ApiError::Unauthenticated), 401);
/// ```
pub fn api_error_to_status_code(error: &ApiError) -> u16 {
    match error {
        ApiError::InvalidRequest(_) => 400,
        ApiError::Unauthenticated => 401,
        ApiError::User(user_error) => match user_error {
            UserError::InvalidIdentity(_) | UserError::InvalidEventId => 400,
            UserError::UserNotFound(_) => 404,
            UserError::CorruptState { .. } => 500,
            UserError::Store(store_error) => store_error_to_status_code(store_error),
        },
        ApiError::Upstream(_) => 502,
    }
}
