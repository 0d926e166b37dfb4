//! Pure functions for mapping store errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `Conflict` -> 409 (Conflict)
/// - `DuplicateListValue` -> 409 (Conflict)
/// - `ConcurrentModification` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - everything else -> 500 (Internal Server Error)
///
/// `InvalidData` is raised for stored items the backend cannot handle, never
/// for client input, so it falls in the 500 group.
///
/// # Examples
///
/// ```
/// use eventbook_core::storage::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::ConnectionFailed("timeout".to_string());
/// assert_eq!(store_error_to_status_code(&error), 503);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::Conflict { .. }
        | StoreError::DuplicateListValue { .. }
        | StoreError::ConcurrentModification { .. } => 409,
        StoreError::ConnectionFailed(_) => 503,
        StoreError::SchemaLookup { .. }
        | StoreError::InvalidData(_)
        | StoreError::QueryFailed(_)
        | StoreError::Serialization(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_409() {
        let error = StoreError::Conflict {
            table: "users".to_string(),
            key: "a@b.com".to_string(),
        };
        assert_eq!(store_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_concurrent_modification_maps_to_409() {
        let error = StoreError::ConcurrentModification {
            table: "users".to_string(),
            key: "a@b.com".to_string(),
        };
        assert_eq!(store_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = StoreError::ConnectionFailed("dns failure".to_string());
        assert_eq!(store_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_schema_lookup_maps_to_500() {
        let error = StoreError::SchemaLookup {
            table: "users".to_string(),
            reason: "no hash key".to_string(),
        };
        assert_eq!(store_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = StoreError::QueryFailed("throughput exceeded".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_invalid_data_maps_to_500() {
        let error = StoreError::InvalidData("unsupported attribute type".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }
}
