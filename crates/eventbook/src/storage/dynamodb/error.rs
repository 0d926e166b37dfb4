//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `eventbook_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use eventbook_core::storage::StoreError;

/// Map a transport-level SDK error to StoreError.
///
/// Returns `None` for service errors, which the per-operation mappers handle.
fn map_transport_error<E, R>(err: &SdkError<E, R>) -> Option<StoreError> {
    match err {
        SdkError::ServiceError(_) => None,
        SdkError::TimeoutError(_) => Some(StoreError::ConnectionFailed(
            "DynamoDB request timed out".to_string(),
        )),
        SdkError::DispatchFailure(_) => Some(StoreError::ConnectionFailed(
            "Could not reach DynamoDB".to_string(),
        )),
        _ => Some(StoreError::QueryFailed(
            "DynamoDB returned an unreadable response".to_string(),
        )),
    }
}

/// Map a DescribeTable SDK error to StoreError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table: &str,
) -> StoreError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    let reason = match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => "table not found".to_string(),
        DescribeTableError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        err => format!("DescribeTable failed: {:?}", err),
    };
    StoreError::SchemaLookup {
        table: table.to_string(),
        reason,
    }
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
///
/// A failed condition means an item with the same key already exists.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
    key: &str,
) -> StoreError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => StoreError::Conflict {
            table: table.to_string(),
            key: key.to_string(),
        },
        PutItemError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to StoreError.
///
/// The meaning of a failed condition depends on the update, so the caller
/// supplies the error it stands for.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    on_condition_failed: StoreError,
) -> StoreError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => on_condition_failed,
        UpdateItemError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            StoreError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("UpdateItem failed: {:?}", err)),
    }
}
