use thiserror::Error;

/// Errors that can occur during key-value store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Key schema lookup failed for table {table}: {reason}")]
    SchemaLookup { table: String, reason: String },
    #[error("Item already exists in {table}: {key}")]
    Conflict { table: String, key: String },
    #[error("List {attribute} of {key} in {table} already contains a value being appended")]
    DuplicateListValue {
        table: String,
        key: String,
        attribute: String,
    },
    #[error("Item {key} in {table} was modified concurrently")]
    ConcurrentModification { table: String, key: String },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
