//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `KeyValueStore`
//! trait defined in `eventbook_core::storage`. The runtime backend is
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local store, lost on restart
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time. The in-memory store is always compiled so tests can
//! run against it.
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p eventbook
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p eventbook --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p eventbook --features inmemory"
);

#[cfg_attr(feature = "dynamodb", allow(dead_code))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
