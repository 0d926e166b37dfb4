//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the `KeyValueStore`
//! trait. It is the default backend for local development and the one every
//! test runs against.
//!
//! # Example
//!
//! ```rust,ignore
//! use eventbook::storage::inmemory::InMemoryStore;
//! use eventbook_core::storage::KeySchema;
//!
//! let store = InMemoryStore::with_table("users", KeySchema::new("email"));
//! ```

mod store;

pub use store::InMemoryStore;
