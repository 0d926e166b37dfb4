//! Functional core of eventbook.
//!
//! Pure types, traits and functions shared by the server: the key-value store
//! abstraction, user records and saved-event outcomes, identity credentials,
//! event listings and the operation request/response types.

pub mod api;
pub mod auth;
pub mod event;
pub mod storage;
pub mod user;
