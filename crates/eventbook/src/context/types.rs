//! Pure types for request-scoped context.

use eventbook_core::user::User;
use uuid::Uuid;

/// Unique identifier for a request, used for tracing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request-scoped context available to all handlers.
///
/// Built once per request by the extractor and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request.
    pub request_id: RequestId,
    /// The acting user, if the request carried a valid credential.
    pub user: Option<User>,
}

#[cfg(test)]
impl RequestContext {
    /// Context of an anonymous request.
    pub fn anonymous() -> Self {
        Self {
            request_id: RequestId::new(),
            user: None,
        }
    }

    /// Context of a request made by `user`.
    pub fn for_user(user: User) -> Self {
        Self {
            request_id: RequestId::new(),
            user: Some(user),
        }
    }
}
