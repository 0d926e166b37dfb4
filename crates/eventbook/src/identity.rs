//! Resolution of inbound credentials to users.

use eventbook_core::auth::decode_credential;
use eventbook_core::user::{User, UserError};

use crate::logging::Logger;
use crate::users::UserRepository;

/// Turns the opaque credential of a request into the acting user.
#[derive(Clone)]
pub struct IdentityResolver {
    users: UserRepository,
    log: Logger,
}

impl IdentityResolver {
    pub fn new(users: UserRepository, log: Logger) -> Self {
        Self { users, log }
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// Resolves a raw credential.
    ///
    /// A missing or malformed credential yields `Ok(None)` and the request
    /// proceeds anonymously. A valid one is found-or-created in the store;
    /// store failures propagate.
    pub async fn resolve(&self, raw: Option<&str>) -> Result<Option<User>, UserError> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let Some(identity) = decode_credential(raw) else {
            tracing::debug!(parent: self.log.span(), "ignoring malformed credential");
            return Ok(None);
        };

        self.users.find_or_create(identity.as_str()).await.map(Some)
    }
}
