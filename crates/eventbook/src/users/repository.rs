//! User record repository over a key-value store.

use std::sync::Arc;

use eventbook_core::storage::{KeyValueStore, StoreError};
use eventbook_core::user::{item_to_user, new_user_item, Identity, User, UserError};

use crate::logging::Logger;

/// Find-or-create access to user records.
///
/// Records are keyed by identity under the table's partition key, which is
/// discovered from the store.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
    table: String,
    log: Logger,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, table: impl Into<String>, log: Logger) -> Self {
        Self {
            store,
            table: table.into(),
            log,
        }
    }

    /// Table holding the user records.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Shared store handle.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Strict lookup. Returns `None` when no record exists.
    pub async fn find(&self, identity: &Identity) -> Result<Option<User>, UserError> {
        let schema = self.store.describe_table(&self.table).await?;
        let item = self.store.get_item(&self.table, identity.as_str()).await?;

        item.map(|item| item_to_user(&item, &schema)).transpose()
    }

    /// Returns the user record for `identity`, creating it when missing.
    ///
    /// An existing record is returned untouched. A freshly created record is
    /// returned as constructed, without reading it back.
    pub async fn find_or_create(&self, identity: &str) -> Result<User, UserError> {
        let identity = Identity::parse(identity)?;

        if let Some(user) = self.find(&identity).await? {
            return Ok(user);
        }

        let schema = self.store.describe_table(&self.table).await?;
        let item = new_user_item(&identity, &schema);

        match self.store.put_item(&self.table, &item, false).await {
            Ok(()) => {
                tracing::info!(parent: self.log.span(), identity = %identity, "created user record");
                Ok(User::new(identity))
            }
            Err(StoreError::Conflict { .. }) => {
                tracing::debug!(
                    parent: self.log.span(),
                    identity = %identity,
                    "user record created concurrently, re-reading"
                );
                self.find(&identity)
                    .await?
                    .ok_or_else(|| UserError::UserNotFound(identity.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
