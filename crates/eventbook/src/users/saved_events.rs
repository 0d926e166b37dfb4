//! Saved-events list management.

use eventbook_core::storage::{AppendPolicy, StoreError};
use eventbook_core::user::{
    saved_event_ids, validate_event_id, Identity, SaveOutcome, UnsaveOutcome, UserError,
    SAVED_EVENT_IDS_ATTRIBUTE,
};

use super::UserRepository;
use crate::logging::Logger;

/// Saves and unsaves event ids on user records.
///
/// Reads are strict (the user must exist) while saves create the user on
/// demand. Saving an id twice and unsaving an id that is not saved are both
/// successful no-ops, reported through the outcome.
#[derive(Clone)]
pub struct SavedEventsManager {
    users: UserRepository,
    log: Logger,
}

impl SavedEventsManager {
    pub fn new(users: UserRepository, log: Logger) -> Self {
        Self { users, log }
    }

    /// Saved event ids of an existing user, in save order.
    pub async fn get_saved_event_ids(&self, identity: &str) -> Result<Vec<String>, UserError> {
        let identity = Identity::parse(identity)?;
        let item = self
            .users
            .store()
            .get_item(self.users.table(), identity.as_str())
            .await?
            .ok_or_else(|| UserError::UserNotFound(identity.to_string()))?;

        Ok(saved_event_ids(&item, &identity)?.unwrap_or_default())
    }

    /// Appends `event_id` to the user's saved list unless it is already there.
    pub async fn save_event(&self, identity: &str, event_id: &str) -> Result<SaveOutcome, UserError> {
        let event_id = validate_event_id(event_id)?;
        let user = self.users.find_or_create(identity).await?;

        if user.has_saved(event_id) {
            tracing::debug!(
                parent: self.log.span(),
                identity = %user.identity,
                event_id = %event_id,
                "event already saved"
            );
            return Ok(SaveOutcome::DuplicateSave);
        }

        let result = self
            .users
            .store()
            .append_to_list(
                self.users.table(),
                user.identity.as_str(),
                SAVED_EVENT_IDS_ATTRIBUTE,
                &[event_id.to_string()],
                AppendPolicy::UniqueOnly,
            )
            .await;

        match result {
            Ok(_) => {
                tracing::info!(
                    parent: self.log.span(),
                    identity = %user.identity,
                    event_id = %event_id,
                    "event saved"
                );
                Ok(SaveOutcome::Saved(event_id.to_string()))
            }
            Err(StoreError::DuplicateListValue { .. }) => {
                tracing::debug!(
                    parent: self.log.span(),
                    identity = %user.identity,
                    event_id = %event_id,
                    "event saved concurrently"
                );
                Ok(SaveOutcome::DuplicateSave)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes `event_id` from the user's saved list if it is there.
    pub async fn unsave_event(
        &self,
        identity: &str,
        event_id: &str,
    ) -> Result<UnsaveOutcome, UserError> {
        let event_id = validate_event_id(event_id)?;
        let identity = Identity::parse(identity)?;
        let item = self
            .users
            .store()
            .get_item(self.users.table(), identity.as_str())
            .await?
            .ok_or_else(|| UserError::UserNotFound(identity.to_string()))?;

        let saved = saved_event_ids(&item, &identity)?.unwrap_or_default();
        if !saved.iter().any(|id| id == event_id) {
            tracing::debug!(
                parent: self.log.span(),
                identity = %identity,
                event_id = %event_id,
                "event not in saved list"
            );
            return Ok(UnsaveOutcome::NotFound);
        }

        self.users
            .store()
            .remove_from_list(
                self.users.table(),
                identity.as_str(),
                SAVED_EVENT_IDS_ATTRIBUTE,
                &[event_id.to_string()],
            )
            .await?;

        tracing::info!(
            parent: self.log.span(),
            identity = %identity,
            event_id = %event_id,
            "event removed from saved list"
        );
        Ok(UnsaveOutcome::Removed(event_id.to_string()))
    }
}
