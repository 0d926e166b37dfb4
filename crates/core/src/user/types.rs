use std::fmt;

use serde::Serialize;
use validator::ValidateEmail;

use super::UserError;

/// Name of the list attribute holding a user's saved event ids.
pub const SAVED_EVENT_IDS_ATTRIBUTE: &str = "savedEventIds";

/// A validated, email-shaped user identity.
///
/// Doubles as the partition key of the user record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Parses an email-shaped identity.
    pub fn parse(value: impl Into<String>) -> Result<Self, UserError> {
        let value = value.into();
        if value.is_empty() || !value.validate_email() {
            return Err(UserError::InvalidIdentity(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "email")]
    pub identity: Identity,
    /// Saved event ids in save order. Empty when nothing was saved yet.
    pub saved_event_ids: Vec<String>,
}

impl User {
    /// Creates a user with no saved events.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            saved_event_ids: Vec::new(),
        }
    }

    pub fn has_saved(&self, event_id: &str) -> bool {
        self.saved_event_ids.iter().any(|id| id == event_id)
    }
}

/// Result of saving an event. Both variants are successful outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The event id was appended to the list.
    Saved(String),
    /// The event id was already in the list; nothing changed.
    DuplicateSave,
}

/// Result of unsaving an event. Both variants are successful outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsaveOutcome {
    /// The event id was removed from the list.
    Removed(String),
    /// The event id was not in the list; nothing changed.
    NotFound,
}
