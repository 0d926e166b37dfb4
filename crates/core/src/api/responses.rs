use serde::Serialize;

use crate::user::{SaveOutcome, UnsaveOutcome, User};

/// Which idempotent case a mutation hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Saved,
    Duplicate,
    Removed,
    NotFound,
}

/// Response of `saveEvent` and `unsaveEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub code: u16,
    pub success: bool,
    pub message: String,
    pub outcome: MutationOutcome,
    pub event_id: String,
}

impl MutationResponse {
    pub fn from_save(outcome: &SaveOutcome, event_id: &str) -> Self {
        match outcome {
            SaveOutcome::Saved(id) => Self {
                code: 200,
                success: true,
                message: "Event saved".to_string(),
                outcome: MutationOutcome::Saved,
                event_id: id.clone(),
            },
            SaveOutcome::DuplicateSave => Self {
                code: 200,
                success: true,
                message: "Event was already saved".to_string(),
                outcome: MutationOutcome::Duplicate,
                event_id: event_id.to_string(),
            },
        }
    }

    pub fn from_unsave(outcome: &UnsaveOutcome, event_id: &str) -> Self {
        match outcome {
            UnsaveOutcome::Removed(id) => Self {
                code: 200,
                success: true,
                message: "Event removed from saved events".to_string(),
                outcome: MutationOutcome::Removed,
                event_id: id.clone(),
            },
            UnsaveOutcome::NotFound => Self {
                code: 200,
                success: true,
                message: "Event was not in saved events".to_string(),
                outcome: MutationOutcome::NotFound,
                event_id: event_id.to_string(),
            },
        }
    }
}

/// The current user as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub email: String,
    pub saved_event_ids: Vec<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            email: user.identity.to_string(),
            saved_event_ids: user.saved_event_ids.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_responses_are_distinct() {
        let saved = MutationResponse::from_save(&SaveOutcome::Saved("e1".to_string()), "e1");
        let duplicate = MutationResponse::from_save(&SaveOutcome::DuplicateSave, "e1");

        assert_eq!(saved.outcome, MutationOutcome::Saved);
        assert_eq!(duplicate.outcome, MutationOutcome::Duplicate);
        assert_ne!(saved.message, duplicate.message);
    }

    #[test]
    fn test_unsave_response_serialization() {
        let response = MutationResponse::from_unsave(&UnsaveOutcome::NotFound, "e2");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "code": 200,
                "success": true,
                "message": "Event was not in saved events",
                "outcome": "not_found",
                "eventId": "e2"
            })
        );
    }
}
