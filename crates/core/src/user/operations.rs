use serde_json::Value;

use crate::storage::{string_list, Item, KeySchema};

use super::types::SAVED_EVENT_IDS_ATTRIBUTE;
use super::{Identity, User, UserError};

/// Builds the item written when a user is first created: only the identity.
pub fn new_user_item(identity: &Identity, schema: &KeySchema) -> Item {
    let mut item = Item::new();
    item.insert(
        schema.partition_key.clone(),
        Value::String(identity.as_str().to_string()),
    );
    item
}

/// Reads the saved event ids of a stored user item.
///
/// `Ok(None)` when the attribute is absent. A present attribute that is not a
/// list of strings is a `CorruptState`.
pub fn saved_event_ids(item: &Item, identity: &Identity) -> Result<Option<Vec<String>>, UserError> {
    string_list(item, SAVED_EVENT_IDS_ATTRIBUTE).map_err(|_| UserError::CorruptState {
        identity: identity.to_string(),
        reason: format!("{SAVED_EVENT_IDS_ATTRIBUTE} is not a list of strings"),
    })
}

/// Converts a stored item into a [`User`].
pub fn item_to_user(item: &Item, schema: &KeySchema) -> Result<User, UserError> {
    let raw = schema.key_of(item).ok_or_else(|| UserError::CorruptState {
        identity: String::new(),
        reason: format!("missing partition key attribute {}", schema.partition_key),
    })?;
    let identity = Identity::parse(raw).map_err(|_| UserError::CorruptState {
        identity: raw.to_string(),
        reason: "stored identity is not email-shaped".to_string(),
    })?;
    let saved = saved_event_ids(item, &identity)?.unwrap_or_default();

    Ok(User {
        identity,
        saved_event_ids: saved,
    })
}

/// Validates an event id, returning it trimmed.
pub fn validate_event_id(event_id: &str) -> Result<&str, UserError> {
    let trimmed = event_id.trim();
    if trimmed.is_empty() {
        return Err(UserError::InvalidEventId);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> KeySchema {
        KeySchema::new("email")
    }

    fn identity() -> Identity {
        Identity::parse("a@b.com").unwrap()
    }

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_new_user_item_only_has_identity() {
        let item = new_user_item(&identity(), &schema());
        assert_eq!(Value::Object(item), json!({ "email": "a@b.com" }));
    }

    #[test]
    fn test_item_to_user_without_saved_events() {
        let user = item_to_user(&item(json!({ "email": "a@b.com" })), &schema()).unwrap();
        assert_eq!(user, User::new(identity()));
    }

    #[test]
    fn test_item_to_user_with_saved_events() {
        let user = item_to_user(
            &item(json!({ "email": "a@b.com", "savedEventIds": ["e1", "e2"] })),
            &schema(),
        )
        .unwrap();
        assert_eq!(user.saved_event_ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_item_to_user_uses_discovered_partition_key() {
        let schema = KeySchema::new("identity");
        let user = item_to_user(&item(json!({ "identity": "a@b.com" })), &schema).unwrap();
        assert_eq!(user.identity, identity());
    }

    #[test]
    fn test_item_to_user_missing_key_is_corrupt() {
        let result = item_to_user(&item(json!({ "savedEventIds": [] })), &schema());
        assert!(matches!(result, Err(UserError::CorruptState { .. })));
    }

    #[test]
    fn test_item_to_user_wrong_list_shape_is_corrupt() {
        let result = item_to_user(
            &item(json!({ "email": "a@b.com", "savedEventIds": { "e1": true } })),
            &schema(),
        );
        assert!(matches!(
            result,
            Err(UserError::CorruptState { ref identity, .. }) if identity == "a@b.com"
        ));
    }

    #[test]
    fn test_saved_event_ids_absent() {
        let ids = saved_event_ids(&item(json!({ "email": "a@b.com" })), &identity()).unwrap();
        assert_eq!(ids, None);
    }

    #[test]
    fn test_validate_event_id() {
        assert_eq!(validate_event_id("evt1"), Ok("evt1"));
        assert_eq!(validate_event_id("  evt1 "), Ok("evt1"));
        assert_eq!(validate_event_id(""), Err(UserError::InvalidEventId));
        assert_eq!(validate_event_id("   "), Err(UserError::InvalidEventId));
    }
}
