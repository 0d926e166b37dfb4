mod error;
mod operations;
mod types;

pub use error::UserError;
pub use operations::{item_to_user, new_user_item, saved_event_ids, validate_event_id};
pub use types::{Identity, SaveOutcome, UnsaveOutcome, User, SAVED_EVENT_IDS_ATTRIBUTE};
