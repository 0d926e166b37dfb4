//! User records and their saved-events lists.

mod repository;
mod saved_events;

pub use repository::UserRepository;
pub use saved_events::SavedEventsManager;
