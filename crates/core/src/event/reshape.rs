use super::types::{Event, Location, UpstreamEvent};

/// Reshapes an upstream event, field by field, into the client-facing shape.
pub fn reshape_event(event: UpstreamEvent) -> Event {
    Event {
        id: event.id,
        name: event.name,
        description: event.description.unwrap_or_default(),
        category: event.category.unwrap_or_default(),
        is_free: event.is_free,
        location: Location {
            display_address: event.location.display_address.join(", "),
        },
        time_start: event.time_start.unwrap_or_default(),
        time_end: event.time_end.unwrap_or_default(),
        tickets_url: event.tickets_url.filter(|url| !url.is_empty()),
        attending_count: event.attending_count,
    }
}
