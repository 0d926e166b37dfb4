mod reshape;
mod traits;
mod types;

pub use reshape::reshape_event;
pub use traits::{EventSource, EventSourceError, Result};
pub use types::{
    Event, Location, UpstreamEvent, UpstreamEventList, UpstreamFeaturedEvent, UpstreamLocation,
};
