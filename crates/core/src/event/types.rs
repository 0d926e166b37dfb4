use serde::{Deserialize, Serialize};

/// An event as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub is_free: bool,
    pub location: Location,
    pub time_start: String,
    pub time_end: String,
    pub tickets_url: Option<String>,
    pub attending_count: u32,
}

/// Where an event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_address: String,
}

/// An event as returned by the upstream listings service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpstreamEvent {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_free: bool,
    pub location: UpstreamLocation,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub tickets_url: Option<String>,
    pub attending_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpstreamLocation {
    pub display_address: Vec<String>,
}

/// Response of the upstream event search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamEventList {
    pub events: Vec<UpstreamEvent>,
}

/// Response of the upstream featured event endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamFeaturedEvent {
    pub event: Option<UpstreamEvent>,
}
