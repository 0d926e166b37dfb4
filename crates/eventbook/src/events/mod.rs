//! Upstream event listings.

mod client;

pub use client::UpstreamEventsClient;
