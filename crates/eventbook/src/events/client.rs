//! HTTP client for the upstream event listings service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use eventbook_core::event::{
    reshape_event, Event, EventSource, EventSourceError, Result, UpstreamEvent, UpstreamEventList,
    UpstreamFeaturedEvent,
};

use crate::logging::Logger;

/// Event source backed by a Yelp-compatible Fusion API.
///
/// Every call carries the configured bearer credential and is bounded by the
/// client timeout.
pub struct UpstreamEventsClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    log: Logger,
}

impl UpstreamEventsClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
        log: Logger,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| EventSourceError::Request(format!("invalid base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(EventSourceError::Request(format!(
                "invalid base url {base_url}: cannot hold a path"
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("eventbook/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EventSourceError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            log,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET and decodes the body. `Ok(None)` on 404.
    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        tracing::debug!(parent: self.log.span(), url = %url, "calling upstream");

        let mut request = self.http.get(url.clone()).query(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(parent: self.log.span(), url = %url, error = %e, "upstream request failed");
            EventSourceError::Request(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                parent: self.log.span(),
                url = %url,
                status = status.as_u16(),
                "upstream returned an error"
            );
            return Err(EventSourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| EventSourceError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl EventSource for UpstreamEventsClient {
    async fn list_events(&self, city: &str) -> Result<Vec<Event>> {
        let list: Option<UpstreamEventList> =
            self.get(self.url(&["events"]), &[("location", city)]).await?;

        Ok(list
            .map(|list| list.events.into_iter().map(reshape_event).collect())
            .unwrap_or_default())
    }

    async fn featured_events(&self, city: &str) -> Result<Vec<Event>> {
        let featured: Option<UpstreamFeaturedEvent> = self
            .get(self.url(&["events", "featured"]), &[("location", city)])
            .await?;

        Ok(featured
            .and_then(|featured| featured.event)
            .map(reshape_event)
            .into_iter()
            .collect())
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>> {
        let event: Option<UpstreamEvent> = self.get(self.url(&["events", id]), &[]).await?;
        Ok(event.map(reshape_event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode as AxumStatus},
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn upstream_event(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Jazz Night",
            "description": "Live music",
            "category": "music",
            "is_free": false,
            "location": { "display_address": ["1 Main St", "Denver, CO"] },
            "time_start": "2024-06-01T20:00:00-06:00",
            "time_end": "2024-06-01T23:00:00-06:00",
            "tickets_url": "https://tickets.example.com",
            "attending_count": 12
        })
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer test-key")
    }

    async fn list(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
        if !authorized(&headers) {
            return (AxumStatus::UNAUTHORIZED, "missing key").into_response();
        }
        let city = q.get("location").cloned().unwrap_or_default();
        Json(json!({ "events": [upstream_event(&format!("{city}-1")), upstream_event(&format!("{city}-2"))] }))
            .into_response()
    }

    async fn featured(Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
        match q.get("location").map(String::as_str) {
            Some("nowhere") => Json(json!({})),
            _ => Json(json!({ "event": upstream_event("featured-1") })),
        }
    }

    async fn single(Path(id): Path<String>) -> impl IntoResponse {
        match id.as_str() {
            "missing" => AxumStatus::NOT_FOUND.into_response(),
            "broken" => (AxumStatus::INTERNAL_SERVER_ERROR, "boom").into_response(),
            _ => Json(upstream_event(&id)).into_response(),
        }
    }

    async fn spawn_upstream() -> String {
        let app = Router::new()
            .route("/v3/events", get(list))
            .route("/v3/events/featured", get(featured))
            .route("/v3/events/{id}", get(single));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/v3")
    }

    fn client(base_url: &str, api_key: Option<&str>) -> UpstreamEventsClient {
        UpstreamEventsClient::new(
            base_url,
            api_key.map(str::to_string),
            Duration::from_secs(5),
            Logger::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_events_reshapes_results() {
        let base = spawn_upstream().await;
        let events = client(&base, Some("test-key")).list_events("denver").await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "denver-1");
        assert_eq!(events[0].location.display_address, "1 Main St, Denver, CO");
        assert_eq!(events[0].attending_count, 12);
    }

    #[tokio::test]
    async fn test_list_events_without_key_is_status_error() {
        let base = spawn_upstream().await;
        let result = client(&base, None).list_events("denver").await;

        assert!(matches!(
            result,
            Err(EventSourceError::Status { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_featured_events() {
        let base = spawn_upstream().await;
        let client = client(&base, Some("test-key"));

        let featured = client.featured_events("denver").await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id, "featured-1");

        assert!(client.featured_events("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_event() {
        let base = spawn_upstream().await;
        let client = client(&base, Some("test-key"));

        let event = client.get_event("abc").await.unwrap().unwrap();
        assert_eq!(event.id, "abc");
        assert_eq!(event.tickets_url.as_deref(), Some("https://tickets.example.com"));

        assert_eq!(client.get_event("missing").await.unwrap(), None);
        assert!(matches!(
            client.get_event("broken").await,
            Err(EventSourceError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_request_error() {
        let client = client("http://127.0.0.1:1", None);
        assert!(matches!(
            client.list_events("denver").await,
            Err(EventSourceError::Request(_))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = UpstreamEventsClient::new(
            "not a url",
            None,
            Duration::from_secs(1),
            Logger::default(),
        );
        assert!(matches!(result, Err(EventSourceError::Request(_))));
    }
}
