//! Application state with trait-object storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage and the upstream event source are held as trait
//! objects; the storage backend is chosen by feature flag.

use std::sync::Arc;

use axum::extract::FromRef;

use eventbook_core::event::EventSource;
use eventbook_core::storage::KeyValueStore;

use crate::config::Config;
use crate::events::UpstreamEventsClient;
use crate::gateway::Gateway;
use crate::identity::IdentityResolver;
use crate::logging::Logger;
use crate::users::{SavedEventsManager, UserRepository};

/// Shared application state.
///
/// Cloned for each request handler. Every component shares the single store
/// handle opened at startup.
#[derive(Clone)]
pub struct AppState {
    /// Façade running named operations.
    pub gateway: Gateway,
    /// Resolves request credentials to users.
    pub resolver: IdentityResolver,
}

impl AppState {
    /// Wires the components over an opened store and event source.
    pub fn build(
        store: Arc<dyn KeyValueStore>,
        events: Arc<dyn EventSource>,
        config: &Config,
        log: &Logger,
    ) -> Self {
        let users = UserRepository::new(store, &config.users_table, log.component("users"));
        let saved_events = SavedEventsManager::new(users.clone(), log.component("saved_events"));
        let resolver = IdentityResolver::new(users.clone(), log.component("identity"));
        let gateway = Gateway::new(users, saved_events, events, log.component("gateway"));

        Self { gateway, resolver }
    }

    /// Builds the state around `store`, checking that the users table is
    /// reachable before serving traffic.
    async fn with_store(
        store: Arc<dyn KeyValueStore>,
        config: &Config,
        log: &Logger,
    ) -> Result<Self, anyhow::Error> {
        let schema = store.describe_table(&config.users_table).await?;
        tracing::info!(
            parent: log.span(),
            table = %config.users_table,
            partition_key = %schema.partition_key,
            "users table ready"
        );

        let events = UpstreamEventsClient::new(
            &config.events_api_url,
            config.events_api_key.clone(),
            config.upstream_timeout(),
            log.component("events"),
        )?;
        if config.events_api_key.is_none() {
            tracing::warn!(
                parent: log.span(),
                "EVENTS_API_KEY is not set, upstream calls are unauthenticated"
            );
        }

        Ok(Self::build(store, Arc::new(events), config, log))
    }
}

impl FromRef<AppState> for Gateway {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl FromRef<AppState> for IdentityResolver {
    fn from_ref(state: &AppState) -> Self {
        state.resolver.clone()
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::inmemory::InMemoryStore;
    use eventbook_core::storage::KeySchema;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config, log: &Logger) -> Result<Self, anyhow::Error> {
            let store = InMemoryStore::with_table(
                &config.users_table,
                KeySchema::new(&config.users_partition_key),
            );
            Self::with_store(Arc::new(store), config, log).await
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::storage::dynamodb::DynamoDbStore;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        pub async fn new(config: &Config, log: &Logger) -> Result<Self, anyhow::Error> {
            let store = DynamoDbStore::connect(
                &config.aws_region,
                config.aws_endpoint_url.as_deref(),
                log.component("store"),
            )
            .await;
            Self::with_store(Arc::new(store), config, log).await
        }
    }
}
