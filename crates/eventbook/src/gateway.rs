//! Query/mutation façade.
//!
//! Maps named operations onto the saved-events manager, the user repository
//! and the upstream event source. The acting user always comes from the
//! request context.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use eventbook_core::api::{ApiError, MutationResponse, Operation, UserView};
use eventbook_core::auth::encode_credential;
use eventbook_core::event::{Event, EventSource};
use eventbook_core::storage::StoreError;
use eventbook_core::user::User;

use crate::context::RequestContext;
use crate::logging::Logger;
use crate::users::{SavedEventsManager, UserRepository};

/// Entry point for every named operation.
#[derive(Clone)]
pub struct Gateway {
    users: UserRepository,
    saved_events: SavedEventsManager,
    events: Arc<dyn EventSource>,
    log: Logger,
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()).into())
}

impl Gateway {
    pub fn new(
        users: UserRepository,
        saved_events: SavedEventsManager,
        events: Arc<dyn EventSource>,
        log: Logger,
    ) -> Self {
        Self {
            users,
            saved_events,
            events,
            log,
        }
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// Runs an operation and returns its JSON result.
    pub async fn execute(&self, ctx: &RequestContext, operation: Operation) -> Result<Value, ApiError> {
        tracing::debug!(
            parent: self.log.span(),
            request_id = %ctx.request_id,
            operation = operation.name(),
            mutation = operation.is_mutation(),
            authenticated = ctx.user.is_some(),
            "executing operation"
        );

        match operation {
            Operation::CurrentUser => to_value(self.current_user(ctx)),
            Operation::SavedEventIds => to_value(self.saved_event_ids(ctx).await?),
            Operation::SavedEvents => to_value(self.saved_events(ctx).await?),
            Operation::SaveEvent { event_id } => to_value(self.save_event(ctx, &event_id).await?),
            Operation::UnsaveEvent { event_id } => {
                to_value(self.unsave_event(ctx, &event_id).await?)
            }
            Operation::Login { email } => to_value(self.login(&email).await?),
            Operation::Events { city } => to_value(self.events(&city).await?),
            Operation::FeaturedEvents { city } => to_value(self.featured_events(&city).await?),
            Operation::Event { id } => to_value(self.event(&id).await?),
        }
    }

    fn require_user<'a>(&self, ctx: &'a RequestContext) -> Result<&'a User, ApiError> {
        ctx.user.as_ref().ok_or(ApiError::Unauthenticated)
    }

    /// The acting user, `None` when anonymous.
    pub fn current_user(&self, ctx: &RequestContext) -> Option<UserView> {
        ctx.user.as_ref().map(UserView::from)
    }

    pub async fn saved_event_ids(&self, ctx: &RequestContext) -> Result<Vec<String>, ApiError> {
        let user = self.require_user(ctx)?;
        Ok(self
            .saved_events
            .get_saved_event_ids(user.identity.as_str())
            .await?)
    }

    /// Saved events resolved through the upstream service, in save order.
    ///
    /// Ids the upstream no longer knows are skipped.
    pub async fn saved_events(&self, ctx: &RequestContext) -> Result<Vec<Event>, ApiError> {
        let ids = self.saved_event_ids(ctx).await?;

        let mut events = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.events.get_event(id).await? {
                Some(event) => events.push(event),
                None => tracing::debug!(
                    parent: self.log.span(),
                    request_id = %ctx.request_id,
                    event_id = %id,
                    "saved event unknown upstream, skipping"
                ),
            }
        }

        Ok(events)
    }

    pub async fn save_event(
        &self,
        ctx: &RequestContext,
        event_id: &str,
    ) -> Result<MutationResponse, ApiError> {
        let user = self.require_user(ctx)?;
        let outcome = self
            .saved_events
            .save_event(user.identity.as_str(), event_id)
            .await?;

        Ok(MutationResponse::from_save(&outcome, event_id.trim()))
    }

    pub async fn unsave_event(
        &self,
        ctx: &RequestContext,
        event_id: &str,
    ) -> Result<MutationResponse, ApiError> {
        let user = self.require_user(ctx)?;
        let outcome = self
            .saved_events
            .unsave_event(user.identity.as_str(), event_id)
            .await?;

        Ok(MutationResponse::from_unsave(&outcome, event_id.trim()))
    }

    /// Finds or creates the user and hands back their credential.
    pub async fn login(&self, email: &str) -> Result<String, ApiError> {
        let user = self.users.find_or_create(email.trim()).await?;
        tracing::info!(parent: self.log.span(), identity = %user.identity, "user logged in");
        Ok(encode_credential(&user.identity))
    }

    pub async fn events(&self, city: &str) -> Result<Vec<Event>, ApiError> {
        Ok(self.events.list_events(city).await?)
    }

    pub async fn featured_events(&self, city: &str) -> Result<Vec<Event>, ApiError> {
        Ok(self.events.featured_events(city).await?)
    }

    pub async fn event(&self, id: &str) -> Result<Option<Event>, ApiError> {
        Ok(self.events.get_event(id).await?)
    }
}
