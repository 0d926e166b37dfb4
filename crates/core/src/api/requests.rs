use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;

/// Envelope of a request to the single API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationRequest {
    /// Operation name, e.g. `saveEvent`.
    pub operation: String,
    /// Operation arguments. May be omitted for operations without arguments.
    #[serde(default)]
    pub variables: Value,
}

/// A named query or mutation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CurrentUser,
    SavedEventIds,
    SavedEvents,
    SaveEvent { event_id: String },
    UnsaveEvent { event_id: String },
    Login { email: String },
    Events { city: String },
    FeaturedEvents { city: String },
    Event { id: String },
}

impl Operation {
    /// Whether the operation changes state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::SaveEvent { .. } | Self::UnsaveEvent { .. } | Self::Login { .. }
        )
    }

    /// Operation name as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CurrentUser => "currentUser",
            Self::SavedEventIds => "savedEventIds",
            Self::SavedEvents => "savedEvents",
            Self::SaveEvent { .. } => "saveEvent",
            Self::UnsaveEvent { .. } => "unsaveEvent",
            Self::Login { .. } => "login",
            Self::Events { .. } => "events",
            Self::FeaturedEvents { .. } => "featuredEvents",
            Self::Event { .. } => "event",
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventIdArgs {
    event_id: String,
}

#[derive(Deserialize)]
struct EmailArgs {
    email: String,
}

#[derive(Deserialize)]
struct CityArgs {
    city: String,
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

fn args<T: DeserializeOwned>(operation: &str, variables: Value) -> Result<T, ApiError> {
    let variables = match variables {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(variables)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid variables for {operation}: {e}")))
}

impl TryFrom<OperationRequest> for Operation {
    type Error = ApiError;

    fn try_from(request: OperationRequest) -> Result<Self, Self::Error> {
        let OperationRequest {
            operation,
            variables,
        } = request;

        let op = match operation.as_str() {
            "currentUser" | "me" => Self::CurrentUser,
            "savedEventIds" => Self::SavedEventIds,
            "savedEvents" => Self::SavedEvents,
            "saveEvent" => {
                let EventIdArgs { event_id } = args(&operation, variables)?;
                Self::SaveEvent { event_id }
            }
            "unsaveEvent" => {
                let EventIdArgs { event_id } = args(&operation, variables)?;
                Self::UnsaveEvent { event_id }
            }
            "login" => {
                let EmailArgs { email } = args(&operation, variables)?;
                Self::Login { email }
            }
            "events" => {
                let CityArgs { city } = args(&operation, variables)?;
                Self::Events { city }
            }
            "featuredEvents" => {
                let CityArgs { city } = args(&operation, variables)?;
                Self::FeaturedEvents { city }
            }
            "event" => {
                let IdArgs { id } = args(&operation, variables)?;
                Self::Event { id }
            }
            other => {
                return Err(ApiError::InvalidRequest(format!(
                    "unknown operation: {other}"
                )))
            }
        };

        Ok(op)
    }
}
