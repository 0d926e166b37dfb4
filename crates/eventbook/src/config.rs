use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the users table (default: "users")
    pub users_table: String,
    /// Partition key attribute of the users table for the in-memory backend
    /// (default: "email"). DynamoDB discovers it from the table itself.
    #[cfg_attr(not(feature = "inmemory"), allow(dead_code))]
    pub users_partition_key: String,
    /// AWS region (default: "us-east-2")
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_region: String,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB (default: unset)
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_endpoint_url: Option<String>,
    /// Base URL of the upstream event listings API
    /// (default: "https://api.yelp.com/v3")
    pub events_api_url: String,
    /// Bearer credential for the upstream event listings API (default: unset)
    pub events_api_key: Option<String>,
    /// Timeout of upstream HTTP calls in seconds (default: 10)
    pub upstream_timeout_seconds: u64,
    /// Timeout of inbound requests in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `USERS_TABLE_NAME` - Users table name (default: "users")
    /// - `USERS_PARTITION_KEY` - In-memory partition key (default: "email")
    /// - `AWS_REGION` - AWS region (default: "us-east-2")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    /// - `EVENTS_API_URL` - Upstream API base URL (default: "https://api.yelp.com/v3")
    /// - `EVENTS_API_KEY` - Upstream API bearer credential (default: unset)
    /// - `UPSTREAM_TIMEOUT_SECONDS` - Upstream call timeout (default: 10)
    /// - `REQUEST_TIMEOUT_SECONDS` - Inbound request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            users_table: env::var("USERS_TABLE_NAME").unwrap_or_else(|_| "users".to_string()),
            users_partition_key: env::var("USERS_PARTITION_KEY")
                .unwrap_or_else(|_| "email".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-2".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            events_api_url: env::var("EVENTS_API_URL")
                .unwrap_or_else(|_| "https://api.yelp.com/v3".to_string()),
            events_api_key: env::var("EVENTS_API_KEY").ok().filter(|k| !k.is_empty()),
            upstream_timeout_seconds: env::var("UPSTREAM_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the upstream call timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// Get the inbound request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
