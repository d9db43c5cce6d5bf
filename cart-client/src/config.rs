//! Client configuration

use chrono::TimeDelta;

use crate::http::NetworkOrderApi;
use crate::store::OrderStore;
use crate::types::{WritePolicies, WritePolicy};
use crate::ClientResult;

/// Order API used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://serverfoodcart.onrender.com";

/// Client configuration for connecting to the order API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Order API base URL (e.g., "https://serverfoodcart.onrender.com")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Orders older than this many hours are dropped at load
    pub recency_window_hours: i64,

    /// Optimistic/pessimistic policy per write operation
    pub policies: WritePolicies,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 5,
            recency_window_hours: 48,
            policies: WritePolicies::default(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the load-time recency window
    pub fn with_recency_window_hours(mut self, hours: i64) -> Self {
        self.recency_window_hours = hours;
        self
    }

    /// Set the policy for field updates
    pub fn with_update_policy(mut self, policy: WritePolicy) -> Self {
        self.policies.update = policy;
        self
    }

    /// Recency window as a duration
    ///
    /// Negative hours clamp to zero; hours beyond chrono's range clamp to
    /// the largest representable window.
    pub fn recency_window(&self) -> TimeDelta {
        TimeDelta::try_hours(self.recency_window_hours.max(0)).unwrap_or(TimeDelta::MAX)
    }

    /// Create an HTTP order API client from this configuration
    pub fn build_api(&self) -> ClientResult<NetworkOrderApi> {
        NetworkOrderApi::new(self)
    }

    /// Create an order store backed by the HTTP order API
    pub fn build_store(&self) -> ClientResult<OrderStore<NetworkOrderApi>> {
        Ok(OrderStore::new(self.build_api()?)
            .with_recency_window(self.recency_window())
            .with_policies(self.policies))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
