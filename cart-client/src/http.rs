//! HTTP client for the remote order API
//!
//! | Call | Request | Response |
//! |------|---------|----------|
//! | list | `GET /` | JSON array of orders |
//! | update | `PUT /{id}` with `{ field: value }` | success/failure only |
//! | delete | `DELETE /{id}` | success/failure only |

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use shared::{Order, OrderPatch};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{ClientConfig, ClientError, ClientResult};

/// Order API trait
///
/// The store only talks to the order API through this trait.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Fetch every order
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;

    /// Change one field of one order
    async fn update_order(&self, id: &str, patch: &OrderPatch) -> ClientResult<()>;

    /// Remove one order
    async fn delete_order(&self, id: &str) -> ClientResult<()>;
}

/// Network order API client
#[derive(Debug, Clone)]
pub struct NetworkOrderApi {
    client: Client,
    base_url: Url,
}

impl NetworkOrderApi {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a single order: the id is appended as one escaped path segment
    fn order_url(&self, id: &str) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Turn a non-success status into an error
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl OrderApi for NetworkOrderApi {
    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("body is not JSON: {}", e)))?;
        let serde_json::Value::Array(items) = value else {
            return Err(ClientError::InvalidResponse("expected a JSON array".into()));
        };
        if let Some(item) = items.iter().find(|item| !item.is_object()) {
            return Err(ClientError::InvalidResponse(format!(
                "malformed order record: {}",
                item
            )));
        }

        // One bad record must not hide the rest
        let total = items.len();
        let orders: Vec<Order> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Order>(item) {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable order record");
                    None
                }
            })
            .collect();
        debug!(count = orders.len(), skipped = total - orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self, patch), fields(order_id = %id, field = %patch.field()))]
    async fn update_order(&self, id: &str, patch: &OrderPatch) -> ClientResult<()> {
        let url = self.order_url(id)?;
        let response = self.client.put(url).json(patch).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn delete_order(&self, id: &str) -> ClientResult<()> {
        let url = self.order_url(id)?;
        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_url_appends_segment() {
        let api = NetworkOrderApi::new(&ClientConfig::new("https://orders.example.com")).unwrap();
        assert_eq!(
            api.order_url("665f1c2e").unwrap().as_str(),
            "https://orders.example.com/665f1c2e"
        );
    }

    #[test]
    fn test_order_url_with_path_and_trailing_slash() {
        let api = NetworkOrderApi::new(&ClientConfig::new("http://localhost:4000/api/orders/")).unwrap();
        assert_eq!(
            api.order_url("abc").unwrap().as_str(),
            "http://localhost:4000/api/orders/abc"
        );
    }

    #[test]
    fn test_order_url_escapes_id() {
        let api = NetworkOrderApi::new(&ClientConfig::new("http://localhost:4000")).unwrap();
        assert_eq!(
            api.order_url("a/b c").unwrap().as_str(),
            "http://localhost:4000/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            NetworkOrderApi::new(&ClientConfig::new("mailto:ops@example.com")),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            NetworkOrderApi::new(&ClientConfig::new("::::")),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
