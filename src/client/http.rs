//! HTTP client implementation.
//!
//! Provides the baseline REST client for the back-office orders API. The
//! listing fetch is the authoritative source of truth; the push channel
//! only patches it incrementally between fetches.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::config::ClientConfig;
use super::error::ClientError;
use crate::types::{Order, OrderFilters, OrderPage, PaginationMeta};

/// API error response format.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

/// API error details.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    message: String,
}

/// Response envelope: every payload sits under a `data` key.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Listing payload.
#[derive(Debug, Deserialize)]
struct OrdersData {
    orders: Vec<Order>,
    meta: PaginationMeta,
}

/// Single order payload.
#[derive(Debug, Deserialize)]
struct OrderData {
    order: Order,
}

/// HTTP client for the back-office orders API.
#[derive(Debug, Clone)]
pub struct OrdersClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl OrdersClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(ref api_key) = config.api_key {
            if let Ok(value) = HeaderValue::from_str(api_key) {
                headers.insert("X-API-Key", value);
            }
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { config, http })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }

    /// Creates a new client with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(base_url))
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Makes a GET request to the given path, retrying timeouts and 429s
    /// up to the configured limit. Query pairs are percent-encoded by
    /// reqwest, so values may contain `+`, `&`, or `=` freely.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.config.base_url, path);

        for attempt in 0..=self.config.max_retries {
            let response = match self.http.get(&url).query(query).send().await {
                Ok(response) => response,
                Err(e) if e.is_timeout() && attempt < self.config.max_retries => {
                    debug!("request timed out, retrying: {}", url);
                    tokio::time::sleep(Duration::from_millis(100 * (1 << (attempt + 1)))).await;
                    continue;
                }
                Err(e) => return Err(ClientError::from(e)),
            };

            let status = response.status();
            if status.is_success() {
                let body = response
                    .text()
                    .await
                    .map_err(|e| ClientError::Deserialization(e.to_string()))?;
                return serde_json::from_str(&body)
                    .map_err(|e| ClientError::Deserialization(e.to_string()));
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok());

                if attempt < self.config.max_retries {
                    debug!("rate limited, retrying: {}", url);
                    tokio::time::sleep(Duration::from_secs(retry_after.unwrap_or(1))).await;
                    continue;
                }
                return Err(ClientError::RateLimited { retry_after });
            }

            return Err(Self::error_for(status, response).await);
        }

        Err(ClientError::Timeout)
    }

    /// Maps a non-success, non-retryable response to an error.
    async fn error_for(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
        match status {
            reqwest::StatusCode::NOT_FOUND => ClientError::NotFound("resource".to_string()),
            reqwest::StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            _ => {
                let body = response.text().await.unwrap_or_default();
                match serde_json::from_str::<ApiErrorResponse>(&body) {
                    Ok(parsed) => ClientError::Api {
                        code: parsed.error.code,
                        message: parsed.error.message,
                    },
                    Err(_) => ClientError::Api {
                        code: status.as_str().to_string(),
                        message: body,
                    },
                }
            }
        }
    }

    /// Fetches one page of the order listing.
    ///
    /// The result is the authoritative state for that page and filter set;
    /// callers replace any cached entry with it rather than merging.
    ///
    /// # Arguments
    ///
    /// * `page` - One-based page index
    /// * `filters` - Optional listing filters
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_orders(
        &self,
        page: u32,
        filters: &OrderFilters,
    ) -> Result<OrderPage, ClientError> {
        let response: Envelope<OrdersData> =
            self.get("/orders", &filters.query_pairs(page)).await?;
        Ok(OrderPage {
            orders: response.data.orders,
            meta: response.data.meta,
        })
    }

    /// Fetches a single order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the order does not exist.
    pub async fn get_order(&self, id: u64) -> Result<Order, ClientError> {
        let response: Envelope<OrderData> = self.get(&format!("/orders/{}", id), &[]).await?;
        Ok(response.data.order)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn test_list_orders_percent_encodes_filters() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        // Minimal HTTP server: capture the request head, answer with an
        // empty page.
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.expect("read");
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let body = r#"{"data":{"orders":[],"meta":{"current_page":1,"per_page":20,"total":0,"total_pages":0}}}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            request
        });

        let client =
            OrdersClient::with_base_url(format!("http://{}", addr)).expect("client");
        let filters = OrderFilters::new()
            .with_phone("+8801711000000")
            .with_region("a&b=c");
        let page = client.list_orders(1, &filters).await.expect("list");
        assert!(page.orders.is_empty());

        // A raw `+` decodes as a space and `&`/`=` would inject extra
        // parameters; both must go on the wire percent-encoded.
        let request = server.await.expect("server task");
        assert!(
            request.contains("phone=%2B8801711000000"),
            "phone sent unencoded: {}",
            request
        );
        assert!(
            request.contains("region=a%26b%3Dc"),
            "region sent unencoded: {}",
            request
        );
    }

    #[test]
    fn test_client_new() {
        let config = ClientConfig::new("https://backoffice.example/api");
        assert!(OrdersClient::new(config).is_ok());
    }

    #[test]
    fn test_client_with_defaults() {
        assert!(OrdersClient::with_defaults().is_ok());
    }

    #[test]
    fn test_client_with_base_url() {
        assert!(OrdersClient::with_base_url("https://backoffice.example/api").is_ok());
    }

    #[test]
    fn test_client_invalid_config() {
        assert!(OrdersClient::new(ClientConfig::new("")).is_err());
    }

    #[test]
    fn test_client_config_access() {
        let config = ClientConfig::new("https://backoffice.example/api").with_api_key("key-123");
        let client = OrdersClient::new(config).expect("client creation");
        assert_eq!(client.config().base_url, "https://backoffice.example/api");
        assert_eq!(client.config().api_key, Some("key-123".to_string()));
    }

    #[test]
    fn test_envelope_deserialize() {
        let json = r#"{
            "data": {
                "orders": [{"id":1,"status":"packing"}],
                "meta": {"current_page":1,"per_page":20,"total":1,"total_pages":1}
            }
        }"#;
        let envelope: Envelope<OrdersData> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(envelope.data.orders.len(), 1);
        assert_eq!(envelope.data.meta.current_page, 1);
    }

    #[test]
    fn test_order_envelope_deserialize() {
        let json = r#"{"data":{"order":{"id":5,"status":"delivered"}}}"#;
        let envelope: Envelope<OrderData> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(envelope.data.order.id, 5);
    }
}
