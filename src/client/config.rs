//! HTTP client configuration.

use std::time::Duration;

/// Default base URL for the back-office API.
pub const DEFAULT_BASE_URL: &str = "https://api.ordersync.example/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum retries.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Path of the orders push channel, relative to the API host.
pub const ORDERS_STREAM_PATH: &str = "/woocommerce/ws/orders";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Maximum number of retries for failed requests.
    pub max_retries: u32,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            api_key: None,
            user_agent: format!("ordersync-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the push-channel URL derived from the base URL.
    ///
    /// The scheme follows the REST scheme (`https` becomes `wss`, `http`
    /// becomes `ws`); host and any base path are kept as-is, with
    /// [`ORDERS_STREAM_PATH`] appended.
    #[must_use]
    pub fn orders_stream_url(&self) -> String {
        let (scheme, rest) = match self.base_url.strip_prefix("https://") {
            Some(rest) => ("wss", rest),
            None => (
                "ws",
                self.base_url
                    .strip_prefix("http://")
                    .unwrap_or(&self.base_url),
            ),
        };
        format!(
            "{}://{}{}",
            scheme,
            rest.trim_end_matches('/'),
            ORDERS_STREAM_PATH
        )
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), super::error::ClientError> {
        if self.base_url.is_empty() {
            return Err(super::error::ClientError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(super::error::ClientError::InvalidConfig(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("https://backoffice.example/api")
            .with_timeout(Duration::from_secs(10))
            .with_max_retries(1)
            .with_api_key("key-123")
            .with_user_agent("dashboard/2.0");

        assert_eq!(config.base_url, "https://backoffice.example/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.api_key, Some("key-123".to_string()));
        assert_eq!(config.user_agent, "dashboard/2.0");
    }

    #[test]
    fn test_orders_stream_url_https() {
        let config = ClientConfig::new("https://backoffice.example");
        assert_eq!(
            config.orders_stream_url(),
            "wss://backoffice.example/woocommerce/ws/orders"
        );
    }

    #[test]
    fn test_orders_stream_url_http() {
        let config = ClientConfig::new("http://localhost:8000");
        assert_eq!(
            config.orders_stream_url(),
            "ws://localhost:8000/woocommerce/ws/orders"
        );
    }

    #[test]
    fn test_orders_stream_url_trailing_slash() {
        let config = ClientConfig::new("https://backoffice.example/api/");
        assert_eq!(
            config.orders_stream_url(),
            "wss://backoffice.example/api/woocommerce/ws/orders"
        );
    }

    #[test]
    fn test_config_validate_valid() {
        assert!(ClientConfig::new("https://backoffice.example").validate().is_ok());
    }

    #[test]
    fn test_config_validate_empty_url() {
        assert!(ClientConfig::new("").validate().is_err());
    }

    #[test]
    fn test_config_validate_invalid_scheme() {
        assert!(ClientConfig::new("ftp://backoffice.example").validate().is_err());
    }
}
