//! Push-channel configuration.

use std::time::Duration;

/// Default push-channel URL.
pub const DEFAULT_STREAM_URL: &str = "wss://api.ordersync.example/woocommerce/ws/orders";

/// Default reconnect delay in milliseconds.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 2000;

/// Push-channel configuration.
///
/// Reconnection uses a fixed delay with no backoff and no jitter: every
/// failure is retried identically. By default retries never stop; set
/// [`StreamConfig::with_max_reconnect_attempts`] to cap them.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// WebSocket URL.
    pub url: String,

    /// Fixed delay between reconnect attempts.
    pub reconnect_delay: Duration,

    /// Maximum consecutive reconnect attempts (None = unlimited).
    pub max_reconnect_attempts: Option<u32>,

    /// Optional API key appended to the connection URL.
    pub api_key: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STREAM_URL.to_string(),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
            max_reconnect_attempts: None,
            api_key: None,
        }
    }
}

impl StreamConfig {
    /// Creates a new configuration with the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the reconnect delay.
    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Caps the number of consecutive reconnect attempts.
    #[must_use]
    pub fn with_max_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.max_reconnect_attempts = Some(attempts);
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the connection URL with the API key appended if set.
    #[must_use]
    pub fn connection_url(&self) -> String {
        match &self.api_key {
            Some(key) => {
                if self.url.contains('?') {
                    format!("{}&api_key={}", self.url, key)
                } else {
                    format!("{}?api_key={}", self.url, key)
                }
            }
            None => self.url.clone(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), super::error::StreamError> {
        if self.url.is_empty() {
            return Err(super::error::StreamError::InvalidConfig(
                "url cannot be empty".to_string(),
            ));
        }

        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            return Err(super::error::StreamError::InvalidConfig(
                "url must start with ws:// or wss://".to_string(),
            ));
        }

        Ok(())
    }
}
