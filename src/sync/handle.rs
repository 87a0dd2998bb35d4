//! Realtime order synchronization handle.

use std::sync::Arc;

use tracing::debug;

use super::apply::apply_event;
use crate::cache::{ListKey, OrderCache};
use crate::client::{ClientError, OrdersClient};
use crate::types::{Order, OrderFilters, OrderPage};
use crate::ws::{ConnectionState, OrderStream, StreamConfig, StreamError};

/// Keeps a client-side order cache approximately in sync with the backend.
///
/// Combines the pull and push halves: the paginated baseline fetch is the
/// authoritative snapshot, and the push channel patches cached entries
/// incrementally between fetches. One background task applies events in
/// arrival order, so cache mutation from this component is single-writer.
///
/// Failure surfacing follows the split in the module docs: transport
/// failures are recovered silently by the reconnect loop and visible only
/// through [`RealtimeOrderSync::connection_state`]; baseline fetch
/// failures are returned to the caller as [`ClientError`].
pub struct RealtimeOrderSync {
    client: OrdersClient,
    cache: Arc<dyn OrderCache>,
    stream: Arc<OrderStream>,
}

impl std::fmt::Debug for RealtimeOrderSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeOrderSync")
            .field("client", &self.client)
            .field("stream", &self.stream)
            .finish_non_exhaustive()
    }
}

impl RealtimeOrderSync {
    /// Creates the sync handle and spawns the event pump.
    ///
    /// Must be called from within a tokio runtime. The stream dials
    /// immediately and reconnects on its own; construction does not wait
    /// for the connection to open.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream configuration is invalid.
    pub fn new(
        client: OrdersClient,
        cache: Arc<dyn OrderCache>,
        stream_config: StreamConfig,
    ) -> Result<Self, StreamError> {
        let stream = Arc::new(OrderStream::connect(stream_config)?);

        let pump_stream = Arc::clone(&stream);
        let pump_cache = Arc::clone(&cache);
        tokio::spawn(async move {
            while let Ok(event) = pump_stream.next_event().await {
                apply_event(pump_cache.as_ref(), &event);
            }
            debug!("order sync: event pump exited");
        });

        Ok(Self {
            client,
            cache,
            stream,
        })
    }

    /// Creates the sync handle, deriving the push-channel URL and API key
    /// from the HTTP client's configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the derived stream configuration is invalid.
    pub fn with_client(
        client: OrdersClient,
        cache: Arc<dyn OrderCache>,
    ) -> Result<Self, StreamError> {
        let mut config = StreamConfig::new(client.config().orders_stream_url());
        if let Some(ref key) = client.config().api_key {
            config = config.with_api_key(key.clone());
        }
        Self::new(client, cache, config)
    }

    /// Fetches one page of the baseline order listing.
    ///
    /// The fetched page replaces the cached list entry for its key and
    /// upserts each order's by-id entry; it never merges. Concurrent
    /// fetches for the same key last-write-win on the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the baseline fetch fails. The cache is left
    /// untouched in that case.
    pub async fn orders(
        &self,
        page: u32,
        filters: &OrderFilters,
    ) -> Result<OrderPage, ClientError> {
        let fetched = self.client.list_orders(page, filters).await?;

        let key = ListKey::new(page, filters);
        self.cache.put_list(key, fetched.orders.clone());
        for order in &fetched.orders {
            self.cache.put_order(order.clone());
        }

        Ok(fetched)
    }

    /// Returns the cached list for the given page and filters, if present.
    ///
    /// Reflects all events applied since the last baseline fetch for that
    /// key. Returns `None` if the entry was never fetched or has been
    /// invalidated; the caller refetches via [`RealtimeOrderSync::orders`].
    #[must_use]
    pub fn cached_orders(&self, page: u32, filters: &OrderFilters) -> Option<Vec<Order>> {
        self.cache.list(&ListKey::new(page, filters))
    }

    /// Returns a single order, from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not cached and the fetch fails.
    pub async fn order(&self, id: u64) -> Result<Order, ClientError> {
        if let Some(order) = self.cache.order(id) {
            return Ok(order);
        }

        let order = self.client.get_order(id).await?;
        self.cache.put_order(order.clone());
        Ok(order)
    }

    /// Returns the current push-channel connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.stream.state()
    }

    /// Returns true if the push channel is currently connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.stream.is_connected()
    }

    /// Returns the shared cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn OrderCache> {
        &self.cache
    }

    /// Stops the push channel.
    ///
    /// No reconnect fires afterwards; the event pump drains and exits.
    /// Cached entries remain readable.
    pub fn shutdown(&self) {
        self.stream.shutdown();
    }
}

/// The pump task holds its own handle to the stream, so dropping this
/// struct alone would leave the runner reconnecting forever. Shutting
/// down on drop stops both background tasks.
impl Drop for RealtimeOrderSync {
    fn drop(&mut self) {
        self.stream.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::SinkExt;
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    use super::*;
    use crate::cache::MemoryCache;
    use crate::client::ClientConfig;
    use crate::types::OrderStatus;

    fn test_client() -> OrdersClient {
        OrdersClient::new(ClientConfig::new("http://127.0.0.1:1")).expect("client")
    }

    fn order(id: u64, status: &str) -> Order {
        serde_json::from_str(&format!(r#"{{"id":{},"status":"{}"}}"#, id, status))
            .expect("valid order json")
    }

    #[tokio::test]
    async fn test_pump_applies_events_to_cache() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.expect("accept");
            let mut ws = tokio_tungstenite::accept_async(socket).await.expect("handshake");
            ws.send(Message::Text(
                r#"{"event":"created","order":{"id":11,"status":"unconfirmed"}}"#.into(),
            ))
            .await
            .expect("send");
            tokio::time::sleep(Duration::from_secs(1)).await;
        });

        let cache = Arc::new(MemoryCache::new());
        let key = ListKey::new(1, &OrderFilters::new());
        cache.put_list(key.clone(), vec![]);

        let sync = RealtimeOrderSync::new(
            test_client(),
            Arc::clone(&cache) as Arc<dyn OrderCache>,
            StreamConfig::new(format!("ws://{}", addr)),
        )
        .expect("sync");

        // Poll until the pump has applied the pushed event.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(list) = sync.cached_orders(1, &OrderFilters::new()) {
                if !list.is_empty() {
                    assert_eq!(list[0].id, 11);
                    break;
                }
            }
            assert!(tokio::time::Instant::now() < deadline, "event never applied");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        sync.shutdown();
    }

    #[tokio::test]
    async fn test_scenario_baseline_then_update() {
        // Baseline page of two orders, then an updated event for id 1:
        // the list keeps its order and length, id 1 carries the new
        // status, and the by-id entry matches.
        let cache = Arc::new(MemoryCache::new());
        let key = ListKey::new(1, &OrderFilters::new());
        cache.put_list(key.clone(), vec![order(1, "packing"), order(2, "delivered")]);
        cache.put_order(order(1, "packing"));
        cache.put_order(order(2, "delivered"));

        apply_event(
            cache.as_ref(),
            &crate::ws::OrderEvent::updated(order(1, "dispatching")),
        );

        let list = cache.list(&key).expect("list");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 1);
        assert_eq!(list[0].status, OrderStatus::Dispatching);
        assert_eq!(list[1].id, 2);
        assert_eq!(list[1].status, OrderStatus::Delivered);
        assert_eq!(
            cache.order(1).expect("by-id entry").status,
            OrderStatus::Dispatching
        );
    }

    #[tokio::test]
    async fn test_order_served_from_cache() {
        let cache = Arc::new(MemoryCache::new());
        cache.put_order(order(3, "delivering"));

        // Unreachable ws endpoint: the stream just retries in the
        // background and never blocks cache reads.
        let sync = RealtimeOrderSync::new(
            test_client(),
            Arc::clone(&cache) as Arc<dyn OrderCache>,
            StreamConfig::new("ws://127.0.0.1:9")
                .with_reconnect_delay(Duration::from_millis(10)),
        )
        .expect("sync");

        let fetched = sync.order(3).await.expect("cached order");
        assert_eq!(fetched.status, OrderStatus::Delivering);

        sync.shutdown();
    }

    #[tokio::test]
    async fn test_drop_stops_stream() {
        let sync = RealtimeOrderSync::new(
            test_client(),
            Arc::new(MemoryCache::new()) as Arc<dyn OrderCache>,
            StreamConfig::new("ws://127.0.0.1:9")
                .with_reconnect_delay(Duration::from_millis(10)),
        )
        .expect("sync");

        let mut watch = sync.stream.state_watch();
        drop(sync);

        // Without the explicit shutdown, the runner keeps retrying and
        // the state never leaves the dial/retry cycle.
        watch
            .wait_for(|state| *state == ConnectionState::Stopped)
            .await
            .expect("stopped state");
    }

    #[tokio::test]
    async fn test_connection_state_exposed() {
        let sync = RealtimeOrderSync::with_client(
            test_client(),
            Arc::new(MemoryCache::new()) as Arc<dyn OrderCache>,
        )
        .expect("sync");

        // Nothing listens on the derived endpoint; never Connected.
        assert!(!sync.is_connected());
        sync.shutdown();
    }
}
