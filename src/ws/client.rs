//! Push-channel client.
//!
//! Owns the WebSocket connection to the orders topic and the reconnect
//! loop around it. Received frames are parsed into [`OrderEvent`]s and
//! forwarded over a channel in arrival order; the caller (normally the
//! sync layer) applies them to the cache one at a time.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use super::config::StreamConfig;
use super::error::StreamError;
use super::messages::OrderEvent;
use super::state::{step, ConnectionEffect, ConnectionInput, ConnectionState};

/// Live event stream for the global orders topic.
///
/// The topic is not filtered server-side: every consumer receives every
/// order event and relies on cache-key matching to decide relevance.
/// Dropping the handle stops the background task.
#[derive(Debug)]
pub struct OrderStream {
    config: StreamConfig,
    events: Mutex<mpsc::Receiver<OrderEvent>>,
    state_rx: watch::Receiver<ConnectionState>,
    stop_tx: watch::Sender<bool>,
}

impl OrderStream {
    /// Spawns the connection task and returns the stream handle.
    ///
    /// Must be called from within a tokio runtime. The first dial happens
    /// immediately; failures are retried after the configured fixed delay.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn connect(config: StreamConfig) -> Result<Self, StreamError> {
        config.validate()?;

        let (event_tx, event_rx) = mpsc::channel(1024);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let (stop_tx, stop_rx) = watch::channel(false);

        let runner = StreamRunner {
            config: config.clone(),
            event_tx,
            state_tx,
            stop_rx,
        };
        tokio::spawn(runner.run());

        Ok(Self {
            config,
            events: Mutex::new(event_rx),
            state_rx,
            stop_tx,
        })
    }

    /// Returns the stream configuration.
    #[must_use]
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Returns true if the transport is currently connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Returns a watch receiver that tracks connection state changes.
    #[must_use]
    pub fn state_watch(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Returns the next event from the stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] once the stream has been shut down
    /// and the event buffer is drained.
    pub async fn next_event(&self) -> Result<OrderEvent, StreamError> {
        self.events
            .lock()
            .await
            .recv()
            .await
            .ok_or(StreamError::Closed)
    }

    /// Requests shutdown.
    ///
    /// Cancels any pending reconnect, closes the socket, and moves the
    /// state machine to [`ConnectionState::Stopped`]. Idempotent.
    pub fn shutdown(&self) {
        let _ = self.stop_tx.send(true);
    }
}

/// Background task driving the connection state machine.
struct StreamRunner {
    config: StreamConfig,
    event_tx: mpsc::Sender<OrderEvent>,
    state_tx: watch::Sender<ConnectionState>,
    stop_rx: watch::Receiver<bool>,
}

impl StreamRunner {
    async fn run(mut self) {
        let mut state = ConnectionState::Disconnected;
        let mut pending = Some(ConnectionInput::DialRequested);
        let mut failures: u32 = 0;

        while let Some(input) = pending.take() {
            let (next, effect) = step(state, input);
            if next != state {
                debug!("order stream: {:?} -> {:?}", state, next);
                state = next;
                let _ = self.state_tx.send(state);
            }

            if state == ConnectionState::Stopped {
                break;
            }

            pending = match effect {
                ConnectionEffect::Dial => Some(self.session(&mut state, &mut failures).await),
                ConnectionEffect::ScheduleRetry => {
                    failures += 1;
                    if let Some(max) = self.config.max_reconnect_attempts {
                        if failures > max {
                            warn!("order stream: giving up after {} failed attempts", max);
                            Some(ConnectionInput::StopRequested)
                        } else {
                            Some(self.wait_retry().await)
                        }
                    } else {
                        Some(self.wait_retry().await)
                    }
                }
                ConnectionEffect::None => None,
            };
        }

        let _ = self.state_tx.send(ConnectionState::Stopped);
        debug!("order stream: runner exited");
    }

    /// Dials once and, on success, pumps frames until the connection is
    /// lost or shutdown is requested. Returns the next state input.
    async fn session(
        &mut self,
        state: &mut ConnectionState,
        failures: &mut u32,
    ) -> ConnectionInput {
        let url = self.config.connection_url();
        let mut stop_rx = self.stop_rx.clone();

        // The stop arms discard the `watch::Ref` inside the async block:
        // the guard is not Send, so it must not live across the arm body.
        let mut ws = tokio::select! {
            result = tokio_tungstenite::connect_async(&url) => match result {
                Ok((ws, _)) => ws,
                Err(e) => {
                    debug!("order stream: dial failed: {}", e);
                    return ConnectionInput::Lost;
                }
            },
            () = async { let _ = stop_rx.wait_for(|stop| *stop).await; } => {
                return ConnectionInput::StopRequested;
            }
        };

        let (next, _) = step(*state, ConnectionInput::Opened);
        *state = next;
        *failures = 0;
        let _ = self.state_tx.send(*state);
        info!("order stream: connected");

        loop {
            tokio::select! {
                frame = ws.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        match OrderEvent::parse(text.as_str()) {
                            Ok(event) => {
                                if self.event_tx.send(event).await.is_err() {
                                    // Receiver dropped; nobody left to serve.
                                    return ConnectionInput::StopRequested;
                                }
                            }
                            Err(e) => warn!("order stream: dropping bad frame: {}", e),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("order stream: connection closed by server");
                        return ConnectionInput::Lost;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("order stream: transport error: {}", e);
                        return ConnectionInput::Lost;
                    }
                },
                () = async { let _ = stop_rx.wait_for(|stop| *stop).await; } => {
                    let _ = ws.send(Message::Close(None)).await;
                    return ConnectionInput::StopRequested;
                }
            }
        }
    }

    /// Sleeps for the fixed reconnect delay, unless shutdown arrives first.
    async fn wait_retry(&mut self) -> ConnectionInput {
        let mut stop_rx = self.stop_rx.clone();
        tokio::select! {
            () = tokio::time::sleep(self.config.reconnect_delay) => ConnectionInput::RetryElapsed,
            () = async { let _ = stop_rx.wait_for(|stop| *stop).await; } => {
                ConnectionInput::StopRequested
            }
        }
    }
}
