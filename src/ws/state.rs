//! Connection state machine for the push channel.
//!
//! The reconnect loop is expressed as a pure reducer over a small state
//! enum instead of a mutable "should reconnect" flag. `Stopped` is
//! absorbing: once entered, no input leaves it, which is what guarantees
//! that no reconnect fires after shutdown.

/// Lifecycle state of the push-channel connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection and no dial in progress.
    Disconnected,
    /// A dial attempt is in flight.
    Connecting,
    /// Connected and receiving frames.
    Connected,
    /// Shut down; the machine never leaves this state.
    Stopped,
}

impl ConnectionState {
    /// Returns true if the transport is currently connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Inputs that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionInput {
    /// A consumer asked for the initial connection.
    DialRequested,
    /// The dial succeeded and the socket is open.
    Opened,
    /// The dial failed, or an open connection closed or errored.
    Lost,
    /// The fixed reconnect delay elapsed.
    RetryElapsed,
    /// Shutdown was requested.
    StopRequested,
}

/// Effect the driver must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEffect {
    /// Nothing to do.
    None,
    /// Open a connection attempt.
    Dial,
    /// Sleep for the fixed reconnect delay, then feed
    /// [`ConnectionInput::RetryElapsed`].
    ScheduleRetry,
}

/// Advances the state machine by one input.
#[must_use]
pub fn step(state: ConnectionState, input: ConnectionInput) -> (ConnectionState, ConnectionEffect) {
    use self::ConnectionEffect as Effect;
    use self::ConnectionInput as Input;
    use self::ConnectionState as State;

    match (state, input) {
        // Stopped absorbs everything, including retry timers that were
        // already pending when shutdown arrived.
        (State::Stopped, _) => (State::Stopped, Effect::None),
        (_, Input::StopRequested) => (State::Stopped, Effect::None),

        (State::Disconnected, Input::DialRequested | Input::RetryElapsed) => {
            (State::Connecting, Effect::Dial)
        }
        (State::Connecting, Input::Opened) => (State::Connected, Effect::None),
        (State::Connecting | State::Connected, Input::Lost) => {
            (State::Disconnected, Effect::ScheduleRetry)
        }

        // Anything else is a stale input for the current state.
        (state, _) => (state, Effect::None),
    }
}

#[cfg(test)]
mod tests {
    use super::step;
    use super::ConnectionEffect as Effect;
    use super::ConnectionInput as Input;
    use super::ConnectionState as State;

    #[test]
    fn test_initial_dial() {
        assert_eq!(
            step(State::Disconnected, Input::DialRequested),
            (State::Connecting, Effect::Dial)
        );
    }

    #[test]
    fn test_open_close_cycle() {
        let (state, effect) = step(State::Connecting, Input::Opened);
        assert_eq!(state, State::Connected);
        assert_eq!(effect, Effect::None);

        let (state, effect) = step(state, Input::Lost);
        assert_eq!(state, State::Disconnected);
        assert_eq!(effect, Effect::ScheduleRetry);

        let (state, effect) = step(state, Input::RetryElapsed);
        assert_eq!(state, State::Connecting);
        assert_eq!(effect, Effect::Dial);
    }

    #[test]
    fn test_failed_dial_schedules_retry() {
        assert_eq!(
            step(State::Connecting, Input::Lost),
            (State::Disconnected, Effect::ScheduleRetry)
        );
    }

    #[test]
    fn test_three_failures_then_success() {
        let mut state = State::Disconnected;
        let mut dials = 0;

        let mut feed = |state: &mut State, input| {
            let (next, effect) = step(*state, input);
            *state = next;
            effect
        };

        assert_eq!(feed(&mut state, Input::DialRequested), Effect::Dial);
        dials += 1;

        for _ in 0..3 {
            assert_eq!(feed(&mut state, Input::Lost), Effect::ScheduleRetry);
            assert_eq!(feed(&mut state, Input::RetryElapsed), Effect::Dial);
            dials += 1;
        }

        assert_eq!(feed(&mut state, Input::Opened), Effect::None);
        assert_eq!(state, State::Connected);
        assert_eq!(dials, 4);
    }

    #[test]
    fn test_stop_from_every_state() {
        for state in [
            State::Disconnected,
            State::Connecting,
            State::Connected,
            State::Stopped,
        ] {
            assert_eq!(
                step(state, Input::StopRequested),
                (State::Stopped, Effect::None)
            );
        }
    }

    #[test]
    fn test_stopped_is_absorbing() {
        for input in [
            Input::DialRequested,
            Input::Opened,
            Input::Lost,
            Input::RetryElapsed,
            Input::StopRequested,
        ] {
            // A close event after shutdown must not schedule a retry.
            assert_eq!(step(State::Stopped, input), (State::Stopped, Effect::None));
        }
    }

    #[test]
    fn test_stale_inputs_ignored() {
        assert_eq!(
            step(State::Connected, Input::Opened),
            (State::Connected, Effect::None)
        );
        assert_eq!(
            step(State::Disconnected, Input::Lost),
            (State::Disconnected, Effect::None)
        );
        assert_eq!(
            step(State::Connecting, Input::RetryElapsed),
            (State::Connecting, Effect::None)
        );
    }

    #[test]
    fn test_is_connected() {
        assert!(State::Connected.is_connected());
        assert!(!State::Connecting.is_connected());
        assert!(!State::Disconnected.is_connected());
        assert!(!State::Stopped.is_connected());
    }
}
