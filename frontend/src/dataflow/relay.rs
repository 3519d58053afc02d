//! Event streaming Relay
//!
//! A Relay is the sending half of an unbounded channel, handed to views so
//! they can report user input to an Actor.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Type-safe event sender for the Actor+Relay architecture.
///
/// # Event-Source Naming Convention
///
/// Relays are named `{source}_{event}_relay`:
/// - `menu_toggled_relay` - Hamburger button pressed
/// - `menu_link_pressed_relay` - A fullscreen menu link was tapped
/// - `viewport_resized_relay` - The window changed width
///
/// In debug builds a relay remembers the first code location that sent
/// through it and rejects sends from anywhere else.
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    /// The receiving Actor is gone.
    ChannelClosed,
    /// Relay sent from a second code location (debug builds only)
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::ChannelClosed => write!(f, "relay receiver was dropped"),
            #[cfg(debug_assertions)]
            RelayError::MultipleEmitters { previous, current } => write!(
                f,
                "relay sent from {} after {}; relays have a single event source",
                current, previous
            ),
        }
    }
}

impl std::error::Error for RelayError {}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a Relay with its receiving stream. Prefer [`relay()`].
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Send an event. Dropped silently when the Actor is gone, which
    /// happens after the app has been torn down.
    ///
    /// Panics in debug builds when sent from a second code location.
    #[track_caller]
    pub fn send(&self, value: T) {
        match self.try_send(value) {
            Ok(()) | Err(RelayError::ChannelClosed) => {}
            #[cfg(debug_assertions)]
            Err(error @ RelayError::MultipleEmitters { .. }) => panic!("{}", error),
        }
    }

    /// Send an event, reporting a closed channel instead of ignoring it.
    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

/// Creates a Relay with its receiving stream.
///
/// ```rust
/// let (menu_toggled_relay, mut menu_toggled) = relay::<()>();
///
/// Button::new().on_press(move || menu_toggled_relay.send(()));
///
/// while let Some(()) = menu_toggled.next().await {
///     // toggle the menu
/// }
/// ```
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}
