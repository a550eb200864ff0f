//! Publish/subscribe abstraction for change notifications.
//!
//! The bus is a fan-out channel between the service and whatever renders its
//! state. It makes minimal assumptions:
//!
//! - **Broadcast**: every live subscription receives every published message.
//! - **Lossy for the publisher**: a failed publish never rolls back the mutation
//!   that produced the message; the service logs and moves on.
//! - **No persistence**: subscribers that join late only see later messages.

use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a bus.
///
/// ```ignore
/// let subscription = service.subscribe();
///
/// while let Ok(event) = subscription.try_recv() {
///     refresh_view(&event);
/// }
/// ```
///
/// Subscriptions are meant to be drained by a single consumer (typically the
/// presentation thread).
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every message that is already queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Event bus (pub/sub abstraction).
///
/// Implementations must be `Send + Sync` so a bus can be shared between the
/// service and a background worker.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}
