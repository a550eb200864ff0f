//! Change notifications.
//!
//! The service publishes one event per successful mutation; presentation code
//! subscribes and re-renders. Nothing here is persisted.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
