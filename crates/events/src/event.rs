use chrono::{DateTime, Utc};

/// A fact about a state change that already happened.
///
/// Events are:
/// - **immutable** (published after the mutation is applied)
/// - **named** (stable dotted identifiers, e.g. "catalog.product.added")
/// - **timestamped** with the service clock
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier.
    fn event_type(&self) -> &'static str;

    /// When the change was applied.
    fn occurred_at(&self) -> DateTime<Utc>;
}
