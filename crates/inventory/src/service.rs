use std::sync::Arc;

use chrono::{DateTime, Utc};

use stockroom_auth::Account;
use stockroom_core::{AccountId, Clock, Entity, IdSequence, ProductId, SystemClock};
use stockroom_events::{EventBus, InMemoryEventBus, Subscription};
use stockroom_products::Product;
use stockroom_sales::Order;

use crate::events::InventoryEvent;

/// The record store and its operation set.
///
/// # Invariants
/// - Product names are pairwise case-insensitively distinct; so are account
///   usernames and account emails.
/// - No product quantity is ever negative.
/// - A product referenced by any order cannot be deleted.
/// - Product and order ids come from independent sequences starting at 1 and
///   are never reused.
///
/// Operations are grouped by concern in sibling modules (`accounts`, `catalog`,
/// `orders`, `stats`); this module holds the state and the shared plumbing.
#[derive(Debug)]
pub struct InventoryService {
    pub(crate) accounts: Vec<Account>,
    pub(crate) products: Vec<Product>,
    pub(crate) orders: Vec<Order>,
    pub(crate) session: Option<AccountId>,
    pub(crate) product_ids: IdSequence,
    pub(crate) order_ids: IdSequence,
    clock: Arc<dyn Clock>,
    bus: InMemoryEventBus<InventoryEvent>,
}

impl InventoryService {
    /// An empty service on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// An empty service stamping records with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: Vec::new(),
            products: Vec::new(),
            orders: Vec::new(),
            session: None,
            product_ids: IdSequence::new(),
            order_ids: IdSequence::new(),
            clock,
            bus: InMemoryEventBus::new(),
        }
    }

    /// Receive a notification for every successful mutation from now on.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Publish a change notification. The mutation has already happened, so a
    /// failed publish is logged and otherwise ignored.
    pub(crate) fn publish(&self, event: InventoryEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(error = ?err, "failed to publish inventory change notification");
        }
    }

    pub(crate) fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }
}

impl Default for InventoryService {
    fn default() -> Self {
        Self::new()
    }
}
