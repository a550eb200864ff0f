use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::{AccountId, OrderId, ProductId};
use stockroom_events::Event;
use stockroom_sales::OrderStatus;

/// Change notification published after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryEvent {
    AccountRegistered {
        account_id: AccountId,
        occurred_at: DateTime<Utc>,
    },
    SessionStarted {
        account_id: AccountId,
        occurred_at: DateTime<Utc>,
    },
    SessionEnded {
        account_id: Option<AccountId>,
        occurred_at: DateTime<Utc>,
    },
    ProfileUpdated {
        account_id: AccountId,
        occurred_at: DateTime<Utc>,
    },
    ProductAdded {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ProductUpdated {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ProductDeleted {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    StockReduced {
        product_id: ProductId,
        quantity: i64,
        occurred_at: DateTime<Utc>,
    },
    OrderCreated {
        order_id: OrderId,
        occurred_at: DateTime<Utc>,
    },
    OrderStatusChanged {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        occurred_at: DateTime<Utc>,
    },
    OrderDeleted {
        order_id: OrderId,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::AccountRegistered { .. } => "accounts.account.registered",
            InventoryEvent::SessionStarted { .. } => "accounts.session.started",
            InventoryEvent::SessionEnded { .. } => "accounts.session.ended",
            InventoryEvent::ProfileUpdated { .. } => "accounts.profile.updated",
            InventoryEvent::ProductAdded { .. } => "catalog.product.added",
            InventoryEvent::ProductUpdated { .. } => "catalog.product.updated",
            InventoryEvent::ProductDeleted { .. } => "catalog.product.deleted",
            InventoryEvent::StockReduced { .. } => "catalog.product.stock_reduced",
            InventoryEvent::OrderCreated { .. } => "orders.order.created",
            InventoryEvent::OrderStatusChanged { .. } => "orders.order.status_changed",
            InventoryEvent::OrderDeleted { .. } => "orders.order.deleted",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::AccountRegistered { occurred_at, .. }
            | InventoryEvent::SessionStarted { occurred_at, .. }
            | InventoryEvent::SessionEnded { occurred_at, .. }
            | InventoryEvent::ProfileUpdated { occurred_at, .. }
            | InventoryEvent::ProductAdded { occurred_at, .. }
            | InventoryEvent::ProductUpdated { occurred_at, .. }
            | InventoryEvent::ProductDeleted { occurred_at, .. }
            | InventoryEvent::StockReduced { occurred_at, .. }
            | InventoryEvent::OrderCreated { occurred_at, .. }
            | InventoryEvent::OrderStatusChanged { occurred_at, .. }
            | InventoryEvent::OrderDeleted { occurred_at, .. } => *occurred_at,
        }
    }
}
