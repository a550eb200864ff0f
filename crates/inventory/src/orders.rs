//! Order lifecycle: creation with stock checks, status changes, deletion with
//! stock restoration, and derived totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use stockroom_core::text::is_blank;
use stockroom_core::{find_by_id, position_by_id, Entity, OrderId, ServiceError, ServiceResult};
use stockroom_sales::{aggregate_quantities, Order, OrderItem, OrderStatus};

use crate::events::InventoryEvent;
use crate::service::InventoryService;

/// Read model of an order with its derived totals resolved at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_items: i64,
    pub total_amount: Decimal,
}

impl InventoryService {
    /// Create a `Pending` order and take its quantities out of stock.
    ///
    /// Either every line is satisfied and stock drops by the full request, or
    /// nothing changes. Lines naming the same product are checked together.
    pub fn create_order(
        &mut self,
        customer_name: &str,
        items: Vec<OrderItem>,
    ) -> ServiceResult<Order> {
        Order::validate_request(customer_name, &items)
            .inspect_err(|err| tracing::debug!(%err, "order rejected"))?;

        let requested = aggregate_quantities(&items)
            .inspect_err(|err| tracing::debug!(%err, "order rejected"))?;
        for (product_id, quantity) in &requested {
            let product = self
                .product(*product_id)
                .ok_or(ServiceError::ProductNotFound(*product_id))?;
            if !product.has_stock(*quantity) {
                tracing::debug!(%product_id, quantity, available = product.quantity(), "order rejected");
                return Err(ServiceError::InsufficientStock {
                    product_id: *product_id,
                    requested: *quantity,
                    available: product.quantity(),
                });
            }
        }

        // Every product exists and covers the exact amount subtracted below.
        let order_id = OrderId::new(self.order_ids.allocate());
        let order = Order::new(order_id, customer_name, items, self.now())?;
        for (product_id, quantity) in requested {
            if let Some(product) = self.product_mut(product_id) {
                product.reduce_stock(quantity)?;
            }
        }
        self.orders.push(order.clone());

        tracing::info!(%order_id, lines = order.items().len(), "order created");
        self.publish(InventoryEvent::OrderCreated {
            order_id,
            occurred_at: self.now(),
        });
        Ok(order)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        find_by_id(&self.orders, id)
    }

    /// Every order in creation order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Case-insensitive substring match on customer name. A blank query matches everything.
    pub fn search_orders(&self, query: &str) -> Vec<&Order> {
        let blank = is_blank(query);
        self.orders
            .iter()
            .filter(|o| blank || o.customer_contains(query))
            .collect()
    }

    /// Most recent first, at most `limit` orders. Orders created at the same
    /// instant fall back to descending id.
    pub fn recent_orders(&self, limit: usize) -> Vec<&Order> {
        let mut recent: Vec<&Order> = self.orders.iter().collect();
        recent.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        recent.truncate(limit);
        recent
    }

    /// Set the status of an order, returning the previous status.
    pub fn set_order_status(
        &mut self,
        id: OrderId,
        status: OrderStatus,
    ) -> ServiceResult<OrderStatus> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(ServiceError::OrderNotFound(id))?;
        let previous = order.set_status(status);

        tracing::info!(order_id = %id, from = %previous, to = %status, "order status changed");
        self.publish(InventoryEvent::OrderStatusChanged {
            order_id: id,
            from: previous,
            to: status,
            occurred_at: self.now(),
        });
        Ok(previous)
    }

    /// Remove an order and put its quantities back on hand.
    ///
    /// Lines whose product has since been removed are skipped. If any restock
    /// would overflow, the order stays and no quantity changes.
    pub fn delete_order(&mut self, id: OrderId) -> ServiceResult<Order> {
        let index = position_by_id(&self.orders, id).ok_or(ServiceError::OrderNotFound(id))?;

        let returned = aggregate_quantities(self.orders[index].items())?;
        for (product_id, quantity) in &returned {
            if let Some(product) = self.product(*product_id) {
                product.restocked(*quantity).inspect_err(|err| {
                    tracing::debug!(order_id = %id, %err, "order deletion rejected");
                })?;
            }
        }

        let order = self.orders.remove(index);
        for (product_id, quantity) in returned {
            match self.product_mut(product_id) {
                Some(product) => product.restock(quantity)?,
                None => {
                    tracing::debug!(%product_id, "restock skipped for missing product")
                }
            }
        }

        tracing::info!(order_id = %id, "order deleted");
        self.publish(InventoryEvent::OrderDeleted {
            order_id: id,
            occurred_at: self.now(),
        });
        Ok(order)
    }

    /// Order total at current prices.
    pub fn order_total(&self, id: OrderId) -> ServiceResult<Decimal> {
        let order = self.order(id).ok_or(ServiceError::OrderNotFound(id))?;
        self.total_of(order)
    }

    pub fn order_summary(&self, id: OrderId) -> ServiceResult<OrderSummary> {
        let order = self.order(id).ok_or(ServiceError::OrderNotFound(id))?;
        self.summarize(order)
    }

    pub(crate) fn summarize(&self, order: &Order) -> ServiceResult<OrderSummary> {
        Ok(OrderSummary {
            id: order.id(),
            customer_name: order.customer_name().to_string(),
            created_at: order.created_at(),
            status: order.status(),
            total_items: order.total_items()?,
            total_amount: self.total_of(order)?,
        })
    }

    fn total_of(&self, order: &Order) -> ServiceResult<Decimal> {
        order.total_amount(|product_id| self.product(product_id).map(|p| p.price()))
    }
}
