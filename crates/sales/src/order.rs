use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::text::{contains_ignore_case, is_blank};
use stockroom_core::{Entity, OrderId, ProductId, ServiceError, ServiceResult};

/// Order status.
///
/// Transitions are caller-directed and unrestricted: any status may be set from
/// any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Human-readable label shown by the presentation layer.
    pub fn display_name(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Case-insensitive lookup by display name. Unknown text maps to `Pending`.
    pub fn from_display_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.display_name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(OrderStatus::Pending)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Order line: a product reference and a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Sum quantities per product, keeping the order in which products first appear.
///
/// Stock checks must look at the combined request: two lines of 3 against a
/// stock of 5 fail even though each line passes on its own.
pub fn aggregate_quantities(items: &[OrderItem]) -> ServiceResult<Vec<(ProductId, i64)>> {
    let mut totals: Vec<(ProductId, i64)> = Vec::new();
    for item in items {
        match totals.iter_mut().find(|(id, _)| *id == item.product_id) {
            Some((_, qty)) => {
                *qty = qty
                    .checked_add(item.quantity)
                    .ok_or(ServiceError::QuantityOverflow {
                        product_id: item.product_id,
                    })?;
            }
            None => totals.push((item.product_id, item.quantity)),
        }
    }
    Ok(totals)
}

/// Customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    customer_name: String,
    created_at: DateTime<Utc>,
    status: OrderStatus,
    items: Vec<OrderItem>,
}

impl Order {
    /// Check the request shape: customer name, at least one line, positive quantities.
    pub fn validate_request(customer_name: &str, items: &[OrderItem]) -> ServiceResult<()> {
        if is_blank(customer_name) {
            return Err(ServiceError::BlankCustomerName);
        }
        if items.is_empty() {
            return Err(ServiceError::EmptyOrder);
        }
        if let Some(bad) = items.iter().find(|i| i.quantity <= 0) {
            return Err(ServiceError::InvalidLineQuantity {
                product_id: bad.product_id,
            });
        }
        Ok(())
    }

    /// Build a `Pending` order. Stock is the caller's concern.
    pub fn new(
        id: OrderId,
        customer_name: impl Into<String>,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
    ) -> ServiceResult<Self> {
        let customer_name = customer_name.into();
        Self::validate_request(&customer_name, &items)?;

        Ok(Self {
            id,
            customer_name,
            created_at,
            status: OrderStatus::Pending,
            items,
        })
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Set a new status, returning the previous one.
    pub fn set_status(&mut self, status: OrderStatus) -> OrderStatus {
        core::mem::replace(&mut self.status, status)
    }

    pub fn references(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    pub fn customer_contains(&self, query: &str) -> bool {
        contains_ignore_case(&self.customer_name, query)
    }

    pub fn total_items(&self) -> ServiceResult<i64> {
        self.items.iter().try_fold(0i64, |total, i| {
            total
                .checked_add(i.quantity)
                .ok_or(ServiceError::TotalOverflow)
        })
    }

    /// Total at today's prices. Lines whose product no longer resolves count as zero.
    pub fn total_amount<F>(&self, price_of: F) -> ServiceResult<Decimal>
    where
        F: Fn(ProductId) -> Option<Decimal>,
    {
        let mut total = Decimal::ZERO;
        for item in &self.items {
            let Some(price) = price_of(item.product_id) else {
                continue;
            };
            let line = price
                .checked_mul(Decimal::from(item.quantity))
                .ok_or(ServiceError::TotalOverflow)?;
            total = total.checked_add(line).ok_or(ServiceError::TotalOverflow)?;
        }
        Ok(total)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}
