//! Dashboard aggregates.

use serde::Serialize;

use stockroom_core::{ServiceError, ServiceResult};
use stockroom_products::Product;

use crate::orders::OrderSummary;
use crate::service::InventoryService;

/// Point-in-time dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total_products: usize,
    pub total_units_in_stock: i64,
    pub total_orders: usize,
    pub low_stock_count: usize,
    pub low_stock: Vec<Product>,
    pub recent_orders: Vec<OrderSummary>,
}

impl InventoryService {
    pub fn total_products(&self) -> usize {
        self.products.len()
    }

    /// Sum of quantity on hand across the catalog.
    pub fn total_units_in_stock(&self) -> ServiceResult<i64> {
        self.products.iter().try_fold(0i64, |total, p| {
            total
                .checked_add(p.quantity())
                .ok_or(ServiceError::TotalOverflow)
        })
    }

    pub fn total_orders(&self) -> usize {
        self.orders.len()
    }

    pub fn low_stock_count(&self) -> usize {
        self.products.iter().filter(|p| p.is_low_stock()).count()
    }

    /// Collect every aggregate plus the `recent_limit` newest orders.
    pub fn stats(&self, recent_limit: usize) -> ServiceResult<InventoryStats> {
        Ok(InventoryStats {
            total_products: self.total_products(),
            total_units_in_stock: self.total_units_in_stock()?,
            total_orders: self.total_orders(),
            low_stock_count: self.low_stock_count(),
            low_stock: self.low_stock_products().into_iter().cloned().collect(),
            recent_orders: self
                .recent_orders(recent_limit)
                .into_iter()
                .map(|o| self.summarize(o))
                .collect::<ServiceResult<_>>()?,
        })
    }
}
