//! Customer orders.
//!
//! Orders hold line items that point at products by id only. Anything that
//! needs a product's current state (totals, stock) resolves it through the
//! service that owns the catalog.

pub mod order;

pub use order::{aggregate_quantities, Order, OrderItem, OrderStatus};
