//! `stockroom-inventory` — the inventory service.
//!
//! One [`InventoryService`] owns every account, product and order in the
//! process plus the current session. Presentation code calls its operations
//! and re-renders from the results (or from the change notifications it
//! publishes).
//!
//! The service is a plain single-owner value: mutations take `&mut self`. Wrap
//! it in a [`SharedInventory`] when more than one thread needs access.

pub mod events;
pub mod seed;
pub mod service;
pub mod shared;
pub mod stats;

mod accounts;
mod catalog;
mod orders;

pub use events::InventoryEvent;
pub use orders::OrderSummary;
pub use seed::{SeedAccount, SeedData, SeedError, SeedOrder, SeedProduct};
pub use service::InventoryService;
pub use shared::{AuthenticateError, SharedInventory};
pub use stats::InventoryStats;

pub use stockroom_auth::{Account, ProfileUpdate};
pub use stockroom_core::{
    AccountId, Clock, Entity, ManualClock, OrderId, ProductId, ServiceError, ServiceResult, SystemClock,
};
pub use stockroom_products::{Product, ProductPatch, LOW_STOCK_THRESHOLD};
pub use stockroom_sales::{Order, OrderItem, OrderStatus};
