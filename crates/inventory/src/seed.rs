//! Startup data: the built-in demo set and JSON seed files.
//!
//! Seeded orders are historical records. They reference seeded products but do
//! not take anything out of stock, so the quantities in the seed are the
//! quantities on hand after loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_auth::Account;
use stockroom_core::{Clock, OrderId, ProductId, ServiceError};
use stockroom_sales::{Order, OrderItem, OrderStatus};

use crate::events::InventoryEvent;
use crate::service::InventoryService;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed record {record} rejected: {source}")]
    Rejected {
        record: String,
        #[source]
        source: ServiceError,
    },
}

impl SeedError {
    fn rejected(record: impl Into<String>, source: ServiceError) -> Self {
        SeedError::Rejected {
            record: record.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// Items refer to products by their position in the seed, starting at 1,
/// which matches the ids they receive on an empty service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOrder {
    pub customer_name: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub accounts: Vec<SeedAccount>,
    pub products: Vec<SeedProduct>,
    pub orders: Vec<SeedOrder>,
}

impl SeedData {
    /// The demo data set: two accounts, four products and three orders.
    pub fn demo() -> Self {
        let account = |username: &str, password: &str, email: &str| SeedAccount {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            phone: "09123456789".to_string(),
        };
        let product = |name: &str, price: i64, quantity: i64| SeedProduct {
            name: name.to_string(),
            price: Decimal::from(price),
            quantity,
        };
        let order = |customer: &str, status: OrderStatus, lines: &[(u32, i64)]| SeedOrder {
            customer_name: customer.to_string(),
            status,
            items: lines
                .iter()
                .map(|&(id, qty)| OrderItem::new(ProductId::new(id), qty))
                .collect(),
        };

        Self {
            accounts: vec![
                account("admin", "admin", "admin@inventory.com"),
                account("Cardo Dalisay", "password123", "cardodalisay@gmail.com"),
            ],
            products: vec![
                product("AMD Ryzen 7 7800X3D", 21999, 7),
                product("RM750x Fully Modular Power Supply", 7937, 11),
                product("Nvidia RTX 5090", 99999, 3),
                product("Intel Core Ultra 9 Processor 285K", 36600, 8),
            ],
            orders: vec![
                order("Johnler", OrderStatus::Completed, &[(1, 2), (3, 1)]),
                order("James", OrderStatus::Pending, &[(2, 1)]),
                order("Johnson", OrderStatus::Processing, &[(4, 1), (1, 1)]),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl InventoryService {
    /// Build a service holding `seed`. Every record goes through the same
    /// validation as the live operations; the first rejection aborts the load.
    pub fn from_seed(seed: &SeedData, clock: Arc<dyn Clock>) -> Result<Self, SeedError> {
        let mut svc = Self::with_clock(clock);

        for a in &seed.accounts {
            Account::register(&a.username, &a.password, &a.email)
                .map(|account| account.with_phone(&a.phone))
                .and_then(|account| svc.insert_account(account))
                .map_err(|err| SeedError::rejected(format!("account {:?}", a.username), err))?;
        }

        for p in &seed.products {
            svc.add_product(&p.name, p.price, p.quantity)
                .map_err(|err| SeedError::rejected(format!("product {:?}", p.name), err))?;
        }

        for o in &seed.orders {
            svc.insert_seed_order(o).map_err(|err| {
                SeedError::rejected(format!("order for {:?}", o.customer_name), err)
            })?;
        }

        tracing::info!(
            accounts = svc.accounts.len(),
            products = svc.products.len(),
            orders = svc.orders.len(),
            "seed data loaded"
        );
        Ok(svc)
    }

    fn insert_seed_order(&mut self, seed: &SeedOrder) -> Result<OrderId, ServiceError> {
        Order::validate_request(&seed.customer_name, &seed.items)?;
        if let Some(missing) = seed.items.iter().find(|i| self.product(i.product_id).is_none()) {
            return Err(ServiceError::ProductNotFound(missing.product_id));
        }

        let order_id = OrderId::new(self.order_ids.allocate());
        let order = Order::new(order_id, &seed.customer_name, seed.items.clone(), self.now())?
            .with_status(seed.status);
        self.orders.push(order);

        self.publish(InventoryEvent::OrderCreated {
            order_id,
            occurred_at: self.now(),
        });
        Ok(order_id)
    }
}
