use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::text::{contains_ignore_case, eq_ignore_case, is_blank};
use stockroom_core::{Entity, ProductId, ServiceError, ServiceResult};

/// A product whose quantity on hand is at or below this value is "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Catalog product.
///
/// # Invariants
/// - `name` is never blank.
/// - `price >= 0`.
/// - `quantity >= 0` after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    quantity: i64,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> ServiceResult<Self> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ServiceError::BlankName);
        }
        if price < Decimal::ZERO {
            return Err(ServiceError::NegativePrice);
        }
        if quantity < 0 {
            return Err(ServiceError::NegativeQuantity);
        }

        Ok(Self {
            id,
            name,
            price,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Derived, never stored.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_THRESHOLD
    }

    pub fn has_name(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    pub fn name_contains(&self, query: &str) -> bool {
        contains_ignore_case(&self.name, query)
    }

    pub fn has_stock(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }

    /// Take `quantity` units out of stock.
    pub fn reduce_stock(&mut self, quantity: i64) -> ServiceResult<()> {
        if quantity < 0 {
            return Err(ServiceError::NegativeQuantity);
        }
        if !self.has_stock(quantity) {
            return Err(ServiceError::InsufficientStock {
                product_id: self.id,
                requested: quantity,
                available: self.quantity,
            });
        }
        self.quantity -= quantity;
        Ok(())
    }

    /// Put `quantity` units back on hand.
    pub fn restock(&mut self, quantity: i64) -> ServiceResult<()> {
        self.quantity = self.restocked(quantity)?;
        Ok(())
    }

    /// The quantity on hand after a restock of `quantity`, without applying it.
    pub fn restocked(&self, quantity: i64) -> ServiceResult<i64> {
        if quantity < 0 {
            return Err(ServiceError::NegativeQuantity);
        }
        self.quantity
            .checked_add(quantity)
            .ok_or(ServiceError::QuantityOverflow {
                product_id: self.id,
            })
    }

    /// Apply a catalog edit. Name uniqueness must already have been checked.
    ///
    /// Present-but-negative price or quantity values are skipped, not rejected.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = patch.effective_name() {
            self.name = name.to_string();
        }
        if let Some(price) = patch.price.filter(|p| *p >= Decimal::ZERO) {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity.filter(|q| *q >= 0) {
            self.quantity = quantity;
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Partial catalog edit. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// The new name, if one was supplied and is not blank.
    pub fn effective_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !is_blank(n))
    }

    /// Fields that were supplied but will be skipped because they are negative.
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if self.price.is_some_and(|p| p < Decimal::ZERO) {
            ignored.push("price");
        }
        if self.quantity.is_some_and(|q| q < 0) {
            ignored.push("quantity");
        }
        ignored
    }
}
