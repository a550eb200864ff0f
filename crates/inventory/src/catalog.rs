//! Product catalog operations.

use rust_decimal::Decimal;

use stockroom_core::text::is_blank;
use stockroom_core::{find_by_id, position_by_id, Entity, ProductId, ServiceError, ServiceResult};
use stockroom_products::{Product, ProductPatch};

use crate::events::InventoryEvent;
use crate::service::InventoryService;

impl InventoryService {
    /// Add a product under the next product id.
    ///
    /// A rejected add does not consume an id.
    pub fn add_product(
        &mut self,
        name: &str,
        price: Decimal,
        quantity: i64,
    ) -> ServiceResult<ProductId> {
        let candidate = ProductId::new(self.product_ids.peek());
        let product = Product::new(candidate, name, price, quantity)
            .inspect_err(|err| tracing::debug!(%err, "product rejected"))?;
        self.insert_product(product)
    }

    /// Store a field-validated product built with the peeked id.
    pub(crate) fn insert_product(&mut self, product: Product) -> ServiceResult<ProductId> {
        if self.name_taken(product.name(), None) {
            tracing::debug!(name = product.name(), "product name already in use");
            return Err(ServiceError::NameTaken);
        }

        let product_id = ProductId::new(self.product_ids.allocate());
        debug_assert_eq!(product_id, product.id());
        self.products.push(product);

        tracing::info!(%product_id, "product added");
        self.publish(InventoryEvent::ProductAdded {
            product_id,
            occurred_at: self.now(),
        });
        Ok(product_id)
    }

    /// Edit a product.
    ///
    /// A blank name leaves the name unchanged. Negative price or quantity
    /// values are skipped, and the rest of the patch still applies.
    pub fn update_product(&mut self, id: ProductId, patch: &ProductPatch) -> ServiceResult<()> {
        if self.product(id).is_none() {
            return Err(ServiceError::ProductNotFound(id));
        }
        if let Some(name) = patch.effective_name() {
            if self.name_taken(name, Some(id)) {
                tracing::debug!(product_id = %id, name, "product name already in use");
                return Err(ServiceError::NameTaken);
            }
        }

        let ignored = patch.ignored_fields();
        if !ignored.is_empty() {
            tracing::warn!(product_id = %id, ?ignored, "negative values in product update skipped");
        }

        let product = self
            .product_mut(id)
            .ok_or(ServiceError::ProductNotFound(id))?;
        product.apply_patch(patch);

        tracing::info!(product_id = %id, "product updated");
        self.publish(InventoryEvent::ProductUpdated {
            product_id: id,
            occurred_at: self.now(),
        });
        Ok(())
    }

    /// Remove a product no order refers to.
    pub fn delete_product(&mut self, id: ProductId) -> ServiceResult<Product> {
        let index =
            position_by_id(&self.products, id).ok_or(ServiceError::ProductNotFound(id))?;
        if self.orders.iter().any(|o| o.references(id)) {
            tracing::debug!(product_id = %id, "product still referenced by an order");
            return Err(ServiceError::ReferencedByOrder(id));
        }

        let removed = self.products.remove(index);
        tracing::info!(product_id = %id, "product deleted");
        self.publish(InventoryEvent::ProductDeleted {
            product_id: id,
            occurred_at: self.now(),
        });
        Ok(removed)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        find_by_id(&self.products, id)
    }

    /// Every product in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Case-insensitive substring match on name. A blank query matches everything.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let blank = is_blank(query);
        self.products
            .iter()
            .filter(|p| blank || p.name_contains(query))
            .collect()
    }

    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    /// Whether `quantity` units are on hand. Unknown products are never in stock.
    pub fn is_in_stock(&self, id: ProductId, quantity: i64) -> bool {
        self.product(id).is_some_and(|p| p.has_stock(quantity))
    }

    pub fn reduce_stock(&mut self, id: ProductId, quantity: i64) -> ServiceResult<()> {
        let product = self
            .product_mut(id)
            .ok_or(ServiceError::ProductNotFound(id))?;
        product.reduce_stock(quantity)?;

        tracing::debug!(product_id = %id, quantity, "stock reduced");
        self.publish(InventoryEvent::StockReduced {
            product_id: id,
            quantity,
            occurred_at: self.now(),
        });
        Ok(())
    }

    fn name_taken(&self, name: &str, except: Option<ProductId>) -> bool {
        self.products
            .iter()
            .any(|p| Some(p.id()) != except && p.has_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_sales::OrderItem;

    fn dec(units: i64) -> Decimal {
        Decimal::from(units)
    }

    fn service_with_widget() -> (InventoryService, ProductId) {
        let mut svc = InventoryService::new();
        let id = svc.add_product("Widget", dec(10), 5).unwrap();
        (svc, id)
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let mut svc = InventoryService::new();
        let a = svc.add_product("Widget", dec(10), 5).unwrap();
        let b = svc.add_product("Gadget", dec(20), 8).unwrap();
        assert_eq!(a, ProductId::new(1));
        assert_eq!(b, ProductId::new(2));
        assert_eq!(svc.products().len(), 2);
    }

    #[test]
    fn rejected_adds_leave_catalog_and_ids_alone() {
        let (mut svc, _) = service_with_widget();

        assert_eq!(
            svc.add_product("widget", dec(1), 1).unwrap_err(),
            ServiceError::NameTaken
        );
        assert_eq!(
            svc.add_product("Sprocket", dec(-1), 1).unwrap_err(),
            ServiceError::NegativePrice
        );
        assert_eq!(
            svc.add_product("Sprocket", dec(1), -1).unwrap_err(),
            ServiceError::NegativeQuantity
        );
        assert_eq!(
            svc.add_product("   ", dec(1), 1).unwrap_err(),
            ServiceError::BlankName
        );

        assert_eq!(svc.products().len(), 1);
        assert_eq!(
            svc.add_product("Sprocket", dec(1), 1).unwrap(),
            ProductId::new(2)
        );
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let (mut svc, id) = service_with_widget();
        svc.delete_product(id).unwrap();
        let next = svc.add_product("Gadget", dec(1), 1).unwrap();
        assert_eq!(next, ProductId::new(2));
    }

    #[test]
    fn update_rejects_unknown_id_and_name_collisions() {
        let (mut svc, widget) = service_with_widget();
        svc.add_product("Gadget", dec(20), 8).unwrap();

        let err = svc
            .update_product(ProductId::new(99), &ProductPatch::new().quantity(1))
            .unwrap_err();
        assert_eq!(err, ServiceError::ProductNotFound(ProductId::new(99)));

        let err = svc
            .update_product(widget, &ProductPatch::new().name("GADGET").quantity(1))
            .unwrap_err();
        assert_eq!(err, ServiceError::NameTaken);
        assert_eq!(svc.product(widget).unwrap().quantity(), 5);
    }

    #[test]
    fn update_may_recase_own_name() {
        let (mut svc, widget) = service_with_widget();
        svc.update_product(widget, &ProductPatch::new().name("WIDGET"))
            .unwrap();
        assert_eq!(svc.product(widget).unwrap().name(), "WIDGET");
    }

    #[test]
    fn update_skips_negative_values_but_applies_the_rest() {
        let (mut svc, widget) = service_with_widget();
        svc.update_product(
            widget,
            &ProductPatch::new().price(dec(-3)).quantity(12),
        )
        .unwrap();

        let product = svc.product(widget).unwrap();
        assert_eq!(product.price(), dec(10));
        assert_eq!(product.quantity(), 12);
    }

    #[test]
    fn delete_refuses_referenced_products() {
        let (mut svc, widget) = service_with_widget();
        svc.create_order("Alice", vec![OrderItem::new(widget, 1)])
            .unwrap();

        assert_eq!(
            svc.delete_product(widget).unwrap_err(),
            ServiceError::ReferencedByOrder(widget)
        );
        assert!(svc.product(widget).is_some());

        assert_eq!(
            svc.delete_product(ProductId::new(42)).unwrap_err(),
            ServiceError::ProductNotFound(ProductId::new(42))
        );
    }

    #[test]
    fn blank_search_lists_everything() {
        let (mut svc, _) = service_with_widget();
        svc.add_product("Gadget", dec(20), 8).unwrap();

        assert_eq!(svc.search_products("").len(), 2);
        assert_eq!(svc.search_products("   ").len(), 2);

        let hits = svc.search_products("DG");
        assert_eq!(hits.len(), 2);
        let hits = svc.search_products("widg");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Widget");
    }

    #[test]
    fn non_blank_search_matches_the_query_as_given() {
        let (mut svc, _) = service_with_widget();
        svc.add_product("Power Supply", dec(20), 8).unwrap();

        let hits: Vec<_> = svc.search_products("r s").iter().map(|p| p.name()).collect();
        assert_eq!(hits, vec!["Power Supply"]);
        assert!(svc.search_products("widget ").is_empty());
        assert_eq!(svc.search_products(" supply").len(), 1);
    }

    #[test]
    fn low_stock_and_stock_checks() {
        let (mut svc, widget) = service_with_widget();
        let gadget = svc.add_product("Gadget", dec(20), 6).unwrap();

        let low: Vec<_> = svc.low_stock_products().iter().map(|p| p.id()).collect();
        assert_eq!(low, vec![widget]);

        assert!(svc.is_in_stock(gadget, 6));
        assert!(!svc.is_in_stock(gadget, 7));
        assert!(!svc.is_in_stock(ProductId::new(99), 0));
    }

    #[test]
    fn reduce_stock_fails_without_side_effects() {
        let (mut svc, widget) = service_with_widget();
        assert!(matches!(
            svc.reduce_stock(widget, 6).unwrap_err(),
            ServiceError::InsufficientStock { requested: 6, available: 5, .. }
        ));
        assert_eq!(svc.product(widget).unwrap().quantity(), 5);

        svc.reduce_stock(widget, 5).unwrap();
        assert_eq!(svc.product(widget).unwrap().quantity(), 0);
    }
}
