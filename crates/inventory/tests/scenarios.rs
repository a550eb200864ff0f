use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use stockroom_core::{Entity, ManualClock};
use stockroom_events::Event;
use stockroom_inventory::{
    InventoryEvent, InventoryService, OrderItem, OrderStatus, ProductId, ProductPatch,
    ProfileUpdate, SeedData, ServiceError, SharedInventory,
};

fn manual_clock() -> Arc<ManualClock> {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    Arc::new(ManualClock::new(start))
}

fn demo_service() -> InventoryService {
    InventoryService::from_seed(&SeedData::demo(), manual_clock()).unwrap()
}

fn dec(units: i64) -> Decimal {
    Decimal::from(units)
}

#[test]
fn order_for_three_widgets_costs_three_hundred() {
    let mut svc = InventoryService::new();
    let widget = svc.add_product("Widget", dec(100), 10).unwrap();

    let order = svc
        .create_order("Alice", vec![OrderItem::new(widget, 3)])
        .unwrap();
    assert_eq!(svc.order_total(order.id()).unwrap(), dec(300));
    assert_eq!(svc.product(widget).unwrap().quantity(), 7);
    assert_eq!(order.status(), OrderStatus::Pending);

    svc.set_order_status(order.id(), OrderStatus::Completed)
        .unwrap();
    assert_eq!(
        svc.order(order.id()).map(|o| o.status()),
        Some(OrderStatus::Completed)
    );

    svc.delete_order(order.id()).unwrap();
    assert_eq!(svc.product(widget).unwrap().quantity(), 10);
    assert!(svc.order(order.id()).is_none());
}

#[test]
fn widget_add_failures_leave_catalog_unchanged() {
    let mut svc = InventoryService::new();
    svc.add_product("Widget", dec(5), 1).unwrap();

    let attempts = [
        ("WIDGET", dec(5), 1, ServiceError::NameTaken),
        ("Bolt", dec(-5), 1, ServiceError::NegativePrice),
        ("Bolt", dec(5), -1, ServiceError::NegativeQuantity),
    ];
    for (name, price, quantity, expected) in attempts {
        assert_eq!(svc.add_product(name, price, quantity).unwrap_err(), expected);
    }
    assert_eq!(svc.products().len(), 1);
}

#[test]
fn registration_is_case_insensitive_on_username_and_email() {
    let mut svc = demo_service();
    assert_eq!(
        svc.register("Admin", "pass", "fresh@example.com").unwrap_err(),
        ServiceError::UsernameTaken
    );
    assert_eq!(
        svc.register("fresh", "pass", "ADMIN@INVENTORY.COM").unwrap_err(),
        ServiceError::EmailTaken
    );
    assert!(svc.register("fresh", "pass", "fresh@example.com").is_ok());
}

#[test]
fn referenced_products_cannot_be_deleted() {
    let mut svc = demo_service();
    // Product 1 is referenced by two seeded orders.
    let ryzen = ProductId::new(1);
    assert_eq!(
        svc.delete_product(ryzen).unwrap_err(),
        ServiceError::ReferencedByOrder(ryzen)
    );

    let orders: Vec<_> = svc
        .orders()
        .iter()
        .filter(|o| o.references(ryzen))
        .map(|o| o.id())
        .collect();
    for id in orders {
        svc.delete_order(id).unwrap();
    }
    assert!(svc.delete_product(ryzen).is_ok());
}

#[test]
fn blank_search_equals_full_listing() {
    let svc = demo_service();
    let all: Vec<_> = svc.products().iter().collect();
    assert_eq!(svc.search_products(""), all);
    assert_eq!(svc.search_products("   "), all);
    assert_eq!(svc.search_orders("").len(), svc.orders().len());
}

#[test]
fn failed_order_changes_nothing() {
    let mut svc = demo_service();
    let before: Vec<_> = svc.products().iter().map(|p| p.quantity()).collect();
    let orders_before = svc.orders().len();

    // Product 3 has only 3 units on hand.
    let err = svc
        .create_order(
            "Greedy",
            vec![
                OrderItem::new(ProductId::new(1), 1),
                OrderItem::new(ProductId::new(3), 4),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientStock { .. }));

    let after: Vec<_> = svc.products().iter().map(|p| p.quantity()).collect();
    assert_eq!(before, after);
    assert_eq!(svc.orders().len(), orders_before);
}

#[test]
fn duplicate_lines_summing_past_the_maximum_change_nothing() {
    let mut svc = demo_service();
    let before: Vec<_> = svc.products().iter().map(|p| p.quantity()).collect();
    let next_id = svc.orders().len() as u32 + 1;

    let err = svc
        .create_order(
            "Overflow",
            vec![
                OrderItem::new(ProductId::new(2), 2),
                OrderItem::new(ProductId::new(1), i64::MAX),
                OrderItem::new(ProductId::new(1), 1),
            ],
        )
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::QuantityOverflow {
            product_id: ProductId::new(1)
        }
    );

    let after: Vec<_> = svc.products().iter().map(|p| p.quantity()).collect();
    assert_eq!(before, after);

    let order = svc
        .create_order("Next", vec![OrderItem::new(ProductId::new(2), 1)])
        .unwrap();
    assert_eq!(order.id(), stockroom_inventory::OrderId::new(next_id));
}

#[test]
fn deleting_an_order_never_restocks_past_the_maximum() {
    let mut svc = demo_service();
    let order = svc
        .create_order("Alice", vec![OrderItem::new(ProductId::new(2), 3)])
        .unwrap();
    svc.update_product(ProductId::new(2), &ProductPatch::new().quantity(i64::MAX))
        .unwrap();

    assert_eq!(
        svc.delete_order(order.id()).unwrap_err(),
        ServiceError::QuantityOverflow {
            product_id: ProductId::new(2)
        }
    );
    assert!(svc.order(order.id()).is_some());
    assert_eq!(svc.product(ProductId::new(2)).unwrap().quantity(), i64::MAX);

    svc.update_product(ProductId::new(2), &ProductPatch::new().quantity(1))
        .unwrap();
    svc.delete_order(order.id()).unwrap();
    assert_eq!(svc.product(ProductId::new(2)).unwrap().quantity(), 4);
}

#[test]
fn totals_at_the_limits_are_errors() {
    let mut svc = InventoryService::new();
    let widget = svc.add_product("Widget", Decimal::MAX, 10).unwrap();
    let order = svc
        .create_order("Alice", vec![OrderItem::new(widget, 2)])
        .unwrap();

    assert_eq!(svc.order_total(order.id()), Err(ServiceError::TotalOverflow));
    assert_eq!(svc.stats(5), Err(ServiceError::TotalOverflow));

    svc.update_product(widget, &ProductPatch::new().price(dec(1)))
        .unwrap();
    assert_eq!(svc.order_total(order.id()), Ok(dec(2)));

    svc.add_product("Gadget", dec(1), i64::MAX).unwrap();
    assert_eq!(svc.total_units_in_stock(), Err(ServiceError::TotalOverflow));
}

#[test]
fn recent_orders_follow_creation_time() {
    let clock = manual_clock();
    let mut svc = InventoryService::from_seed(&SeedData::demo(), clock.clone()).unwrap();

    clock.advance(Duration::hours(1));
    let late = svc
        .create_order("Late", vec![OrderItem::new(ProductId::new(2), 1)])
        .unwrap();

    let recent = svc.recent_orders(2);
    assert_eq!(recent[0].id(), late.id());
    assert_eq!(recent.len(), 2);

    let stats = svc.stats(5).unwrap();
    assert_eq!(stats.recent_orders.len(), 4);
    assert_eq!(stats.recent_orders[0].customer_name, "Late");
}

#[test]
fn demo_seed_matches_dashboard_expectations() {
    let svc = demo_service();
    let stats = svc.stats(5).unwrap();

    assert_eq!(stats.total_products, 4);
    assert_eq!(stats.total_units_in_stock, 7 + 11 + 3 + 8);
    assert_eq!(stats.total_orders, 3);
    assert_eq!(stats.low_stock_count, 1);

    let johnler = &svc.orders()[0];
    assert_eq!(johnler.customer_name(), "Johnler");
    assert_eq!(johnler.status(), OrderStatus::Completed);
    assert_eq!(
        svc.order_total(johnler.id()).unwrap(),
        dec(2 * 21999 + 99999)
    );
}

#[test]
fn price_edits_change_historical_totals() {
    let mut svc = demo_service();
    let james = svc.orders()[1].id();
    assert_eq!(svc.order_total(james).unwrap(), dec(7937));

    svc.update_product(ProductId::new(2), &ProductPatch::new().price(dec(8000)))
        .unwrap();
    assert_eq!(svc.order_total(james).unwrap(), dec(8000));
}

#[test]
fn rejected_profile_update_is_not_partially_applied() {
    let mut svc = demo_service();
    svc.authenticate("admin", "admin").unwrap();

    let err = svc
        .update_profile(
            &ProfileUpdate::new()
                .username("boss")
                .phone("000")
                .change_password("not-admin", "newpass"),
        )
        .unwrap_err();
    assert_eq!(err, ServiceError::PasswordMismatch);

    let me = svc.current_account().unwrap();
    assert_eq!(me.username(), "admin");
    assert_eq!(me.phone(), "09123456789");
}

#[test]
fn mutations_publish_notifications() {
    let mut svc = InventoryService::new();
    let events = svc.subscribe();

    let widget = svc.add_product("Widget", dec(1), 4).unwrap();
    let order = svc
        .create_order("Alice", vec![OrderItem::new(widget, 1)])
        .unwrap();
    svc.set_order_status(order.id(), OrderStatus::Completed)
        .unwrap();
    // Rejected operations publish nothing.
    let _ = svc.add_product("widget", dec(1), 1);

    let received = events.drain();
    let kinds: Vec<_> = received.iter().map(Event::event_type).collect();
    assert_eq!(
        kinds,
        vec![
            "catalog.product.added",
            "orders.order.created",
            "orders.order.status_changed"
        ]
    );
    assert!(matches!(
        received[2],
        InventoryEvent::OrderStatusChanged {
            from: OrderStatus::Pending,
            to: OrderStatus::Completed,
            ..
        }
    ));

    let json = serde_json::to_value(&received[0]).unwrap();
    assert_eq!(json["type"], "product_added");
    assert_eq!(json["product_id"], 1);
}

#[tokio::test]
async fn shared_handle_authenticates_off_thread() {
    let shared = SharedInventory::new(demo_service());
    let id = shared
        .authenticate_in_background("cardo dalisay", "password123")
        .await
        .unwrap();
    let current = shared.read(|svc| svc.current_account().map(|a| a.username().to_string()));
    assert_eq!(current.as_deref(), Some("Cardo Dalisay"));
    assert_eq!(shared.read(|svc| svc.find_account("CARDO DALISAY").map(|a| a.id())), Some(id));
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Order(Vec<(u32, i64)>),
        Delete(u32),
        Restock(u32, i64),
        Reduce(u32, i64),
    }

    fn near_max() -> impl Strategy<Value = i64> {
        (i64::MAX - 5)..=i64::MAX
    }

    fn op() -> impl Strategy<Value = Op> {
        let line_quantity = prop_oneof![4 => 1i64..6, 1 => near_max()];
        let new_quantity = prop_oneof![4 => -3i64..10, 1 => near_max()];
        prop_oneof![
            proptest::collection::vec((1u32..6, line_quantity), 1..4).prop_map(Op::Order),
            (1u32..8).prop_map(Op::Delete),
            (1u32..6, new_quantity).prop_map(|(id, q)| Op::Restock(id, q)),
            (1u32..6, 0i64..6).prop_map(|(id, q)| Op::Reduce(id, q)),
        ]
    }

    proptest! {
        /// Property: stock never goes negative, a rejected order or delete
        /// leaves every quantity as it was, and aggregates never panic.
        #[test]
        fn stock_stays_consistent(ops in proptest::collection::vec(op(), 1..40)) {
            let mut svc = demo_service();

            for op in ops {
                let before: Vec<_> = svc.products().iter().map(|p| p.quantity()).collect();
                match op {
                    Op::Order(lines) => {
                        let items = lines
                            .iter()
                            .map(|(id, q)| OrderItem::new(ProductId::new(*id), *q))
                            .collect();
                        if svc.create_order("Prop", items).is_err() {
                            let after: Vec<_> = svc.products().iter().map(|p| p.quantity()).collect();
                            prop_assert_eq!(before, after);
                        }
                    }
                    Op::Delete(id) => {
                        if svc.delete_order(stockroom_inventory::OrderId::new(id)).is_err() {
                            let after: Vec<_> = svc.products().iter().map(|p| p.quantity()).collect();
                            prop_assert_eq!(before, after);
                        }
                    }
                    Op::Restock(id, q) => {
                        let _ = svc.update_product(ProductId::new(id), &ProductPatch::new().quantity(q));
                    }
                    Op::Reduce(id, q) => {
                        let _ = svc.reduce_stock(ProductId::new(id), q);
                    }
                }
                prop_assert!(svc.products().iter().all(|p| p.quantity() >= 0));
                let _ = svc.stats(5);
                for order in svc.orders() {
                    let _ = order.total_items();
                }
            }
        }
    }
}
