use super::*;
use shared::order::OrderStatus;

async fn placed_order(h: &TestHarness, user: &str, supply: &RecordId, quantity: i64) -> OrderView {
    h.carts.add_item(user, supply, quantity).await.unwrap();
    h.orders.checkout(user, shipping()).await.unwrap()
}

#[tokio::test]
async fn test_cancel_restocks_items() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let honey = seed_supply(&h, "Raw Honey", "9.00", 12).await;

    h.carts.add_item("farmer_joe", &kale, 6).await.unwrap();
    h.carts.add_item("farmer_joe", &honey, 2).await.unwrap();
    let order = h.orders.checkout("farmer_joe", shipping()).await.unwrap();
    assert_eq!(stock_of(&h, &kale).await, 34);

    let cancelled = h
        .orders
        .cancel("farmer_joe", &order_rid(&order))
        .await
        .unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(stock_of(&h, &kale).await, 40);
    assert_eq!(stock_of(&h, &honey).await, 12);
}

#[tokio::test]
async fn test_cancel_twice_restocks_once() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;
    let rid = order_rid(&order);

    h.orders.cancel("farmer_joe", &rid).await.unwrap();
    let err = h.orders.cancel("farmer_joe", &rid).await.unwrap_err();

    match err {
        OrderError::InvalidTransition { from, .. } => assert_eq!(from, OrderStatus::Cancelled),
        other => panic!("expected InvalidTransition, got {other:?}"),
    }
    // stock came back exactly once
    assert_eq!(stock_of(&h, &kale).await, 40);
}

#[tokio::test]
async fn test_cancel_after_shipping_is_refused() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;
    let rid = order_rid(&order);

    h.orders
        .update_status(&rid, OrderStatus::Processing, None)
        .await
        .unwrap();
    h.orders
        .update_status(&rid, OrderStatus::Shipped, Some("TRK-2201".to_string()))
        .await
        .unwrap();

    let err = h.orders.cancel("farmer_joe", &rid).await.unwrap_err();
    match err {
        OrderError::InvalidTransition { from, .. } => assert_eq!(from, OrderStatus::Shipped),
        other => panic!("expected InvalidTransition, got {other:?}"),
    }
    // the goods are on the road, nothing returns to the shelf
    assert_eq!(stock_of(&h, &kale).await, 34);
}

#[tokio::test]
async fn test_cancel_processing_order_is_allowed() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;
    let rid = order_rid(&order);

    h.orders
        .update_status(&rid, OrderStatus::Processing, None)
        .await
        .unwrap();
    let cancelled = h.orders.cancel("farmer_joe", &rid).await.unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(stock_of(&h, &kale).await, 40);
}

#[tokio::test]
async fn test_cancel_skips_vanished_supply_silently() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let honey = seed_supply(&h, "Raw Honey", "9.00", 12).await;

    h.carts.add_item("farmer_joe", &kale, 6).await.unwrap();
    h.carts.add_item("farmer_joe", &honey, 2).await.unwrap();
    let order = h.orders.checkout("farmer_joe", shipping()).await.unwrap();

    // the kale was pulled from the catalog while the order sat pending
    h.supplies.delete(&kale).await.unwrap();

    let cancelled = h
        .orders
        .cancel("farmer_joe", &order_rid(&order))
        .await
        .unwrap();

    // cancellation still lands; the surviving supply is restocked and
    // the vanished one's quantity is simply gone
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(stock_of(&h, &honey).await, 12);
    assert!(h.supplies.find_by_id(&kale).await.unwrap().is_none());
}

#[tokio::test]
async fn test_status_walks_the_chain() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;
    let rid = order_rid(&order);

    let processing = h
        .orders
        .update_status(&rid, OrderStatus::Processing, None)
        .await
        .unwrap();
    assert_eq!(processing.status, OrderStatus::Processing);
    assert!(processing.shipped_at.is_none());

    let shipped = h
        .orders
        .update_status(&rid, OrderStatus::Shipped, Some("TRK-2201".to_string()))
        .await
        .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert!(shipped.shipped_at.is_some());
    assert_eq!(shipped.tracking_number.as_deref(), Some("TRK-2201"));

    let delivered = h
        .orders
        .update_status(&rid, OrderStatus::Delivered, None)
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.delivered_at.is_some());
    // the shipping stamp survives delivery
    assert!(delivered.shipped_at.is_some());
}

#[tokio::test]
async fn test_status_cannot_skip_a_step() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;
    let rid = order_rid(&order);

    let err = h
        .orders
        .update_status(&rid, OrderStatus::Shipped, None)
        .await
        .unwrap_err();
    match err {
        OrderError::InvalidTransition { from, .. } => assert_eq!(from, OrderStatus::Pending),
        other => panic!("expected InvalidTransition, got {other:?}"),
    }

    // the order did not move
    let view = h
        .orders
        .detail("farmer_joe", &rid)
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_status_rejects_cancelled_target() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;

    let err = h
        .orders
        .update_status(&order_rid(&order), OrderStatus::Cancelled, None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_terminal_order_stays_terminal() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;
    let rid = order_rid(&order);

    for status in [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        h.orders.update_status(&rid, status, None).await.unwrap();
    }

    let err = h
        .orders
        .update_status(&rid, OrderStatus::Processing, None)
        .await
        .unwrap_err();
    match err {
        OrderError::InvalidTransition { from, .. } => assert_eq!(from, OrderStatus::Delivered),
        other => panic!("expected InvalidTransition, got {other:?}"),
    }
}

#[tokio::test]
async fn test_foreign_order_reads_as_missing() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let order = placed_order(&h, "farmer_joe", &kale, 6).await;
    let rid = order_rid(&order);

    let err = h.orders.cancel("chef_ana", &rid).await.unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(_)));

    let err = h.orders.detail("chef_ana", &rid).await.unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(_)));

    // and the owner still sees it untouched
    let view = h.orders.detail("farmer_joe", &rid).await.unwrap();
    assert_eq!(view.status, OrderStatus::Pending);
}
