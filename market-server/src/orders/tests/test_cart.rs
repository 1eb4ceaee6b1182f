use super::*;
use shared::error::ErrorCode;

#[tokio::test]
async fn test_add_merges_lines_for_the_same_supply() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;

    h.carts.add_item("farmer_joe", &kale, 3).await.unwrap();
    let view = h.carts.add_item("farmer_joe", &kale, 4).await.unwrap();

    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].quantity, 7);
}

#[tokio::test]
async fn test_add_checks_stock_at_the_merged_quantity() {
    let h = harness().await;
    let honey = seed_supply(&h, "Raw Honey", "9.00", 5).await;

    h.carts.add_item("farmer_joe", &honey, 3).await.unwrap();
    let err = h.carts.add_item("farmer_joe", &honey, 3).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::InsufficientStock);
    let details = err.details.as_ref().unwrap();
    assert_eq!(details["requested"], 6);
    assert_eq!(details["available"], 5);

    // the cart kept the original line
    let view = h.carts.preview("farmer_joe").await.unwrap();
    assert_eq!(view.lines[0].quantity, 3);
}

#[tokio::test]
async fn test_add_unknown_supply() {
    let h = harness().await;
    let ghost = RecordId::from_table_key("supply", "doesnotexist");

    let err = h.carts.add_item("farmer_joe", &ghost, 1).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SupplyNotFound);
}

#[tokio::test]
async fn test_update_quantity_overwrites() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;

    h.carts.add_item("farmer_joe", &kale, 3).await.unwrap();
    let view = h
        .carts
        .update_quantity("farmer_joe", &kale, 11)
        .await
        .unwrap();

    assert_eq!(view.lines[0].quantity, 11);
    // 27.50 gross, 10% tier
    assert_eq!(view.lines[0].discount, dec("2.75"));
}

#[tokio::test]
async fn test_update_quantity_needs_an_existing_line() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;

    let err = h
        .carts
        .update_quantity("farmer_joe", &kale, 2)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CartLineNotFound);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let honey = seed_supply(&h, "Raw Honey", "9.00", 12).await;

    h.carts.add_item("farmer_joe", &kale, 3).await.unwrap();
    h.carts.add_item("farmer_joe", &honey, 2).await.unwrap();

    let view = h.carts.remove_item("farmer_joe", &kale).await.unwrap();
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].supply_id, honey.to_string());

    let err = h.carts.remove_item("farmer_joe", &kale).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CartLineNotFound);

    let view = h.carts.clear("farmer_joe").await.unwrap();
    assert!(view.is_empty());
    let view = h.carts.preview("farmer_joe").await.unwrap();
    assert!(view.is_empty());
}

#[tokio::test]
async fn test_preview_of_untouched_cart_is_empty() {
    let h = harness().await;

    let view = h.carts.preview("brand_new_user").await.unwrap();
    assert!(view.is_empty());
    assert_eq!(view.total, Decimal::ZERO);
}

#[tokio::test]
async fn test_preview_reports_dead_lines() {
    let h = harness().await;
    let kale = seed_supply(&h, "Winter Kale", "2.50", 40).await;
    let honey = seed_supply(&h, "Raw Honey", "9.00", 12).await;

    h.carts.add_item("farmer_joe", &kale, 3).await.unwrap();
    h.carts.add_item("farmer_joe", &honey, 2).await.unwrap();
    h.supplies.delete(&kale).await.unwrap();

    let view = h.carts.preview("farmer_joe").await.unwrap();
    assert_eq!(view.lines.len(), 2);

    let dead = view
        .lines
        .iter()
        .find(|l| l.supply_id == kale.to_string())
        .unwrap();
    assert!(!dead.in_stock);
    assert!(dead.name.is_none());
    assert_eq!(dead.line_total, Decimal::ZERO);

    // totals only count the living line
    assert_eq!(view.subtotal, dec("18.00"));
}
