use super::*;
use crate::db::DbService;
use crate::db::models::SupplyCreate;
use crate::db::repository::SupplyRepository;
use crate::services::CartService;
use crate::utils::record::parse_record_id;
use crate::utils::time::now_rfc3339;
use rust_decimal::Decimal;
use shared::order::{OrderView, ShippingInfo};
use tempfile::TempDir;

/// Everything an order test needs, on a throwaway store
struct TestHarness {
    orders: OrderService,
    carts: CartService,
    supplies: SupplyRepository,
    _dir: TempDir,
}

async fn harness() -> TestHarness {
    let dir = tempfile::tempdir().unwrap();
    let db = DbService::open(dir.path()).await.unwrap();
    let handle = db.handle();
    let locks = Arc::new(UserLocks::new());
    TestHarness {
        orders: OrderService::new(handle.clone(), locks.clone()),
        carts: CartService::new(handle.clone(), locks),
        supplies: SupplyRepository::new(handle),
        _dir: dir,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

async fn seed_supply(h: &TestHarness, name: &str, price: &str, stock: i64) -> RecordId {
    let supply = h
        .supplies
        .create(SupplyCreate {
            name: name.to_string(),
            unit: "kg".to_string(),
            unit_price: dec(price),
            available_stock: stock,
            created_at: now_rfc3339(),
        })
        .await
        .unwrap();
    supply.id.unwrap()
}

async fn stock_of(h: &TestHarness, supply: &RecordId) -> i64 {
    h.supplies
        .find_by_id(supply)
        .await
        .unwrap()
        .unwrap()
        .available_stock
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        recipient: "Mara Holt".to_string(),
        phone: "555-0144".to_string(),
        address: "12 Orchard Lane".to_string(),
        city: "Riverton".to_string(),
        postal_code: "04901".to_string(),
        note: None,
    }
}

/// The wire id of an order view as a record id again
fn order_rid(view: &OrderView) -> RecordId {
    parse_record_id("order", &view.id).unwrap()
}

mod test_cart;
mod test_lifecycle;
