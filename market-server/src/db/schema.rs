//! Schema definitions
//!
//! Tables stay SCHEMALESS; fields are only pinned down where the store
//! enforces an invariant (stock never negative, one cart per user, one
//! line per supply, valid status values). Money fields hold decimal
//! strings, timestamps hold RFC3339 strings.

use shared::error::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const DEFINITIONS: &str = r#"
    DEFINE TABLE IF NOT EXISTS supply SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS name ON supply TYPE string;
    DEFINE FIELD IF NOT EXISTS unit ON supply TYPE string;
    DEFINE FIELD IF NOT EXISTS unit_price ON supply TYPE string;
    DEFINE FIELD IF NOT EXISTS available_stock ON supply TYPE int ASSERT $value >= 0;

    DEFINE TABLE IF NOT EXISTS cart SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS user_id ON cart TYPE string;
    DEFINE INDEX IF NOT EXISTS idx_cart_user ON cart FIELDS user_id UNIQUE;

    DEFINE TABLE IF NOT EXISTS cart_line SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS cart ON cart_line TYPE record<cart>;
    DEFINE FIELD IF NOT EXISTS supply ON cart_line TYPE record<supply>;
    DEFINE FIELD IF NOT EXISTS quantity ON cart_line TYPE int ASSERT $value >= 1;
    DEFINE INDEX IF NOT EXISTS idx_cart_line ON cart_line FIELDS cart, supply UNIQUE;

    DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS user_id ON order TYPE string;
    -- number is assigned by a second statement inside the checkout
    -- transaction, so the field must tolerate the gap between them
    DEFINE FIELD IF NOT EXISTS number ON order TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS status ON order TYPE string
        ASSERT $value INSIDE ['pending', 'processing', 'shipped', 'delivered', 'cancelled'];
    DEFINE INDEX IF NOT EXISTS idx_order_user ON order FIELDS user_id;
    DEFINE INDEX IF NOT EXISTS idx_order_number ON order FIELDS number UNIQUE;

    DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS order_id ON order_item TYPE record<order>;
    DEFINE FIELD IF NOT EXISTS quantity ON order_item TYPE int ASSERT $value >= 1;
    DEFINE INDEX IF NOT EXISTS idx_order_item_order ON order_item FIELDS order_id;

    DEFINE TABLE IF NOT EXISTS order_counter SCHEMALESS;
"#;

/// Apply all definitions. Safe to run on every startup.
pub async fn define(db: &Surreal<Db>) -> AppResult<()> {
    db.query(DEFINITIONS)
        .await
        .map_err(|e| AppError::database(format!("schema definition failed: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("schema definition rejected: {e}")))?;
    Ok(())
}
