//! Cart persistence
//!
//! One cart row per user (enforced by the unique index), one line per
//! (cart, supply). These methods do plain reads and writes; per-user
//! serialization is the caller's job, so a merge never races another
//! mutation of the same cart.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Cart, CartLine, CartLineCreate};
use crate::utils::time::now_rfc3339;
use rust_decimal::Decimal;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const CART_TABLE: &str = "cart";
pub const CART_LINE_TABLE: &str = "cart_line";

/// A cart line joined with live catalog data for the priced preview.
///
/// Catalog fields come back `None` when the supply was deleted after
/// the line was added; the pricing layer renders such lines dead
/// instead of dropping them.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLineJoined {
    pub supply_id: String,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub available_stock: Option<i64>,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// The user's cart, created on first touch
    pub async fn get_or_create(&self, user_id: &str) -> RepoResult<Cart> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE user_id = $user_id")
            .bind(("user_id", user_id.to_string()))
            .await?;
        let existing: Vec<Cart> = result.take(0)?;
        if let Some(cart) = existing.into_iter().next() {
            return Ok(cart);
        }

        let created: Option<Cart> = self
            .base
            .db()
            .create(CART_TABLE)
            .content(Cart {
                id: None,
                user_id: user_id.to_string(),
                created_at: now_rfc3339(),
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("cart create returned nothing".to_string()))
    }

    /// Raw lines, oldest first
    pub async fn lines(&self, cart: &RecordId) -> RepoResult<Vec<CartLine>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_line WHERE cart = $cart ORDER BY added_at")
            .bind(("cart", cart.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    /// Lines joined with the current catalog rows
    pub async fn lines_joined(&self, cart: &RecordId) -> RepoResult<Vec<CartLineJoined>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT \
                     <string>supply AS supply_id, \
                     supply.name AS name, \
                     supply.unit AS unit, \
                     supply.unit_price AS unit_price, \
                     supply.available_stock AS available_stock, \
                     quantity \
                 FROM cart_line WHERE cart = $cart ORDER BY added_at",
            )
            .bind(("cart", cart.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn find_line(
        &self,
        cart: &RecordId,
        supply: &RecordId,
    ) -> RepoResult<Option<CartLine>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_line WHERE cart = $cart AND supply = $supply")
            .bind(("cart", cart.clone()))
            .bind(("supply", supply.clone()))
            .await?;
        let rows: Vec<CartLine> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Add a line, merging quantities when the supply is already there
    pub async fn add_line(
        &self,
        cart: &RecordId,
        supply: &RecordId,
        quantity: i64,
    ) -> RepoResult<CartLine> {
        if let Some(line) = self.find_line(cart, supply).await? {
            let line_id = line
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("cart line row missing id".to_string()))?;
            let mut result = self
                .base
                .db()
                .query("UPDATE $line SET quantity += $quantity RETURN AFTER")
                .bind(("line", line_id))
                .bind(("quantity", quantity))
                .await?;
            let rows: Vec<CartLine> = result.take(0)?;
            return rows
                .into_iter()
                .next()
                .ok_or_else(|| RepoError::Database("cart line update returned nothing".to_string()));
        }

        let created: Option<CartLine> = self
            .base
            .db()
            .create(CART_LINE_TABLE)
            .content(CartLineCreate {
                cart: cart.clone(),
                supply: supply.clone(),
                quantity,
                added_at: now_rfc3339(),
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("cart line create returned nothing".to_string()))
    }

    /// Overwrite a line's quantity. `None` when the supply is not in
    /// the cart.
    pub async fn set_quantity(
        &self,
        cart: &RecordId,
        supply: &RecordId,
        quantity: i64,
    ) -> RepoResult<Option<CartLine>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE cart_line SET quantity = $quantity \
                 WHERE cart = $cart AND supply = $supply RETURN AFTER",
            )
            .bind(("cart", cart.clone()))
            .bind(("supply", supply.clone()))
            .bind(("quantity", quantity))
            .await?;
        let rows: Vec<CartLine> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Drop a line. `false` when the supply was not in the cart.
    pub async fn remove_line(&self, cart: &RecordId, supply: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "DELETE cart_line WHERE cart = $cart AND supply = $supply \
                 RETURN BEFORE",
            )
            .bind(("cart", cart.clone()))
            .bind(("supply", supply.clone()))
            .await?;
        let rows: Vec<CartLine> = result.take(0)?;
        Ok(!rows.is_empty())
    }

    /// Drop every line of the cart
    pub async fn clear(&self, cart: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE cart_line WHERE cart = $cart")
            .bind(("cart", cart.clone()))
            .await?
            .check()?;
        Ok(())
    }
}
