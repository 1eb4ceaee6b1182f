//! Cart Service
//!
//! Cart mutations and the priced preview. Every mutation runs under the
//! user's lock. Stock checks here are advisory, a friendly early
//! failure against the live catalog; checkout re-validates everything
//! under its own transaction, so a preview that looked fine can still
//! fail there and the other way round.

use crate::db::models::Cart;
use crate::db::repository::{CartLineJoined, CartRepository, SupplyRepository};
use crate::pricing;
use crate::services::locks::UserLocks;
use rust_decimal::Decimal;
use shared::cart::{PricedCartView, PricedLineView};
use shared::error::{AppError, AppResult, ErrorCode};
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct CartService {
    carts: CartRepository,
    supplies: SupplyRepository,
    locks: Arc<UserLocks>,
}

impl CartService {
    pub fn new(db: Surreal<Db>, locks: Arc<UserLocks>) -> Self {
        Self {
            carts: CartRepository::new(db.clone()),
            supplies: SupplyRepository::new(db),
            locks,
        }
    }

    /// The user's cart, priced line by line against the live catalog
    pub async fn preview(&self, user_id: &str) -> AppResult<PricedCartView> {
        let _guard = self.locks.acquire(user_id).await;
        let cart = self.carts.get_or_create(user_id).await?;
        self.priced_view(&cart_id(&cart)?).await
    }

    /// Add a supply to the cart, merging quantities when it is already
    /// there. The advisory check runs against the merged quantity, so a
    /// cart can never grow past what the shelf currently holds.
    pub async fn add_item(
        &self,
        user_id: &str,
        supply_id: &RecordId,
        quantity: i64,
    ) -> AppResult<PricedCartView> {
        let _guard = self.locks.acquire(user_id).await;

        let supply = self
            .supplies
            .find_by_id(supply_id)
            .await?
            .ok_or_else(|| supply_not_found(supply_id))?;
        let cart = self.carts.get_or_create(user_id).await?;
        let cart_id = cart_id(&cart)?;

        let merged = match self.carts.find_line(&cart_id, supply_id).await? {
            Some(line) => line.quantity + quantity,
            None => quantity,
        };
        if supply.available_stock < merged {
            return Err(AppError::insufficient_stock(
                supply_id.to_string(),
                merged,
                supply.available_stock,
            ));
        }

        self.carts.add_line(&cart_id, supply_id, quantity).await?;
        tracing::debug!(user = user_id, supply = %supply_id, quantity, "🛒 line added");
        self.priced_view(&cart_id).await
    }

    /// Overwrite a line's quantity
    pub async fn update_quantity(
        &self,
        user_id: &str,
        supply_id: &RecordId,
        quantity: i64,
    ) -> AppResult<PricedCartView> {
        let _guard = self.locks.acquire(user_id).await;

        let supply = self
            .supplies
            .find_by_id(supply_id)
            .await?
            .ok_or_else(|| supply_not_found(supply_id))?;
        if supply.available_stock < quantity {
            return Err(AppError::insufficient_stock(
                supply_id.to_string(),
                quantity,
                supply.available_stock,
            ));
        }

        let cart = self.carts.get_or_create(user_id).await?;
        let cart_id = cart_id(&cart)?;
        self.carts
            .set_quantity(&cart_id, supply_id, quantity)
            .await?
            .ok_or_else(|| line_not_found(supply_id))?;
        self.priced_view(&cart_id).await
    }

    /// Drop one line
    pub async fn remove_item(
        &self,
        user_id: &str,
        supply_id: &RecordId,
    ) -> AppResult<PricedCartView> {
        let _guard = self.locks.acquire(user_id).await;
        let cart = self.carts.get_or_create(user_id).await?;
        let cart_id = cart_id(&cart)?;
        if !self.carts.remove_line(&cart_id, supply_id).await? {
            return Err(line_not_found(supply_id));
        }
        self.priced_view(&cart_id).await
    }

    /// Drop every line
    pub async fn clear(&self, user_id: &str) -> AppResult<PricedCartView> {
        let _guard = self.locks.acquire(user_id).await;
        let cart = self.carts.get_or_create(user_id).await?;
        let cart_id = cart_id(&cart)?;
        self.carts.clear(&cart_id).await?;
        Ok(PricedCartView::empty())
    }

    async fn priced_view(&self, cart: &RecordId) -> AppResult<PricedCartView> {
        let rows = self.carts.lines_joined(cart).await?;
        Ok(build_preview(rows))
    }
}

fn cart_id(cart: &Cart) -> AppResult<RecordId> {
    cart.id
        .clone()
        .ok_or_else(|| AppError::database("cart row missing id"))
}

fn supply_not_found(supply_id: &RecordId) -> AppError {
    AppError::with_message(
        ErrorCode::SupplyNotFound,
        format!("supply {supply_id} not found"),
    )
}

fn line_not_found(supply_id: &RecordId) -> AppError {
    AppError::with_message(
        ErrorCode::CartLineNotFound,
        format!("{supply_id} is not in the cart"),
    )
}

/// Price joined cart rows into the wire view. Lines whose supply has
/// vanished stay visible at zero with `in_stock = false` and contribute
/// nothing to the totals.
pub(crate) fn build_preview(rows: Vec<CartLineJoined>) -> PricedCartView {
    let mut lines = Vec::with_capacity(rows.len());
    let mut priced = Vec::new();

    for row in rows {
        match row.unit_price {
            Some(unit_price) => {
                let line = pricing::price_line(unit_price, row.quantity);
                let available = row.available_stock.unwrap_or(0);
                lines.push(PricedLineView {
                    supply_id: row.supply_id,
                    name: row.name,
                    unit: row.unit,
                    unit_price,
                    quantity: row.quantity,
                    subtotal: line.subtotal,
                    discount: line.discount,
                    line_total: line.line_total,
                    available_stock: available,
                    in_stock: available >= row.quantity,
                });
                priced.push(line);
            }
            None => lines.push(PricedLineView {
                supply_id: row.supply_id,
                name: row.name,
                unit: row.unit,
                unit_price: Decimal::ZERO,
                quantity: row.quantity,
                subtotal: Decimal::ZERO,
                discount: Decimal::ZERO,
                line_total: Decimal::ZERO,
                available_stock: 0,
                in_stock: false,
            }),
        }
    }

    let totals = pricing::price_order(&priced);
    PricedCartView {
        lines,
        subtotal: totals.subtotal,
        discount: totals.discount,
        tax: totals.tax,
        total: totals.total,
    }
}
