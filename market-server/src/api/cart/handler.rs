//! Cart handlers
//!
//! All of them resolve the cart from the authenticated user; cart ids
//! never appear on the wire. Stock checks at this level are advisory
//! early failures, checkout re-validates under its own transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::cart::{AddItemRequest, PricedCartView, UpdateItemRequest};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::record::parse_record_id;
use crate::utils::{AppError, AppResult};

/// GET /api/cart - the priced cart preview
pub async fn view(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<PricedCartView>> {
    let cart = state.carts.preview(&user.id).await?;
    Ok(Json(cart))
}

/// POST /api/cart/items - add a supply, merging with an existing line
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<PricedCartView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let supply_id = parse_record_id("supply", &payload.supply_id)?;
    let cart = state
        .carts
        .add_item(&user.id, &supply_id, payload.quantity)
        .await?;
    Ok(Json(cart))
}

/// PUT /api/cart/items/{supply_id} - overwrite a line's quantity
pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(supply_id): Path<String>,
    Json(payload): Json<UpdateItemRequest>,
) -> AppResult<Json<PricedCartView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let supply_id = parse_record_id("supply", &supply_id)?;
    let cart = state
        .carts
        .update_quantity(&user.id, &supply_id, payload.quantity)
        .await?;
    Ok(Json(cart))
}

/// DELETE /api/cart/items/{supply_id} - drop one line
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(supply_id): Path<String>,
) -> AppResult<Json<PricedCartView>> {
    let supply_id = parse_record_id("supply", &supply_id)?;
    let cart = state.carts.remove_item(&user.id, &supply_id).await?;
    Ok(Json(cart))
}

/// DELETE /api/cart - drop every line
pub async fn clear(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<PricedCartView>> {
    let cart = state.carts.clear(&user.id).await?;
    Ok(Json(cart))
}
