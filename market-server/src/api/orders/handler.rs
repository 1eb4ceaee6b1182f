//! Order handlers
//!
//! Buyers only ever see their own orders; a foreign order id answers
//! 404 rather than 403 so ids cannot be probed. The status route is
//! the one merchant-side operation and requires the staff role.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::order::{
    CheckoutRequest, OrderSummary, OrderView, ReorderOutcome, UpdateStatusRequest,
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::record::parse_record_id;
use crate::utils::{AppError, AppResult};

/// GET /api/orders - newest-first summaries for the caller
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let orders = state.orders.list(&user.id).await?;
    Ok(Json(orders))
}

/// POST /api/orders/checkout - turn the cart into an order
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<OrderView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let order = state.orders.checkout(&user.id, payload.shipping).await?;
    Ok(Json(order))
}

/// GET /api/orders/{id} - full detail with frozen items
pub async fn detail(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let order_id = parse_record_id("order", &id)?;
    let order = state.orders.detail(&user.id, &order_id).await?;
    Ok(Json(order))
}

/// POST /api/orders/{id}/cancel - cancel and restock
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let order_id = parse_record_id("order", &id)?;
    let order = state.orders.cancel(&user.id, &order_id).await?;
    Ok(Json(order))
}

/// POST /api/orders/{id}/reorder - rebuild the cart from a past order
pub async fn reorder(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ReorderOutcome>> {
    let order_id = parse_record_id("order", &id)?;
    let outcome = state.orders.reorder(&user.id, &order_id).await?;
    Ok(Json(outcome))
}

/// PUT /api/orders/{id}/status - forward lifecycle move (staff only)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderView>> {
    user.require_staff()?;
    let order_id = parse_record_id("order", &id)?;
    let order = state
        .orders
        .update_status(&order_id, payload.status, payload.tracking_number)
        .await?;
    Ok(Json(order))
}
