//! Cart API
//!
//! One cart per authenticated user, created lazily on first touch.
//! Every response carries the freshly priced cart so clients never
//! need a follow-up read.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::view).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route(
            "/items/{supply_id}",
            put(handler::update_item).delete(handler::remove_item),
        )
}
