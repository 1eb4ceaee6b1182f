//! Order API
//!
//! | path | method | action |
//! |------|--------|--------|
//! | /api/orders | GET | newest-first summaries |
//! | /api/orders/checkout | POST | cart -> order, all or nothing |
//! | /api/orders/{id} | GET | full detail with frozen items |
//! | /api/orders/{id}/cancel | POST | cancel + restock |
//! | /api/orders/{id}/reorder | POST | rebuild cart from the order |
//! | /api/orders/{id}/status | PUT | forward move, staff only |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/checkout", post(handler::checkout))
        .route("/{id}", get(handler::detail))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/reorder", post(handler::reorder))
        .route("/{id}/status", put(handler::update_status))
}
