//! Farmgate Market Server - cart-to-order checkout engine
//!
//! # Architecture overview
//!
//! The server keeps a farm-goods catalog, per-user carts, and orders in
//! one embedded SurrealDB store and exposes them over a small HTTP API:
//!
//! - **Pricing** (`pricing`): pure volume-discount and tax arithmetic
//! - **Database** (`db`): embedded store, repositories, transaction scripts
//! - **Carts** (`services`): per-user carts with advisory stock checks
//! - **Orders** (`orders`): checkout, lifecycle, reorder
//! - **Auth** (`auth`): JWT validation for tokens minted elsewhere
//! - **HTTP API** (`api`): RESTful handlers
//!
//! # Module structure
//!
//! ```text
//! market-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT validation, current user
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # carts, per-user locks
//! ├── orders/        # checkout, lifecycle, reorder
//! ├── pricing/       # discount and tax engine
//! ├── db/            # embedded store, repositories
//! └── utils/         # logging, ids, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export the types main and integration tests touch
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use services::CartService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub fn print_banner() {
    println!(
        r#"
    ______
   / ____/___ _______ ____  ___
  / /_  / __ `/ ___/ __ `__ \
 / __/ / /_/ / /  / / / / / /
/_/    \__,_/_/  /_/ /_/ /_/
   ______       __
  / ____/___ _/ /____
 / / __/ __ `/ __/ _ \
/ /_/ / /_/ / /_/  __/
\____/\__,_/\__/\___/
    "#
    );
}
