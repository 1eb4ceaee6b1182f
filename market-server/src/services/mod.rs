//! Application services
//!
//! - [`UserLocks`]: per-user mutex registry serializing cart mutations
//! - [`CartService`]: the cart operations behind the cart API

pub mod cart_service;
pub mod locks;

pub use cart_service::CartService;
pub use locks::UserLocks;
