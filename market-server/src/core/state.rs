use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::core::config::DEV_JWT_SECRET;
use crate::db::DbService;
use crate::orders::OrderService;
use crate::services::{CartService, UserLocks};

/// Server state - shared handles for every service
///
/// Cloning is cheap: the database connection and the services inside
/// are all reference-counted.
///
/// | field | what |
/// |-------|------|
/// | config | immutable configuration |
/// | db | embedded SurrealDB connection |
/// | jwt_service | token validation |
/// | carts | cart mutations and previews |
/// | orders | checkout, lifecycle, reorder |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub carts: CartService,
    pub orders: OrderService,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        carts: CartService,
        orders: OrderService,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            carts,
            orders,
        }
    }

    /// Initialize the full service stack.
    ///
    /// 1. Work directory layout (database/, logs/)
    /// 2. Embedded database with schema applied
    /// 3. Services, sharing one per-user lock registry so cart
    ///    mutations and checkout serialize against each other
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be opened;
    /// there is nothing to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("market.db");
        let db_service = DbService::open(&db_path)
            .await
            .expect("Failed to initialize database");
        let db = db_service.handle();

        if config.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("🔑 using the built-in development JWT secret; set JWT_SECRET");
        }
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.jwt_audience.clone(),
        ));

        let locks = Arc::new(UserLocks::default());
        let carts = CartService::new(db.clone(), locks.clone());
        let orders = OrderService::new(db.clone(), locks);

        Self::new(config.clone(), db, jwt_service, carts, orders)
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Token validator, used by the auth extractor
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
