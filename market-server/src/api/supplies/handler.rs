//! Supply catalog handlers
//!
//! Read-only: the edge server consumes the catalog, it does not manage
//! it. Stock figures are live and advisory; checkout re-checks them.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::supply::SupplyView;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::SupplyRepository;
use crate::utils::record::parse_record_id;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/supplies - full catalog, sorted by name
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<SupplyView>>> {
    let repo = SupplyRepository::new(state.db.clone());
    let supplies = repo.find_all().await?;
    Ok(Json(supplies))
}

/// GET /api/supplies/{id} - one supply
pub async fn get_by_id(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<SupplyView>> {
    let supply_id = parse_record_id("supply", &id)?;
    let repo = SupplyRepository::new(state.db.clone());
    let supply = repo.find_view(&supply_id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::SupplyNotFound,
            format!("supply {supply_id} not found"),
        )
    })?;
    Ok(Json(supply))
}
