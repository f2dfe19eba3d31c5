//! Statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::InventoryStats};

/// Per-status inventory counts
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Inventory statistics", body = InventoryStats)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<InventoryStats>> {
    let stats = state.services.stats.summary().await?;
    Ok(Json(stats))
}
