//! Backend settings endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::RemoteConfig, error::AppResult, services::settings::BackendStatus};

/// Current backend settings and which backend is serving
#[utoipa::path(
    get,
    path = "/settings/backend",
    tag = "settings",
    responses(
        (status = 200, description = "Backend status", body = BackendStatus)
    )
)]
pub async fn get_backend(State(state): State<crate::AppState>) -> AppResult<Json<BackendStatus>> {
    let status = state.services.settings.status().await?;
    Ok(Json(status))
}

/// Save backend settings and reconfigure the repository
#[utoipa::path(
    put,
    path = "/settings/backend",
    tag = "settings",
    request_body = RemoteConfig,
    responses(
        (status = 200, description = "Settings saved", body = BackendStatus),
        (status = 400, description = "Invalid settings")
    )
)]
pub async fn update_backend(
    State(state): State<crate::AppState>,
    Json(config): Json<RemoteConfig>,
) -> AppResult<Json<BackendStatus>> {
    let status = state.services.settings.save(config).await?;
    Ok(Json(status))
}

#[derive(Serialize, ToSchema)]
pub struct ConnectionTestResponse {
    pub reachable: bool,
}

/// Probe the configured remote backend
#[utoipa::path(
    post,
    path = "/settings/backend/test",
    tag = "settings",
    responses(
        (status = 200, description = "Probe result", body = ConnectionTestResponse)
    )
)]
pub async fn test_backend(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ConnectionTestResponse>> {
    let reachable = state.services.settings.test_connection().await?;
    Ok(Json(ConnectionTestResponse { reachable }))
}
