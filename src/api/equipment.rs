//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{Equipment, EquipmentPatch, NewEquipment, StatusChange},
};

/// List all equipment, newest first
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Register equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = NewEquipment,
    responses(
        (status = 201, description = "Equipment registered", body = Equipment),
        (status = 409, description = "Serial number already registered")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<NewEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment fields
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = EquipmentPatch,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EquipmentPatch>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(&id, &patch).await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Transition equipment to a new lifecycle status
#[utoipa::path(
    post,
    path = "/equipment/{id}/status",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = StatusChange,
    responses(
        (status = 200, description = "Status changed", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn change_status(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusChange>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.change_status(&id, &request).await?;
    Ok(Json(equipment))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SerialCheckParams {
    /// Serial number to check
    pub serial: String,
    /// Record id to exclude from the comparison (for updates)
    pub exclude_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SerialCheckResponse {
    pub exists: bool,
}

/// Check whether a serial number is already registered
#[utoipa::path(
    get,
    path = "/equipment/serial-check",
    tag = "equipment",
    params(SerialCheckParams),
    responses(
        (status = 200, description = "Existence result", body = SerialCheckResponse)
    )
)]
pub async fn serial_check(
    State(state): State<crate::AppState>,
    Query(params): Query<SerialCheckParams>,
) -> AppResult<Json<SerialCheckResponse>> {
    let exists = state
        .services
        .equipment
        .serial_exists(&params.serial, params.exclude_id.as_deref())
        .await?;
    Ok(Json(SerialCheckResponse { exists }))
}
