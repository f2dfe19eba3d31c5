//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health, settings, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pitstock API",
        version = "1.0.0",
        description = "Casino floor equipment inventory REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Equipment
        equipment::list_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::change_status,
        equipment::serial_check,
        // Stats
        stats::get_stats,
        // Settings
        settings::get_backend,
        settings::update_backend,
        settings::test_backend,
    ),
    components(
        schemas(
            health::HealthResponse,
            equipment::SerialCheckResponse,
            settings::ConnectionTestResponse,
            crate::models::Equipment,
            crate::models::NewEquipment,
            crate::models::EquipmentPatch,
            crate::models::StatusChange,
            crate::models::EquipmentStatus,
            crate::config::RemoteConfig,
            crate::services::settings::BackendStatus,
            crate::services::stats::InventoryStats,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "stats", description = "Inventory statistics"),
        (name = "settings", description = "Backend configuration")
    )
)]
pub struct ApiDoc;

/// Router serving the Swagger UI and the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
