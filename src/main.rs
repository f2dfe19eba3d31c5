//! Pitstock Server - Casino Equipment Inventory
//!
//! REST API server tracking casino floor computing equipment.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitstock_server::{
    api,
    config::{AppConfig, RemoteConfig},
    repository::{EquipmentRepository, LocalRepository},
    services::Services,
    store::{RecordStore, BACKEND_CONFIG_KEY},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pitstock_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pitstock Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the local record store and install the demo dataset on first run
    let store = RecordStore::open(&config.storage.data_dir)?;
    store.initialize().await?;

    // Resolve the backend configuration: settings saved through the API win
    // over the environment-provided ones
    let saved: Option<RemoteConfig> = store.get(BACKEND_CONFIG_KEY).await?;
    let effective = saved.unwrap_or_else(|| config.remote.clone());
    if effective.is_configured() {
        tracing::info!(url = %effective.url, "remote backend configured");
    } else {
        tracing::info!("no remote backend configured, serving from local store");
    }

    // Create repository and services
    let local = LocalRepository::new(store.clone());
    let repository = Arc::new(EquipmentRepository::new(local, &effective));
    let services = Services::new(repository, store, config.remote.clone());

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/serial-check", get(api::equipment::serial_check))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route("/equipment/:id/status", post(api::equipment::change_status))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        // Settings
        .route("/settings/backend", get(api::settings::get_backend))
        .route("/settings/backend", put(api::settings::update_backend))
        .route("/settings/backend/test", post(api::settings::test_backend))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
