//! Backend settings service.
//!
//! Owns the saved backend configuration (second record-store key) and the
//! well-defined reconfiguration point: saving settings re-resolves the
//! backend selection exactly once, instead of every operation re-reading
//! ambient state.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::RemoteConfig,
    error::{AppError, AppResult},
    repository::{EquipmentRepository, RemoteRepository},
    store::{RecordStore, BACKEND_CONFIG_KEY},
};

/// Backend status reported to operators. Keys are never echoed back.
#[derive(Debug, Serialize, ToSchema)]
pub struct BackendStatus {
    /// Configured endpoint URL (the placeholder when unconfigured)
    pub url: String,
    /// Whether the configuration passes the backend selector
    pub remote_configured: bool,
    /// Backend currently serving operations: "remote" or "local"
    pub active: &'static str,
}

#[derive(Clone)]
pub struct SettingsService {
    store: RecordStore,
    repository: Arc<EquipmentRepository>,
    /// Environment-provided configuration, used when nothing is saved.
    env_remote: RemoteConfig,
}

impl SettingsService {
    pub fn new(
        store: RecordStore,
        repository: Arc<EquipmentRepository>,
        env_remote: RemoteConfig,
    ) -> Self {
        Self {
            store,
            repository,
            env_remote,
        }
    }

    /// Effective configuration: the saved one wins, the environment one is
    /// the fallback. Also used once at startup to build the repository.
    pub async fn effective_config(&self) -> AppResult<RemoteConfig> {
        Ok(self
            .store
            .get::<RemoteConfig>(BACKEND_CONFIG_KEY)
            .await?
            .unwrap_or_else(|| self.env_remote.clone()))
    }

    pub async fn status(&self) -> AppResult<BackendStatus> {
        let config = self.effective_config().await?;
        let active = if self.repository.remote_active().await {
            "remote"
        } else {
            "local"
        };
        Ok(BackendStatus {
            remote_configured: config.is_configured(),
            url: config.url,
            active,
        })
    }

    /// Persist new backend settings and swap the repository's backend. This
    /// is the reconfiguration point; nothing else re-resolves the selection.
    pub async fn save(&self, config: RemoteConfig) -> AppResult<BackendStatus> {
        let errors = config.validation_errors();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors.join("; ")));
        }

        self.store.put(BACKEND_CONFIG_KEY, &config).await?;
        self.repository.reconfigure(&config).await;
        self.status().await
    }

    /// Probe the remote backend with a one-row query. False when the
    /// configuration does not select a remote at all.
    pub async fn test_connection(&self) -> AppResult<bool> {
        let config = self.effective_config().await?;
        if !config.is_configured() {
            return Ok(false);
        }
        match RemoteRepository::new(&config).probe().await {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(error = %e, "backend connection test failed");
                Ok(false)
            }
        }
    }
}
