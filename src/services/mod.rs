//! Business logic services

pub mod equipment;
pub mod settings;
pub mod stats;
pub mod transitions;

use std::sync::Arc;

use crate::{config::RemoteConfig, repository::EquipmentRepository, store::RecordStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub settings: settings::SettingsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Arc<EquipmentRepository>,
        store: RecordStore,
        env_remote: RemoteConfig,
    ) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            settings: settings::SettingsService::new(store, repository.clone(), env_remote),
            stats: stats::StatsService::new(repository),
        }
    }
}
