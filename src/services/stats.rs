//! Inventory statistics service

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::EquipmentStatus,
    repository::EquipmentRepository,
};

/// Per-status record counts behind the dashboard cards.
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryStats {
    pub total: usize,
    pub in_stock: usize,
    pub deployed: usize,
    pub awaiting_repair: usize,
    pub in_repair: usize,
    pub repair_done: usize,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Arc<EquipmentRepository>,
}

impl StatsService {
    pub fn new(repository: Arc<EquipmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn summary(&self) -> AppResult<InventoryStats> {
        let records = self.repository.list().await?.into_value();

        let mut counts: HashMap<EquipmentStatus, usize> = HashMap::new();
        for record in &records {
            *counts.entry(record.status).or_default() += 1;
        }
        let count = |s: EquipmentStatus| counts.get(&s).copied().unwrap_or(0);

        Ok(InventoryStats {
            total: records.len(),
            in_stock: count(EquipmentStatus::InStock),
            deployed: count(EquipmentStatus::Deployed),
            awaiting_repair: count(EquipmentStatus::AwaitingRepair),
            in_repair: count(EquipmentStatus::InRepair),
            repair_done: count(EquipmentStatus::RepairDone),
        })
    }
}
