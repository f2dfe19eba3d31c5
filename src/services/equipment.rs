//! Equipment service

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Equipment, EquipmentPatch, NewEquipment, StatusChange},
    repository::EquipmentRepository,
};

use super::transitions::transition_patch;

#[derive(Clone)]
pub struct EquipmentService {
    repository: Arc<EquipmentRepository>,
}

impl EquipmentService {
    pub fn new(repository: Arc<EquipmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        Ok(self.repository.list().await?.into_value())
    }

    /// Register a new item. Rejects empty required fields and duplicate
    /// serial numbers before the insert reaches a backend.
    pub async fn create(&self, data: &NewEquipment) -> AppResult<Equipment> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .exists_by_serial(&data.serial_number, None)
            .await?
            .into_value()
        {
            return Err(AppError::Conflict(format!(
                "Serial number {} is already registered",
                data.serial_number
            )));
        }

        Ok(self.repository.add(data).await?.into_value())
    }

    /// Apply a partial update. When the patch changes the serial number, the
    /// uniqueness check excludes the record's own id so a record can keep its
    /// serial across an update.
    pub async fn update(&self, id: &str, patch: &EquipmentPatch) -> AppResult<Equipment> {
        if patch.is_empty() {
            return Err(AppError::Validation("no fields to update".to_string()));
        }

        if let Some(ref serial) = patch.serial_number {
            if serial.is_empty() {
                return Err(AppError::Validation("serial_number is required".to_string()));
            }
            if self
                .repository
                .exists_by_serial(serial, Some(id))
                .await?
                .into_value()
            {
                return Err(AppError::Conflict(format!(
                    "Serial number {} is already registered",
                    serial
                )));
            }
        }

        Ok(self.repository.update(id, patch).await?.into_value())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.remove(id).await?;
        Ok(())
    }

    pub async fn serial_exists(&self, serial: &str, exclude_id: Option<&str>) -> AppResult<bool> {
        Ok(self
            .repository
            .exists_by_serial(serial, exclude_id)
            .await?
            .into_value())
    }

    /// Transition an item to a new status: look up the current record,
    /// compute the implied field mutations, persist them as one update.
    pub async fn change_status(&self, id: &str, request: &StatusChange) -> AppResult<Equipment> {
        if request.location.trim().is_empty() {
            return Err(AppError::Validation("location is required".to_string()));
        }

        let current = self
            .repository
            .list()
            .await?
            .into_value()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        let patch = transition_patch(&current, request, Utc::now());
        Ok(self.repository.update(id, &patch).await?.into_value())
    }
}
