//! Local backend over the record store.
//!
//! Synthesizes the identifiers and timestamps the remote backend would
//! normally generate. Every mutation is a whole-collection replace; that
//! coarse granularity is deliberate for the single-user scope.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{Equipment, EquipmentPatch, NewEquipment};
use crate::store::{RecordStore, EQUIPMENT_KEY};

use super::backend::EquipmentBackend;

#[derive(Debug, Clone)]
pub struct LocalRepository {
    store: RecordStore,
}

impl LocalRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    async fn read(&self) -> AppResult<Vec<Equipment>> {
        Ok(self.store.get(EQUIPMENT_KEY).await?.unwrap_or_default())
    }

    async fn write(&self, records: &[Equipment]) -> AppResult<()> {
        self.store.put(EQUIPMENT_KEY, &records).await
    }

    /// Time-derived id, bumped past any collision in the collection.
    fn synthesize_id(records: &[Equipment]) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while records.iter().any(|r| r.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

#[async_trait]
impl EquipmentBackend for LocalRepository {
    async fn list(&self) -> AppResult<Vec<Equipment>> {
        // Stored newest-first (inserts prepend), matching the remote order.
        self.read().await
    }

    async fn insert(&self, data: &NewEquipment) -> AppResult<Equipment> {
        let mut records = self.read().await?;
        let now = Utc::now();
        let record = Equipment {
            id: Self::synthesize_id(&records),
            name: data.name.clone(),
            serial_number: data.serial_number.clone(),
            status: data.status,
            location: data.location.clone(),
            borrower: data.borrower.clone(),
            borrow_date: data.borrow_date,
            return_date: data.return_date,
            repair_receive_date: data.repair_receive_date,
            repair_complete_date: data.repair_complete_date,
            notes: data.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        records.insert(0, record.clone());
        self.write(&records).await?;
        Ok(record)
    }

    async fn update(&self, id: &str, patch: &EquipmentPatch) -> AppResult<Equipment> {
        let mut records = self.read().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        patch.apply_to(record);

        // updated_at must strictly increase even when two updates land
        // inside one clock tick.
        let mut now = Utc::now();
        if now <= record.updated_at {
            now = record.updated_at + Duration::milliseconds(1);
        }
        record.updated_at = now;

        let updated = record.clone();
        self.write(&records).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut records = self.read().await?;
        records.retain(|r| r.id != id);
        self.write(&records).await
    }

    async fn exists_by_serial<'a>(
        &self,
        serial: &str,
        exclude_id: Option<&'a str>,
    ) -> AppResult<bool> {
        let records = self.read().await?;
        Ok(records
            .iter()
            .any(|r| r.serial_number == serial && exclude_id != Some(r.id.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquipmentStatus;

    fn new_item(serial: &str) -> NewEquipment {
        NewEquipment {
            name: "PC1".into(),
            serial_number: serial.into(),
            status: EquipmentStatus::InStock,
            location: "L1".into(),
            borrower: None,
            borrow_date: None,
            return_date: None,
            repair_receive_date: None,
            repair_complete_date: None,
            notes: None,
        }
    }

    async fn repo() -> (tempfile::TempDir, LocalRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        (dir, LocalRepository::new(store))
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let (_dir, repo) = repo().await;
        let record = repo.insert(&new_item("S1")).await.unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn test_insert_prepends_newest_first() {
        let (_dir, repo) = repo().await;
        repo.insert(&new_item("S1")).await.unwrap();
        let second = repo.insert(&new_item("S2")).await.unwrap();
        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
    }

    #[tokio::test]
    async fn test_insert_ids_are_distinct() {
        let (_dir, repo) = repo().await;
        let a = repo.insert(&new_item("S1")).await.unwrap();
        let b = repo.insert(&new_item("S2")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_updated_at() {
        let (_dir, repo) = repo().await;
        let record = repo.insert(&new_item("S1")).await.unwrap();

        let patch = EquipmentPatch {
            location: Some("L2".into()),
            ..Default::default()
        };
        let updated = repo.update(&record.id, &patch).await.unwrap();

        assert_eq!(updated.location, "L2");
        assert_eq!(updated.name, record.name);
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at > record.updated_at);

        let again = repo.update(&record.id, &patch).await.unwrap();
        assert!(again.updated_at > updated.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (_dir, repo) = repo().await;
        let err = repo
            .update("missing", &EquipmentPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, repo) = repo().await;
        let record = repo.insert(&new_item("S1")).await.unwrap();
        repo.delete(&record.id).await.unwrap();
        repo.delete(&record.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exists_by_serial_respects_exclusion() {
        let (_dir, repo) = repo().await;
        let record = repo.insert(&new_item("S1")).await.unwrap();

        assert!(repo.exists_by_serial("S1", None).await.unwrap());
        assert!(!repo.exists_by_serial("S1", Some(&record.id)).await.unwrap());
        assert!(!repo.exists_by_serial("S2", None).await.unwrap());
    }
}
